//! Console presentation: wire narration and listing display.

use std::io;

use sketchprobe_editor_client::{RequestObserver, SketchSummary};

/// Narrates wire activity to stderr: one line before each dispatch, one
/// line after the response or failure.
pub struct StderrReporter;

impl RequestObserver for StderrReporter {
    fn on_request(&self, method: &str, endpoint: &str) {
        eprintln!(">> {} {}", method, endpoint);
    }

    fn on_response(&self, status: u16, reason: &str) {
        eprintln!("<< {} {}", status, reason);
    }

    fn on_transport_error(&self, detail: &str) {
        eprintln!("<< request failed: {}", detail);
    }

    fn on_warning(&self, message: &str) {
        eprintln!("warning: {}", message);
    }
}

/// Number of listing entries shown before truncating.
const LISTING_DISPLAY_LIMIT: usize = 5;

/// Write a listing, first five entries only. Display truncation never
/// touches the underlying sequence.
pub fn write_sketch_listing(out: &mut dyn io::Write, sketches: &[SketchSummary]) -> io::Result<()> {
    for (i, sketch) in sketches.iter().take(LISTING_DISPLAY_LIMIT).enumerate() {
        writeln!(out, "{:2}. {}", i + 1, sketch.name)?;
        writeln!(out, "    Id:      {}", sketch.id)?;
        if let Some(updated) = &sketch.updated_at {
            writeln!(out, "    Updated: {}", updated)?;
        }
    }
    if sketches.len() > LISTING_DISPLAY_LIMIT {
        writeln!(out, "... and {} more", sketches.len() - LISTING_DISPLAY_LIMIT)?;
    }
    Ok(())
}
