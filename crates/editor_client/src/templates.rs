//! Fixture sketches for the smoke sequence.
//!
//! Two fixed payloads: a mouse-follow circle and a rotating rectangle.
//! Each carries the program file plus companion markup loading p5.js from
//! the cdnjs CDN. Illustrative fixtures, not generated.

use crate::client::{SketchFile, SketchPayload};

/// Runtime library the companion markup loads.
pub const P5_CDN_URL: &str = "https://cdnjs.cloudflare.com/ajax/libs/p5.js/1.4.0/p5.js";

const BASIC_SKETCH_JS: &str = r#"function setup() {
  createCanvas(400, 400);
}

function draw() {
  background(220);

  // Draw a circle that follows the mouse
  fill(255, 0, 0);
  circle(mouseX, mouseY, 50);

  // Display coordinates
  fill(0);
  textAlign(CENTER);
  text(`x: ${mouseX}, y: ${mouseY}`, width / 2, 20);
}"#;

const ANIMATION_SKETCH_JS: &str = r#"let angle = 0;

function setup() {
  createCanvas(400, 400);
}

function draw() {
  background(220);

  translate(width / 2, height / 2);
  rotate(angle);

  fill(255, 0, 0);
  rectMode(CENTER);
  rect(0, 0, 100, 100);

  angle += 0.01;
}"#;

fn companion_markup(title: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{}</title>
    <style>
      body {{
        padding: 0;
        margin: 0;
      }}
    </style>
    <script src="{}"></script>
    <script src="sketch.js"></script>
  </head>
  <body>
  </body>
</html>"#,
        title, P5_CDN_URL
    )
}

fn sketch_files(program: &str, title: &str) -> Vec<SketchFile> {
    vec![
        SketchFile {
            name: "sketch.js".into(),
            content: program.into(),
            file_type: "file".into(),
        },
        SketchFile {
            name: "index.html".into(),
            content: companion_markup(title),
            file_type: "file".into(),
        },
    ]
}

/// Mouse-follow circle sketch with a coordinate readout.
pub fn basic() -> SketchPayload {
    SketchPayload {
        name: "Test Sketch - Basic".into(),
        files: sketch_files(BASIC_SKETCH_JS, "Test Sketch"),
    }
}

/// Rotating-rectangle animation.
pub fn animation() -> SketchPayload {
    SketchPayload {
        name: "Test Sketch - Animation".into(),
        files: sketch_files(ANIMATION_SKETCH_JS, "Animation Test"),
    }
}
