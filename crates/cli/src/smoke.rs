//! The fixed smoke sequence: access check, create, fetch, update, public
//! listing, optional cleanup.
//!
//! Fail-fast: the first error propagates to `main`, which turns it into
//! the process exit code. The access probe is the one exception — its
//! non-2xx outcomes are informational and never abort the run.

use std::io;

use sketchprobe_editor_client::{
    templates, AccessOutcome, ClientConfig, EditorClient, SketchUpdate,
};

use crate::exit_codes::{EXIT_CONFIG_MISSING, EXIT_ERROR};
use crate::report::{self, StderrReporter};
use crate::{client_error, credentials_error, resolve_auth_config, AuthArgs, CliError};

pub struct RunOptions {
    /// Username for the public-listing step.
    pub user: Option<String>,
    /// Delete the created sketch at the end.
    pub delete: bool,
    pub quiet: bool,
    pub json: bool,
}

const UPDATED_NAME: &str = "Test Sketch - Updated";

pub fn cmd_run(auth: AuthArgs, opts: RunOptions) -> Result<(), CliError> {
    // Configuration is validated before any network call
    let config = resolve_auth_config(&auth);
    let credentials = config.credentials().map_err(credentials_error)?;
    if credentials.is_none() {
        return Err(CliError {
            code: EXIT_CONFIG_MISSING,
            message: "no credentials configured".into(),
            hint: Some(
                "run `sketchprobe init` and fill in the credentials file, or pass --cookie / --username --token"
                    .into(),
            ),
        });
    }

    let list_user = opts
        .user
        .clone()
        .or_else(|| credentials.username().map(String::from));
    let base_url = config.base_url.clone();

    let mut client = EditorClient::new(ClientConfig {
        base_url: base_url.clone(),
        credentials,
    })
    .map_err(client_error)?;
    if !opts.quiet {
        client = client.with_observer(Box::new(StderrReporter));
    }

    if !opts.quiet {
        eprintln!("Smoke test against {}", base_url);
    }

    // 1. Access probe: informational, never aborts the sequence
    if !opts.quiet {
        eprintln!("Checking access...");
    }
    let outcome = client.check_access().map_err(client_error)?;
    if !opts.quiet {
        match outcome {
            AccessOutcome::Granted => eprintln!("access: granted"),
            AccessOutcome::Denied => {
                eprintln!("access: denied (continuing; later calls will surface the failure)")
            }
            AccessOutcome::Unknown => eprintln!("access: unknown (probe endpoint absent)"),
        }
    }

    // 2. Create the basic fixture
    let payload = templates::basic();
    if !opts.quiet {
        eprintln!("Creating sketch {:?}...", payload.name);
    }
    let project = client.create_sketch(&payload).map_err(client_error)?;
    if project.id.is_empty() {
        return Err(CliError {
            code: EXIT_ERROR,
            message: "server returned a project without an id".into(),
            hint: None,
        });
    }
    let owner = project.owner_username().unwrap_or("unknown").to_string();
    let editor_url = sketch_url(&base_url, &owner, &project.id);
    let full_url = full_view_url(&base_url, &owner, &project.id);
    if !opts.quiet {
        eprintln!("Created sketch:");
        eprintln!("  Id:      {}", project.id);
        eprintln!("  Name:    {}", project.name);
        eprintln!("  Owner:   {}", owner);
        if let Some(created) = &project.created_at {
            eprintln!("  Created: {}", created);
        }
        eprintln!("  Editor:  {}", editor_url);
        eprintln!("  Full:    {}", full_url);
    }

    // 3. Fetch it back; the id is stable for the rest of the run
    if !opts.quiet {
        eprintln!("Fetching project {}...", project.id);
    }
    let fetched = client.get_project(&project.id).map_err(client_error)?;
    if fetched.id != project.id {
        return Err(CliError {
            code: EXIT_ERROR,
            message: format!(
                "fetched project id {:?} does not match created id {:?}",
                fetched.id, project.id,
            ),
            hint: None,
        });
    }

    // 4. Update: rename and swap in the animation files
    if !opts.quiet {
        eprintln!("Updating sketch {}...", project.id);
    }
    let updates = SketchUpdate {
        name: Some(UPDATED_NAME.to_string()),
        files: Some(templates::animation().files),
    };
    let updated = client.update_sketch(&project.id, &updates).map_err(client_error)?;
    if !opts.quiet {
        eprintln!("  Name is now {:?}", updated.name);
    }

    // 5. Public listing, when a username is known
    match &list_user {
        Some(user) => {
            if !opts.quiet {
                eprintln!("Listing public sketches for {}...", user);
            }
            let sketches = client.list_user_sketches(user).map_err(client_error)?;
            if !opts.quiet {
                eprintln!("Found {} sketches", sketches.len());
                let mut stderr = io::stderr();
                report::write_sketch_listing(&mut stderr, &sketches)
                    .map_err(|e| CliError::io(e.to_string()))?;
            }
        }
        None => {
            if !opts.quiet {
                eprintln!("Skipping public listing (no username; pass --user)");
            }
        }
    }

    // 6. Optional cleanup
    if opts.delete {
        if !opts.quiet {
            eprintln!("Deleting sketch {}...", project.id);
        }
        client.delete_sketch(&project.id).map_err(client_error)?;
    }

    if !opts.quiet {
        eprintln!("All checks passed");
    }

    if opts.json {
        let summary = serde_json::json!({
            "project_id": project.id,
            "name": updated.name,
            "owner": owner,
            "editor_url": editor_url,
            "deleted": opts.delete,
        });
        println!("{}", serde_json::to_string(&summary).unwrap());
    }

    Ok(())
}

// ── Sketch URLs ─────────────────────────────────────────────────────

fn sketch_url(api_base: &str, owner: &str, id: &str) -> String {
    format!("{}/{}/sketches/{}", web_base(api_base), owner, id)
}

fn full_view_url(api_base: &str, owner: &str, id: &str) -> String {
    format!("{}/{}/full/{}", web_base(api_base), owner, id)
}

/// The editor's web origin is the API base without the trailing /api.
fn web_base(api_base: &str) -> &str {
    let trimmed = api_base.trim_end_matches('/');
    trimmed.strip_suffix("/api").unwrap_or(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_web_base_strips_api_suffix() {
        assert_eq!(web_base("https://editor.p5js.org/api"), "https://editor.p5js.org");
        assert_eq!(web_base("https://editor.p5js.org/api/"), "https://editor.p5js.org");
        assert_eq!(web_base("http://127.0.0.1:8000"), "http://127.0.0.1:8000");
    }

    #[test]
    fn test_sketch_urls() {
        assert_eq!(
            sketch_url("https://editor.p5js.org/api", "alice", "p1"),
            "https://editor.p5js.org/alice/sketches/p1",
        );
        assert_eq!(
            full_view_url("https://editor.p5js.org/api", "alice", "p1"),
            "https://editor.p5js.org/alice/full/p1",
        );
    }
}
