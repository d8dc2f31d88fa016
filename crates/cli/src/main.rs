// sketchprobe - manual smoke tests against the p5.js Web Editor API

mod exit_codes;
mod report;
mod smoke;

use std::io::{self, Write};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use sketchprobe_editor_client::{
    auth_file_path, delete_auth, load_auth, save_auth, AccessOutcome, AuthConfig, ClientConfig,
    ClientError, Credentials, CredentialsError, EditorClient, DEFAULT_API_BASE,
};

use exit_codes::{
    EXIT_API_AUTH, EXIT_API_NETWORK, EXIT_API_VALIDATION, EXIT_CONFIG_PLACEHOLDER, EXIT_ERROR,
    EXIT_SUCCESS, EXIT_USAGE,
};

#[derive(Parser)]
#[command(name = "sketchprobe")]
#[command(about = "Manual smoke tests against the p5.js Web Editor API")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Credential and endpoint flags shared by `login` and `run`.
#[derive(Args)]
struct AuthArgs {
    /// Session cookie value (connect.sid) copied from the browser
    #[arg(long, env = "P5_SESSION_COOKIE")]
    cookie: Option<String>,

    /// Editor username (token auth)
    #[arg(long, env = "P5_USERNAME")]
    username: Option<String>,

    /// Personal access token (token auth)
    #[arg(long, env = "P5_ACCESS_TOKEN")]
    token: Option<String>,

    /// API base URL (default: https://editor.p5js.org/api)
    #[arg(long, env = "P5_API_BASE")]
    base_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a credentials template and print setup instructions
    Init {
        /// Overwrite an existing credentials file
        #[arg(long)]
        force: bool,
    },

    /// Verify credentials against the API and save them
    Login {
        #[command(flatten)]
        auth: AuthArgs,
    },

    /// Delete saved credentials
    Logout,

    /// Run the fixed smoke sequence: access check, create, fetch, update, list
    #[command(after_help = "\
The sequence creates a fixture sketch, fetches it back, renames it, swaps
in the animation fixture, and lists the account's public sketches. Pass
--delete to remove the created sketch at the end.

Examples:
  sketchprobe run
  sketchprobe run --cookie \"$(pbpaste)\" --delete
  sketchprobe run --username alice --token $P5_ACCESS_TOKEN --json")]
    Run {
        #[command(flatten)]
        auth: AuthArgs,

        /// Username for the public-listing step (defaults to the token username)
        #[arg(long)]
        user: Option<String>,

        /// Delete the created sketch at the end of the sequence
        #[arg(long)]
        delete: bool,

        /// Suppress progress narration
        #[arg(long, short = 'q')]
        quiet: bool,

        /// Print a machine-readable summary to stdout
        #[arg(long)]
        json: bool,
    },

    /// List a user's public sketches (no auth required)
    List {
        /// Editor username
        username: String,

        /// API base URL (default: https://editor.p5js.org/api)
        #[arg(long, env = "P5_API_BASE")]
        base_url: Option<String>,

        /// Print the full listing as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { force } => cmd_init(force),
        Commands::Login { auth } => cmd_login(auth),
        Commands::Logout => cmd_logout(),
        Commands::Run {
            auth,
            user,
            delete,
            quiet,
            json,
        } => smoke::cmd_run(
            auth,
            smoke::RunOptions {
                user,
                delete,
                quiet,
                json,
            },
        ),
        Commands::List {
            username,
            base_url,
            json,
        } => cmd_list(username, base_url, json),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_USAGE,
            message: msg.into(),
            hint: None,
        }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_ERROR,
            message: msg.into(),
            hint: None,
        }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the auth configuration: explicit flags/env win over the saved
/// file; the saved file wins over bare defaults.
fn resolve_auth_config(auth: &AuthArgs) -> AuthConfig {
    let flags_present = auth.cookie.is_some() || auth.username.is_some() || auth.token.is_some();
    let saved = if flags_present { None } else { load_auth() };

    match saved {
        Some(mut config) => {
            if let Some(base) = &auth.base_url {
                config.base_url = base.clone();
            }
            config
        }
        None => AuthConfig {
            base_url: auth
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            session_cookie: auth.cookie.clone(),
            username: auth.username.clone(),
            access_token: auth.token.clone(),
        },
    }
}

/// Map credential-resolution failures to exit codes and remediation.
fn credentials_error(err: CredentialsError) -> CliError {
    match err {
        CredentialsError::Placeholder(_) => {
            let path = auth_file_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "the credentials file".into());
            CliError {
                code: EXIT_CONFIG_PLACEHOLDER,
                message: err.to_string(),
                hint: Some(format!(
                    "edit {} (run `sketchprobe init` again for the setup instructions)",
                    path,
                )),
            }
        }
        CredentialsError::Conflict => CliError::args(err.to_string())
            .with_hint("pass either --cookie or --username/--token, not both"),
        CredentialsError::IncompleteToken => CliError::args(err.to_string()),
    }
}

/// Map client errors to exit codes.
fn client_error(err: ClientError) -> CliError {
    match err {
        ClientError::Config(msg) => CliError::args(msg),
        ClientError::Network(msg) => CliError {
            code: EXIT_API_NETWORK,
            message: format!("cannot reach the editor API: {}", msg),
            hint: None,
        },
        ClientError::Http(status @ (401 | 403), msg) => CliError {
            code: EXIT_API_AUTH,
            message: format!("HTTP {}: {}", status, msg),
            hint: Some("the session may have expired; re-copy the cookie or generate a fresh token".into()),
        },
        ClientError::Http(status @ (400 | 422), msg) => CliError {
            code: EXIT_API_VALIDATION,
            message: format!("HTTP {}: {}", status, msg),
            hint: None,
        },
        ClientError::Http(status, msg) => CliError {
            code: EXIT_API_NETWORK,
            message: format!("HTTP {}: {}", status, msg),
            hint: None,
        },
        ClientError::Parse(msg) => CliError {
            code: EXIT_API_NETWORK,
            message: format!("unexpected response: {}", msg),
            hint: None,
        },
    }
}

// ── init / login / logout ───────────────────────────────────────────

fn cmd_init(force: bool) -> Result<(), CliError> {
    let path =
        auth_file_path().ok_or_else(|| CliError::io("could not determine config directory"))?;

    if path.exists() && !force {
        return Err(CliError::args(format!("{} already exists", path.display()))
            .with_hint("pass --force to overwrite it"));
    }

    save_auth(&AuthConfig::template()).map_err(CliError::io)?;

    eprintln!("Wrote credentials template to {}", path.display());
    eprintln!();
    eprintln!("Cookie auth:");
    eprintln!("  1. Log into editor.p5js.org in your browser");
    eprintln!("  2. Open DevTools (F12), then Application, then Cookies");
    eprintln!("  3. Copy the value of the connect.sid cookie");
    eprintln!("  4. Paste it as session_cookie (leave username/access_token placeholders empty)");
    eprintln!();
    eprintln!("Token auth:");
    eprintln!("  1. Log into editor.p5js.org");
    eprintln!("  2. Generate a personal access token under Account Settings");
    eprintln!("  3. Fill in username and access_token (leave session_cookie empty)");
    Ok(())
}

fn cmd_login(auth: AuthArgs) -> Result<(), CliError> {
    let mut auth = auth;

    // Token resolution: --token flag > P5_ACCESS_TOKEN env > interactive prompt
    if auth.cookie.is_none() && auth.username.is_some() && auth.token.is_none() {
        if atty::is(atty::Stream::Stdin) {
            eprint!("Personal access token: ");
            io::stderr().flush().ok();
            let mut buf = String::new();
            io::stdin()
                .read_line(&mut buf)
                .map_err(|e| CliError::io(e.to_string()))?;
            let trimmed = buf.trim().to_string();
            if trimmed.is_empty() {
                return Err(CliError::args("no token provided")
                    .with_hint("pass --token or set P5_ACCESS_TOKEN"));
            }
            auth.token = Some(trimmed);
        } else {
            return Err(CliError::args("no token provided and stdin is not a TTY")
                .with_hint("pass --token or set P5_ACCESS_TOKEN"));
        }
    }

    let config = AuthConfig {
        base_url: auth
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
        session_cookie: auth.cookie.clone(),
        username: auth.username.clone(),
        access_token: auth.token.clone(),
    };

    let credentials = config.credentials().map_err(credentials_error)?;
    if credentials.is_none() {
        return Err(CliError::args("no credentials provided")
            .with_hint("pass --cookie, or --username with --token"));
    }

    let client = EditorClient::new(ClientConfig {
        base_url: config.base_url.clone(),
        credentials,
    })
    .map_err(client_error)?
    .with_observer(Box::new(report::StderrReporter));

    match client.check_access().map_err(client_error)? {
        AccessOutcome::Granted => eprintln!("Credentials accepted"),
        AccessOutcome::Unknown => {
            eprintln!("Access-check endpoint absent on this deployment; saving anyway")
        }
        AccessOutcome::Denied => {
            return Err(CliError {
                code: EXIT_API_AUTH,
                message: "credentials rejected by the editor API".into(),
                hint: Some("re-copy the connect.sid cookie or generate a fresh token".into()),
            });
        }
    }

    save_auth(&config).map_err(CliError::io)?;
    if let Some(path) = auth_file_path() {
        eprintln!("Saved credentials to {}", path.display());
    }
    Ok(())
}

fn cmd_logout() -> Result<(), CliError> {
    delete_auth().map_err(CliError::io)?;
    eprintln!("Deleted saved credentials");
    Ok(())
}

// ── list ────────────────────────────────────────────────────────────

fn cmd_list(username: String, base_url: Option<String>, json: bool) -> Result<(), CliError> {
    let base_url = base_url
        .or_else(|| load_auth().map(|c| c.base_url))
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

    // Public endpoint: no credentials needed
    let client = EditorClient::new(ClientConfig {
        base_url,
        credentials: Credentials::None,
    })
    .map_err(client_error)?
    .with_observer(Box::new(report::StderrReporter));

    let sketches = client.list_user_sketches(&username).map_err(client_error)?;
    eprintln!("Found {} sketches", sketches.len());

    if json {
        println!("{}", serde_json::to_string(&sketches).unwrap());
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        report::write_sketch_listing(&mut handle, &sketches)
            .map_err(|e| CliError::io(e.to_string()))?;
    }
    Ok(())
}
