//! Credential model and storage.
//!
//! Reads/writes ~/.config/sketchprobe/auth.json (0600 on Unix). The file
//! is seeded by `sketchprobe init` with placeholder values; credential
//! resolution rejects those placeholders before any request is dispatched.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default API base URL.
pub const DEFAULT_API_BASE: &str = "https://editor.p5js.org/api";

/// Placeholder values seeded by `sketchprobe init`.
pub const PLACEHOLDER_COOKIE: &str = "YOUR_SESSION_COOKIE_HERE";
pub const PLACEHOLDER_USERNAME: &str = "your_username";
pub const PLACEHOLDER_TOKEN: &str = "your_personal_access_token";

/// Active credential for one run. Exactly one mode at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Browser session cookie value (`connect.sid`), copied from DevTools.
    Cookie(String),
    /// Username + personal access token, sent as HTTP Basic auth.
    Token {
        username: String,
        access_token: String,
    },
    /// No credentials. Privileged calls are expected to fail server-side.
    None,
}

impl Credentials {
    pub fn is_none(&self) -> bool {
        matches!(self, Credentials::None)
    }

    /// Username carried by the credential, if any.
    pub fn username(&self) -> Option<&str> {
        match self {
            Credentials::Token { username, .. } => Some(username),
            _ => None,
        }
    }
}

/// Why credential resolution refused a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsError {
    /// A configured value still holds its placeholder from `init`.
    Placeholder(&'static str),
    /// Both a session cookie and a token pair are configured.
    Conflict,
    /// A username without a token, or a token without a username.
    IncompleteToken,
}

impl std::fmt::Display for CredentialsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialsError::Placeholder(field) => {
                write!(f, "{} still holds the placeholder value from `sketchprobe init`", field)
            }
            CredentialsError::Conflict => {
                write!(f, "both a session cookie and an access token are configured; exactly one auth mode may be active")
            }
            CredentialsError::IncompleteToken => {
                write!(f, "token auth needs both a username and an access token")
            }
        }
    }
}

impl std::error::Error for CredentialsError {}

/// Credentials as stored on disk (and as resolved from flags/env).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// API base URL (e.g. "https://editor.p5js.org/api")
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Session cookie value (`connect.sid`)
    #[serde(default)]
    pub session_cookie: Option<String>,
    /// Editor username (token auth)
    #[serde(default)]
    pub username: Option<String>,
    /// Personal access token (token auth)
    #[serde(default)]
    pub access_token: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            session_cookie: None,
            username: None,
            access_token: None,
        }
    }
}

impl AuthConfig {
    /// The file written by `sketchprobe init`: every credential field holds
    /// a placeholder that must be replaced before the harness will run.
    pub fn template() -> Self {
        Self {
            base_url: default_base_url(),
            session_cookie: Some(PLACEHOLDER_COOKIE.to_string()),
            username: Some(PLACEHOLDER_USERNAME.to_string()),
            access_token: Some(PLACEHOLDER_TOKEN.to_string()),
        }
    }

    /// Resolve the stored fields into an active credential.
    ///
    /// Placeholders are rejected first (a placeholder means "unset, but the
    /// user was told to fill it in"), then the single-active-mode invariant
    /// is enforced. All-empty resolves to [`Credentials::None`]; callers
    /// decide whether that is acceptable for the operation at hand.
    pub fn credentials(&self) -> Result<Credentials, CredentialsError> {
        let cookie = non_empty(&self.session_cookie);
        let username = non_empty(&self.username);
        let token = non_empty(&self.access_token);

        if cookie == Some(PLACEHOLDER_COOKIE) {
            return Err(CredentialsError::Placeholder("session_cookie"));
        }
        if username == Some(PLACEHOLDER_USERNAME) {
            return Err(CredentialsError::Placeholder("username"));
        }
        if token == Some(PLACEHOLDER_TOKEN) {
            return Err(CredentialsError::Placeholder("access_token"));
        }

        match (cookie, username, token) {
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => Err(CredentialsError::Conflict),
            (Some(c), None, None) => Ok(Credentials::Cookie(c.to_string())),
            (None, Some(u), Some(t)) => Ok(Credentials::Token {
                username: u.to_string(),
                access_token: t.to_string(),
            }),
            (None, Some(_), None) | (None, None, Some(_)) => Err(CredentialsError::IncompleteToken),
            (None, None, None) => Ok(Credentials::None),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Returns the path to the auth credentials file.
pub fn auth_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|c| c.join("sketchprobe/auth.json"))
}

/// Load saved auth credentials from disk.
/// Returns None if no credentials are saved or if the file is invalid.
pub fn load_auth() -> Option<AuthConfig> {
    let path = auth_file_path()?;
    let contents = std::fs::read_to_string(&path).ok()?;
    serde_json::from_str(&contents).ok()
}

/// Save auth credentials to disk.
/// Creates the parent directory if it doesn't exist.
/// Sets 0600 permissions on Unix.
pub fn save_auth(config: &AuthConfig) -> Result<(), String> {
    let path = auth_file_path().ok_or("Could not determine config directory")?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create config directory: {}", e))?;
    }

    let contents = serde_json::to_string_pretty(config)
        .map_err(|e| format!("Failed to serialize credentials: {}", e))?;

    std::fs::write(&path, &contents).map_err(|e| format!("Failed to write auth file: {}", e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let permissions = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(&path, permissions)
            .map_err(|e| format!("Failed to set file permissions: {}", e))?;
    }

    Ok(())
}

/// Delete saved auth credentials.
pub fn delete_auth() -> Result<(), String> {
    let Some(path) = auth_file_path() else {
        return Ok(());
    };
    if path.exists() {
        std::fs::remove_file(&path).map_err(|e| format!("Failed to delete auth file: {}", e))?;
    }
    Ok(())
}
