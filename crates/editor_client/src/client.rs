//! Editor API HTTP client.
//!
//! Blocking reqwest client (no Tokio runtime required). Covers the smoke
//! repertoire: access check, create, fetch, update, delete, plus the
//! public per-user listing.
//!
//! Fail-fast by design: no retries, no backoff, no timeout override. The
//! first failure propagates to the caller.

use std::cell::Cell;
use std::sync::Arc;

use reqwest::header;
use serde::{Deserialize, Serialize};

use crate::auth::Credentials;

/// Name of the editor's session cookie.
pub const SESSION_COOKIE_NAME: &str = "connect.sid";

/// Fixed identifying user agent sent with every request.
pub const USER_AGENT: &str = concat!("sketchprobe/", env!("CARGO_PKG_VERSION"));

/// Client configuration, fixed for the process lifetime.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL (e.g. "https://editor.p5js.org/api")
    pub base_url: String,
    /// Active credential. Exactly one mode.
    pub credentials: Credentials,
}

/// Observer for wire activity: one call before dispatch, one after the
/// response (or transport failure). Formatting is the caller's concern;
/// the default for every hook is silence.
pub trait RequestObserver {
    fn on_request(&self, _method: &str, _endpoint: &str) {}
    fn on_response(&self, _status: u16, _reason: &str) {}
    fn on_transport_error(&self, _detail: &str) {}
    fn on_warning(&self, _message: &str) {}
}

/// Silent default observer.
struct NullObserver;

impl RequestObserver for NullObserver {}

/// Error type for editor API operations.
#[derive(Debug)]
pub enum ClientError {
    /// Client could not be configured (bad base URL, unusable credential)
    Config(String),
    /// Network/transport error
    Network(String),
    /// HTTP error with status code and reason text
    Http(u16, String),
    /// Undecodable response body
    Parse(String),
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Config(msg) => write!(f, "Configuration error: {}", msg),
            ClientError::Network(msg) => write!(f, "Network error: {}", msg),
            ClientError::Http(code, msg) => write!(f, "HTTP {}: {}", code, msg),
            ClientError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {}

/// Outcome of the access-check probe. Non-2xx statuses are outcomes here,
/// not errors: the probe informs, it never aborts the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessOutcome {
    /// 2xx: credentials accepted.
    Granted,
    /// Non-2xx other than 404: credentials rejected.
    Denied,
    /// 404: probe endpoint absent on this deployment.
    Unknown,
}

// ── Wire types ──────────────────────────────────────────────────────

/// One file in a sketch payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SketchFile {
    pub name: String,
    pub content: String,
    #[serde(rename = "fileType")]
    pub file_type: String,
}

/// Payload for sketch creation. The server is the sole source of truth
/// after submission. Not validated client-side: an empty name or an empty
/// file list is sent as-is and the server rejection surfaces as an error.
#[derive(Debug, Clone, Serialize)]
pub struct SketchPayload {
    pub name: String,
    pub files: Vec<SketchFile>,
}

/// Partial update: rename and/or replace the file set.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SketchUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<SketchFile>>,
}

/// Owner of a project. The server returns either an object carrying a
/// username (under `owner` or `user`) or a bare identifier string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Owner {
    Named { username: String },
    Slug(String),
}

impl Owner {
    pub fn username(&self) -> &str {
        match self {
            Owner::Named { username } => username,
            Owner::Slug(slug) => slug,
        }
    }
}

/// Server representation of a sketch. Read-only display data; `id` is an
/// opaque stable identifier for the rest of the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default, alias = "user")]
    pub owner: Option<Owner>,
    #[serde(default, rename = "createdAt")]
    pub created_at: Option<String>,
    #[serde(default, rename = "updatedAt")]
    pub updated_at: Option<String>,
}

impl Project {
    pub fn owner_username(&self) -> Option<&str> {
        self.owner.as_ref().map(Owner::username)
    }
}

/// Entry from the public per-user listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SketchSummary {
    pub id: String,
    pub name: String,
    #[serde(default, rename = "updatedAt")]
    pub updated_at: Option<String>,
}

// ── Client ──────────────────────────────────────────────────────────

/// Editor API client (blocking).
pub struct EditorClient {
    /// Session client: JSON content type, cookie jar in cookie mode.
    http: reqwest::blocking::Client,
    /// Bare client for the public listing endpoint, which is always
    /// dispatched without auth artifacts.
    public: reqwest::blocking::Client,
    base_url: String,
    credentials: Credentials,
    /// Precomputed `Basic base64(username:token)` value (token mode).
    auth_header: Option<header::HeaderValue>,
    observer: Box<dyn RequestObserver>,
    warned_unauthenticated: Cell<bool>,
}

impl std::fmt::Debug for EditorClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorClient")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials)
            .field("auth_header", &self.auth_header)
            .field("warned_unauthenticated", &self.warned_unauthenticated)
            .finish_non_exhaustive()
    }
}

impl EditorClient {
    /// Create a new client from an explicit configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let mut builder = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers);

        let mut auth_header = None;
        match &config.credentials {
            Credentials::Cookie(value) => {
                let url = reqwest::Url::parse(&config.base_url).map_err(|e| {
                    ClientError::Config(format!("invalid base URL {:?}: {}", config.base_url, e))
                })?;
                let jar = Arc::new(reqwest::cookie::Jar::default());
                jar.add_cookie_str(&format!("{}={}", SESSION_COOKIE_NAME, value), &url);
                builder = builder.cookie_provider(jar);
            }
            Credentials::Token {
                username,
                access_token,
            } => {
                let value = basic_auth_value(username, access_token);
                let value = header::HeaderValue::from_str(&value).map_err(|_| {
                    ClientError::Config(
                        "credentials contain characters not valid in a header".into(),
                    )
                })?;
                auth_header = Some(value);
            }
            Credentials::None => {}
        }

        let http = builder
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;
        let public = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        Ok(Self {
            http,
            public,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials: config.credentials,
            auth_header,
            observer: Box::new(NullObserver),
            warned_unauthenticated: Cell::new(false),
        })
    }

    /// Attach a narration observer.
    pub fn with_observer(mut self, observer: Box<dyn RequestObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Probe whether the configured credential is accepted.
    ///
    /// A 404 means the probe endpoint is absent on this deployment, which
    /// is reported as [`AccessOutcome::Unknown`] rather than an error.
    pub fn check_access(&self) -> Result<AccessOutcome, ClientError> {
        let url = format!("{}/auth/access-check", self.base_url);
        let rb = self.authed(self.http.get(&url));
        let resp = self.send("GET", "/auth/access-check", rb)?;

        let status = resp.status();
        if status.is_success() {
            Ok(AccessOutcome::Granted)
        } else if status == reqwest::StatusCode::NOT_FOUND {
            Ok(AccessOutcome::Unknown)
        } else {
            Ok(AccessOutcome::Denied)
        }
    }

    /// Create a new sketch.
    pub fn create_sketch(&self, payload: &SketchPayload) -> Result<Project, ClientError> {
        let url = format!("{}/projects", self.base_url);
        let rb = self.authed(self.http.post(&url)).json(payload);
        let resp = error_for_status(self.send("POST", "/projects", rb)?)?;
        decode(resp)
    }

    /// Fetch a project by its opaque id.
    pub fn get_project(&self, project_id: &str) -> Result<Project, ClientError> {
        let endpoint = format!("/projects/{}", project_id);
        let url = format!("{}{}", self.base_url, endpoint);
        let rb = self.authed(self.http.get(&url));
        let resp = error_for_status(self.send("GET", &endpoint, rb)?)?;
        decode(resp)
    }

    /// Update a sketch (partial or full payload).
    pub fn update_sketch(
        &self,
        project_id: &str,
        updates: &SketchUpdate,
    ) -> Result<Project, ClientError> {
        let endpoint = format!("/projects/{}", project_id);
        let url = format!("{}{}", self.base_url, endpoint);
        let rb = self.authed(self.http.put(&url)).json(updates);
        let resp = error_for_status(self.send("PUT", &endpoint, rb)?)?;
        decode(resp)
    }

    /// Delete a sketch.
    pub fn delete_sketch(&self, project_id: &str) -> Result<bool, ClientError> {
        let endpoint = format!("/projects/{}", project_id);
        let url = format!("{}{}", self.base_url, endpoint);
        let rb = self.authed(self.http.delete(&url));
        error_for_status(self.send("DELETE", &endpoint, rb)?)?;
        Ok(true)
    }

    /// List a user's public sketches, in the order the server returned
    /// them. Public endpoint: dispatched without any auth artifacts.
    pub fn list_user_sketches(&self, username: &str) -> Result<Vec<SketchSummary>, ClientError> {
        let endpoint = format!("/{}/sketches", username);
        let url = format!("{}{}", self.base_url, endpoint);
        let resp = error_for_status(self.send("GET", &endpoint, self.public.get(&url))?)?;
        decode(resp)
    }

    // ── Internal helpers ────────────────────────────────────────────

    /// Attach the Authorization header (token mode). Cookie-mode auth
    /// rides on the client's cookie jar. With no credentials, the first
    /// privileged call surfaces a warning through the observer.
    fn authed(
        &self,
        rb: reqwest::blocking::RequestBuilder,
    ) -> reqwest::blocking::RequestBuilder {
        match &self.auth_header {
            Some(value) => rb.header(header::AUTHORIZATION, value.clone()),
            None => {
                if self.credentials.is_none() && !self.warned_unauthenticated.get() {
                    self.observer
                        .on_warning("no credentials configured; privileged calls will fail");
                    self.warned_unauthenticated.set(true);
                }
                rb
            }
        }
    }

    /// Dispatch one request with observer framing: one line before, one
    /// line after. Does not interpret the status code.
    fn send(
        &self,
        method: &str,
        endpoint: &str,
        rb: reqwest::blocking::RequestBuilder,
    ) -> Result<reqwest::blocking::Response, ClientError> {
        self.observer.on_request(method, endpoint);
        match rb.send() {
            Ok(resp) => {
                let status = resp.status();
                self.observer
                    .on_response(status.as_u16(), status.canonical_reason().unwrap_or(""));
                Ok(resp)
            }
            Err(e) => {
                let detail = e.to_string();
                self.observer.on_transport_error(&detail);
                Err(ClientError::Network(detail))
            }
        }
    }
}

// ── Free functions ──────────────────────────────────────────────────

/// `Basic base64(username:token)` per RFC 7617.
fn basic_auth_value(username: &str, access_token: &str) -> String {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    format!(
        "Basic {}",
        STANDARD.encode(format!("{}:{}", username, access_token))
    )
}

/// Map a non-2xx response to [`ClientError::Http`], preserving the status
/// code, the canonical reason, and whatever the server said.
fn error_for_status(
    resp: reqwest::blocking::Response,
) -> Result<reqwest::blocking::Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let reason = status.canonical_reason().unwrap_or("").to_string();
    let body = resp.text().unwrap_or_default();
    let body = body.trim();
    let detail = if body.is_empty() {
        reason
    } else if reason.is_empty() {
        body.to_string()
    } else {
        format!("{}: {}", reason, body)
    };
    Err(ClientError::Http(status.as_u16(), detail))
}

fn decode<T: serde::de::DeserializeOwned>(
    resp: reqwest::blocking::Response,
) -> Result<T, ClientError> {
    resp.json::<T>().map_err(|e| ClientError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use std::sync::Mutex;

    fn cookie_client(base_url: &str) -> EditorClient {
        EditorClient::new(ClientConfig {
            base_url: base_url.to_string(),
            credentials: Credentials::Cookie("abc123".into()),
        })
        .unwrap()
    }

    fn token_client(base_url: &str) -> EditorClient {
        EditorClient::new(ClientConfig {
            base_url: base_url.to_string(),
            credentials: Credentials::Token {
                username: "alice".into(),
                access_token: "tok123".into(),
            },
        })
        .unwrap()
    }

    fn anon_client(base_url: &str) -> EditorClient {
        EditorClient::new(ClientConfig {
            base_url: base_url.to_string(),
            credentials: Credentials::None,
        })
        .unwrap()
    }

    fn sample_payload() -> SketchPayload {
        SketchPayload {
            name: "Wire Test".into(),
            files: vec![SketchFile {
                name: "sketch.js".into(),
                content: "function setup() {}".into(),
                file_type: "file".into(),
            }],
        }
    }

    fn project_json(id: &str, name: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "name": name,
            "owner": { "username": "alice" },
            "createdAt": "2026-08-01T12:00:00.000Z",
            "updatedAt": "2026-08-01T12:00:00.000Z",
        })
    }

    /// Observer that records every hook invocation in order.
    #[derive(Default)]
    struct Recorder(std::sync::Arc<Mutex<Vec<String>>>);

    impl RequestObserver for Recorder {
        fn on_request(&self, method: &str, endpoint: &str) {
            self.0.lock().unwrap().push(format!("req {} {}", method, endpoint));
        }
        fn on_response(&self, status: u16, reason: &str) {
            self.0.lock().unwrap().push(format!("resp {} {}", status, reason));
        }
        fn on_transport_error(&self, detail: &str) {
            self.0.lock().unwrap().push(format!("fail {}", detail));
        }
        fn on_warning(&self, message: &str) {
            self.0.lock().unwrap().push(format!("warn {}", message));
        }
    }

    // ── Header construction ─────────────────────────────────────────

    #[test]
    fn test_basic_auth_value() {
        // base64("alice:tok123")
        assert_eq!(basic_auth_value("alice", "tok123"), "Basic YWxpY2U6dG9rMTIz");
    }

    #[test]
    fn test_token_mode_sets_authorization() {
        let client = token_client("https://editor.p5js.org/api");
        let req = client
            .authed(client.http.get("https://editor.p5js.org/api/projects"))
            .build()
            .unwrap();
        let value = req.headers().get(header::AUTHORIZATION).unwrap();
        assert_eq!(value.to_str().unwrap(), "Basic YWxpY2U6dG9rMTIz");
    }

    #[test]
    fn test_cookie_mode_sets_no_authorization() {
        let client = cookie_client("https://editor.p5js.org/api");
        let req = client
            .authed(client.http.get("https://editor.p5js.org/api/projects"))
            .build()
            .unwrap();
        assert!(req.headers().get(header::AUTHORIZATION).is_none());
    }

    #[test]
    fn test_anon_mode_sets_no_authorization_and_warns_once() {
        let lines = std::sync::Arc::new(Mutex::new(Vec::new()));
        let client = anon_client("https://editor.p5js.org/api")
            .with_observer(Box::new(Recorder(lines.clone())));

        let req = client
            .authed(client.http.get("https://editor.p5js.org/api/projects"))
            .build()
            .unwrap();
        assert!(req.headers().get(header::AUTHORIZATION).is_none());

        // Second privileged call does not repeat the warning
        let _ = client.authed(client.http.get("https://editor.p5js.org/api/projects"));

        let lines = lines.lock().unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("warn no credentials configured"));
    }

    #[test]
    fn test_public_client_has_no_auth_header() {
        // The listing endpoint goes through `public`, which never carries
        // auth artifacts regardless of the configured mode.
        let client = token_client("https://editor.p5js.org/api");
        let req = client
            .public
            .get("https://editor.p5js.org/api/alice/sketches")
            .build()
            .unwrap();
        assert!(req.headers().get(header::AUTHORIZATION).is_none());
        assert!(req.headers().get(header::COOKIE).is_none());
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        let err = EditorClient::new(ClientConfig {
            base_url: "not a url".into(),
            credentials: Credentials::Cookie("abc".into()),
        })
        .unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    // ── Wire behavior (httpmock) ────────────────────────────────────

    #[test]
    fn test_create_sketch_token_auth() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/projects")
                .header("authorization", "Basic YWxpY2U6dG9rMTIz")
                .header("content-type", "application/json")
                .json_body_includes(r#"{ "name": "Wire Test" }"#);
            then.status(200)
                .header("content-type", "application/json")
                .json_body(project_json("p123", "Wire Test"));
        });

        let client = token_client(&server.base_url());
        let project = client.create_sketch(&sample_payload()).unwrap();

        mock.assert();
        assert_eq!(project.id, "p123");
        assert_eq!(project.name, "Wire Test");
        assert_eq!(project.owner_username(), Some("alice"));
    }

    #[test]
    fn test_create_sketch_sends_session_cookie() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/projects")
                .header("cookie", "connect.sid=abc123");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(project_json("p1", "Wire Test"));
        });

        let client = cookie_client(&server.base_url());
        client.create_sketch(&sample_payload()).unwrap();

        mock.assert();
    }

    #[test]
    fn test_create_sketch_server_rejection_surfaces() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/projects");
            then.status(422)
                .header("content-type", "application/json")
                .json_body(serde_json::json!({ "message": "Sketch name is required" }));
        });

        let client = cookie_client(&server.base_url());
        let invalid = SketchPayload {
            name: String::new(),
            files: vec![],
        };
        let err = client.create_sketch(&invalid).unwrap_err();

        match err {
            ClientError::Http(422, msg) => {
                assert!(msg.contains("Unprocessable Entity"), "msg: {}", msg);
                assert!(msg.contains("Sketch name is required"), "msg: {}", msg);
            }
            other => panic!("expected Http(422, _), got {:?}", other),
        }
    }

    #[test]
    fn test_get_project_not_found_preserves_status_and_reason() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/projects/missing");
            then.status(404)
                .header("content-type", "application/json")
                .json_body(serde_json::json!({ "message": "Project not found" }));
        });

        let client = cookie_client(&server.base_url());
        let err = client.get_project("missing").unwrap_err();

        match err {
            ClientError::Http(404, msg) => {
                assert!(msg.contains("Not Found"), "msg: {}", msg);
                assert!(msg.contains("Project not found"), "msg: {}", msg);
            }
            other => panic!("expected Http(404, _), got {:?}", other),
        }
    }

    #[test]
    fn test_check_access_granted() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/auth/access-check");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(serde_json::json!({ "success": true }));
        });

        let client = cookie_client(&server.base_url());
        assert_eq!(client.check_access().unwrap(), AccessOutcome::Granted);
    }

    #[test]
    fn test_check_access_endpoint_absent_is_unknown() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/auth/access-check");
            then.status(404);
        });

        let client = cookie_client(&server.base_url());
        // 404 is "endpoint absent", not a failure
        assert_eq!(client.check_access().unwrap(), AccessOutcome::Unknown);
    }

    #[test]
    fn test_check_access_rejected_is_denied_not_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/auth/access-check");
            then.status(401);
        });

        let client = cookie_client(&server.base_url());
        assert_eq!(client.check_access().unwrap(), AccessOutcome::Denied);
    }

    #[test]
    fn test_update_sketch_partial_body() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(PUT)
                .path("/projects/p123")
                // `files` must be omitted entirely, not sent as null
                .json_body(serde_json::json!({ "name": "Renamed" }));
            then.status(200)
                .header("content-type", "application/json")
                .json_body(project_json("p123", "Renamed"));
        });

        let client = cookie_client(&server.base_url());
        let updates = SketchUpdate {
            name: Some("Renamed".into()),
            files: None,
        };
        let project = client.update_sketch("p123", &updates).unwrap();

        mock.assert();
        assert_eq!(project.name, "Renamed");
    }

    #[test]
    fn test_delete_sketch() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(DELETE).path("/projects/p123");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(serde_json::json!({ "success": true }));
        });

        let client = cookie_client(&server.base_url());
        assert!(client.delete_sketch("p123").unwrap());
        mock.assert();
    }

    #[test]
    fn test_list_user_sketches_preserves_server_order() {
        let server = MockServer::start();
        let listing: Vec<serde_json::Value> = ["s3", "s1", "s7", "s2", "s9", "s5", "s4"]
            .iter()
            .map(|id| {
                serde_json::json!({
                    "id": id,
                    "name": format!("Sketch {}", id),
                    "updatedAt": "2026-08-01T12:00:00.000Z",
                })
            })
            .collect();
        server.mock(|when, then| {
            when.method(GET).path("/alice/sketches");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(serde_json::json!(listing));
        });

        let client = cookie_client(&server.base_url());
        let sketches = client.list_user_sketches("alice").unwrap();

        let ids: Vec<&str> = sketches.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["s3", "s1", "s7", "s2", "s9", "s5", "s4"]);
    }

    #[test]
    fn test_transport_error_is_network() {
        let lines = std::sync::Arc::new(Mutex::new(Vec::new()));
        // Nothing listens on port 1
        let client =
            cookie_client("http://127.0.0.1:1").with_observer(Box::new(Recorder(lines.clone())));

        let err = client.create_sketch(&sample_payload()).unwrap_err();
        assert!(matches!(err, ClientError::Network(_)));

        let lines = lines.lock().unwrap();
        assert_eq!(lines[0], "req POST /projects");
        assert!(lines[1].starts_with("fail "), "lines: {:?}", lines);
    }

    #[test]
    fn test_observer_framing_one_line_before_one_after() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/auth/access-check");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(serde_json::json!({ "success": true }));
        });

        let lines = std::sync::Arc::new(Mutex::new(Vec::new()));
        let client =
            cookie_client(&server.base_url()).with_observer(Box::new(Recorder(lines.clone())));
        client.check_access().unwrap();

        let lines = lines.lock().unwrap();
        let got: Vec<&str> = lines.iter().map(String::as_str).collect();
        assert_eq!(got, vec!["req GET /auth/access-check", "resp 200 OK"]);
    }

    // ── Wire type parsing ───────────────────────────────────────────

    #[test]
    fn test_project_owner_under_owner_key() {
        let project: Project = serde_json::from_str(
            r#"{"id":"p1","name":"n","owner":{"username":"alice"}}"#,
        )
        .unwrap();
        assert_eq!(project.owner_username(), Some("alice"));
    }

    #[test]
    fn test_project_owner_under_user_key() {
        let project: Project =
            serde_json::from_str(r#"{"id":"p1","name":"n","user":{"username":"bob"}}"#).unwrap();
        assert_eq!(project.owner_username(), Some("bob"));
    }

    #[test]
    fn test_project_owner_as_bare_string() {
        let project: Project =
            serde_json::from_str(r#"{"id":"p1","name":"n","owner":"carol"}"#).unwrap();
        assert_eq!(project.owner_username(), Some("carol"));
    }

    #[test]
    fn test_project_owner_missing() {
        let project: Project = serde_json::from_str(r#"{"id":"p1","name":"n"}"#).unwrap();
        assert_eq!(project.owner_username(), None);
        assert!(project.created_at.is_none());
    }

    #[test]
    fn test_sketch_file_serializes_file_type_key() {
        let file = SketchFile {
            name: "sketch.js".into(),
            content: "// x".into(),
            file_type: "file".into(),
        };
        let json = serde_json::to_value(&file).unwrap();
        assert_eq!(json["fileType"], "file");
        assert!(json.get("file_type").is_none());
    }
}
