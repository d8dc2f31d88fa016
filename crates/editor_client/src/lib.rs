//! Editor API client — shared between the smoke harness and CLI.
//!
//! This crate is the single source of truth for the p5.js Web Editor wire
//! contract: credentials, the access-check probe, sketch CRUD, and the
//! public per-user listing.
//!
//! No GUI concepts. No retries. No console output — wire narration goes
//! through [`RequestObserver`].

mod auth;
mod client;
pub mod templates;

pub use auth::{
    auth_file_path, delete_auth, load_auth, save_auth, AuthConfig, Credentials, CredentialsError,
    DEFAULT_API_BASE, PLACEHOLDER_COOKIE, PLACEHOLDER_TOKEN, PLACEHOLDER_USERNAME,
};
pub use client::{
    AccessOutcome, ClientConfig, ClientError, EditorClient, Owner, Project, RequestObserver,
    SketchFile, SketchPayload, SketchSummary, SketchUpdate, SESSION_COOKIE_NAME, USER_AGENT,
};
