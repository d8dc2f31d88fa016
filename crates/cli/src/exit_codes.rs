//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract — scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain    | Description                              |
//! |---------|-----------|------------------------------------------|
//! | 0       | Universal | Success                                  |
//! | 1       | Universal | General error (unspecified)              |
//! | 2       | Universal | CLI usage error (bad args)               |
//! | 10-19   | config    | Credential configuration errors          |
//! | 40-49   | api       | Editor API errors                        |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, conflicting credential modes.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Config (10-19)
// =============================================================================

/// Placeholder credentials from `sketchprobe init` left unset.
/// Raised before any network call.
pub const EXIT_CONFIG_PLACEHOLDER: u8 = 10;

/// No credentials resolved for a privileged command.
pub const EXIT_CONFIG_MISSING: u8 = 11;

// =============================================================================
// Editor API (40-49)
// =============================================================================

/// Credentials rejected by the editor API (401/403).
pub const EXIT_API_AUTH: u8 = 40;

/// Transport failure or unexpected non-2xx from the editor API.
pub const EXIT_API_NETWORK: u8 = 42;

/// Server rejected a payload (400/422).
pub const EXIT_API_VALIDATION: u8 = 43;
