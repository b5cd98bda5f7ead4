//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use vigil_core::CoreError;

/// Exit codes for process termination.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the backend: {reason}")]
    #[diagnostic(
        code(vigil::connection_failed),
        help(
            "Check that the backend is running and accessible.\n\
             Self-signed certificate? Try --insecure (-k)."
        )
    )]
    ConnectionFailed { reason: String },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Invalid credentials")]
    #[diagnostic(
        code(vigil::auth_failed),
        help("Verify the username and password for profile '{profile}'.")
    )]
    AuthFailed { profile: String },

    #[error("No password configured for profile '{profile}'")]
    #[diagnostic(
        code(vigil::no_credentials),
        help(
            "Store one with: vigil config set-password --profile {profile}\n\
             Or set the VIGIL_PASSWORD environment variable."
        )
    )]
    NoCredentials { profile: String },

    // ── Backend ──────────────────────────────────────────────────────

    #[error("Backend rejected the request (HTTP {status})")]
    #[diagnostic(code(vigil::backend))]
    Backend { status: u16 },

    #[error("Event {event_id} not found")]
    #[diagnostic(code(vigil::not_found), help("Run: vigil events list"))]
    EventNotFound { event_id: i64 },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(vigil::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(vigil::profile_not_found),
        help("Create one with: vigil config init")
    )]
    ProfileNotFound { name: String },

    #[error("No backend configured")]
    #[diagnostic(
        code(vigil::no_config),
        help(
            "Create a config with: vigil config init\n\
             Or pass --server and --username directly.\n\
             Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(vigil::config))]
    Config(#[from] vigil_config::ConfigError),

    // ── IO / Serialization ───────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(vigil::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    #[diagnostic(code(vigil::internal))]
    Internal(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::EventNotFound { .. } | Self::ProfileNotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotAuthenticated | CoreError::InvalidCredentials => Self::AuthFailed {
                profile: "current".into(),
            },

            CoreError::Backend { status } => Self::Backend { status },

            CoreError::Connection { reason } => Self::ConnectionFailed { reason },

            CoreError::Config { message } => Self::Validation {
                field: "config".into(),
                reason: message,
            },

            CoreError::Internal(message) => Self::Internal(message),
        }
    }
}
