// ── Core error types ──
//
// User-facing errors from vigil-core. Consumers never see raw reqwest
// errors or JSON parse failures; the `From<vigil_api::Error>` impl
// translates transport-layer errors into domain variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Not authenticated -- login required")]
    NotAuthenticated,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Backend rejected the request (HTTP {status})")]
    Backend { status: u16 },

    #[error("Cannot reach backend: {reason}")]
    Connection { reason: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<vigil_api::Error> for CoreError {
    fn from(err: vigil_api::Error) -> Self {
        match err {
            vigil_api::Error::Unauthenticated => Self::NotAuthenticated,
            vigil_api::Error::Http { status } => Self::Backend { status },
            vigil_api::Error::Network(e) => Self::Connection {
                reason: e.to_string(),
            },
            vigil_api::Error::InvalidUrl(e) => Self::Config {
                message: format!("Invalid URL: {e}"),
            },
            vigil_api::Error::Decode { message, body: _ } => {
                Self::Internal(format!("Unexpected payload: {message}"))
            }
        }
    }
}
