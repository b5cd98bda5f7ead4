use thiserror::Error;

/// Top-level error type for the `vigil-api` crate.
///
/// Every failure mode of the transport layer is represented here;
/// `vigil-core` maps these into user-facing diagnostics. The client
/// never panics across its boundary — callers always get a typed
/// `Result`.
#[derive(Debug, Error)]
pub enum Error {
    /// No credential installed, or the backend rejected it (HTTP 401).
    ///
    /// When no credential is present the client fails before any
    /// network I/O is attempted.
    #[error("Not authenticated -- login required")]
    Unauthenticated,

    /// The backend rejected the request with a non-success status.
    #[error("Backend rejected request (HTTP {status})")]
    Http { status: u16 },

    /// HTTP transport failure (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Payload had an unexpected shape, with the raw body for debugging.
    #[error("Unexpected payload: {message}")]
    Decode { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error means the session is no longer
    /// valid and the caller should force a logout.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Unauthenticated | Self::Http { status: 401 })
    }
}
