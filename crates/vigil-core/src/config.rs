// ── Runtime connection configuration ──
//
// Describes *how* to reach the backend and how often to poll it.
// Never touches disk — the binary (via vigil-config) constructs a
// `MonitorConfig` and hands it in.

use std::time::Duration;

use url::Url;

/// Fast poll cycle period: dashboard stats + events.
pub const FAST_POLL_PERIOD: Duration = Duration::from_secs(5);

/// Sampling cycle period: sensor inventory refresh.
pub const SAMPLE_POLL_PERIOD: Duration = Duration::from_secs(30);

/// Configuration for a single backend connection.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Backend root URL (e.g. `https://vigil.local:8443`).
    pub base_url: Url,
    /// Request timeout.
    pub timeout: Duration,
    /// Accept self-signed certificates (local deployments).
    pub accept_invalid_certs: bool,
    /// Period of the fast cycle (stats + events).
    pub fast_poll: Duration,
    /// Period of the sampling cycle (sensor inventory), `None` to disable.
    pub sample_poll: Option<Duration>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            base_url: "https://localhost:8443".parse().expect("default URL"),
            timeout: Duration::from_secs(10),
            accept_invalid_certs: false,
            fast_poll: FAST_POLL_PERIOD,
            sample_poll: Some(SAMPLE_POLL_PERIOD),
        }
    }
}
