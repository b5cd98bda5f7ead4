// vigil-core: Session-coherence layer between vigil-api and the rendering sink.
//
// Owns the session state machine, the recurring poll cycles bound to it,
// the view-state store with its staleness guard, the notification queue,
// and the command dispatcher for simulated readings.

pub mod config;
pub mod error;
pub mod monitor;
pub mod notify;
pub mod poll;
pub mod session;
pub mod store;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::MonitorConfig;
pub use error::CoreError;
pub use monitor::Monitor;
pub use notify::{Notification, NotificationQueue, Severity, NOTIFICATION_TTL};
pub use session::{Session, SessionState};
pub use store::{EventFilter, ViewStore};
pub use view::RenderModel;

// Re-export wire types at the crate root for ergonomics.
pub use vigil_api::types::{
    BatchReading, DashboardStats, Reading, Role, Sensor, SensorEvent, SensorKind,
};
