// ── View state store ──
//
// Holds the sensor, event, and stats snapshots the rendering sink
// consumes. Snapshots are replaced wholesale and broadcast via `watch`
// channels. Event application is guarded against stale responses: a
// snapshot fetched under a filter the user has since changed away from
// is discarded.

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use vigil_api::types::{DashboardStats, Sensor, SensorEvent, SensorKind};

/// The currently selected event filter.
///
/// `Kind` narrows the full `/events` payload client-side; `Critical`
/// maps to the dedicated backend endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EventFilter {
    #[default]
    All,
    Critical,
    Kind(SensorKind),
}

impl EventFilter {
    pub fn matches(&self, event: &SensorEvent) -> bool {
        match self {
            Self::All => true,
            Self::Critical => event.critical,
            Self::Kind(kind) => event.sensor.kind == *kind,
        }
    }
}

impl fmt::Display for EventFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Critical => write!(f, "critical"),
            Self::Kind(kind) => write!(f, "{kind}"),
        }
    }
}

/// Reactive store for backend-derived view state.
pub struct ViewStore {
    sensors: watch::Sender<Arc<Vec<Sensor>>>,
    events: watch::Sender<Arc<Vec<SensorEvent>>>,
    stats: watch::Sender<DashboardStats>,
    filter: watch::Sender<EventFilter>,
}

impl ViewStore {
    pub fn new() -> Self {
        let (sensors, _) = watch::channel(Arc::new(Vec::new()));
        let (events, _) = watch::channel(Arc::new(Vec::new()));
        let (stats, _) = watch::channel(DashboardStats::default());
        let (filter, _) = watch::channel(EventFilter::default());
        Self {
            sensors,
            events,
            stats,
            filter,
        }
    }

    // ── Snapshot application ─────────────────────────────────────────

    /// Replace the sensor snapshot wholesale.
    pub fn apply_sensors(&self, sensors: Vec<Sensor>) {
        self.sensors.send_modify(|snap| *snap = Arc::new(sensors));
    }

    /// Replace the event snapshot, but only if `ctx` still matches the
    /// currently selected filter. Returns `false` when the snapshot was
    /// discarded as stale.
    pub fn apply_events(&self, events: Vec<SensorEvent>, ctx: EventFilter) -> bool {
        if ctx != *self.filter.borrow() {
            debug!(%ctx, "discarding stale event snapshot");
            return false;
        }

        // Kind filters are narrowed client-side over the full payload;
        // backend ordering is preserved.
        let events = match ctx {
            EventFilter::Kind(_) => events.into_iter().filter(|e| ctx.matches(e)).collect(),
            _ => events,
        };

        self.events.send_modify(|snap| *snap = Arc::new(events));
        true
    }

    /// Replace the dashboard counters wholesale.
    pub fn apply_stats(&self, stats: DashboardStats) {
        self.stats.send_modify(|s| *s = stats);
    }

    /// Select a new filter. Returns `true` when the selection changed;
    /// the caller is expected to trigger an immediate re-fetch then.
    pub fn set_filter(&self, filter: EventFilter) -> bool {
        let changed = *self.filter.borrow() != filter;
        if changed {
            debug!(%filter, "filter changed");
            // `send` would drop the update when nobody subscribes yet.
            self.filter.send_replace(filter);
        }
        changed
    }

    // ── Reads ────────────────────────────────────────────────────────

    pub fn filter(&self) -> EventFilter {
        *self.filter.borrow()
    }

    pub fn sensors_snapshot(&self) -> Arc<Vec<Sensor>> {
        self.sensors.borrow().clone()
    }

    pub fn events_snapshot(&self) -> Arc<Vec<SensorEvent>> {
        self.events.borrow().clone()
    }

    pub fn stats(&self) -> DashboardStats {
        *self.stats.borrow()
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_sensors(&self) -> watch::Receiver<Arc<Vec<Sensor>>> {
        self.sensors.subscribe()
    }

    pub fn subscribe_events(&self) -> watch::Receiver<Arc<Vec<SensorEvent>>> {
        self.events.subscribe()
    }

    pub fn subscribe_stats(&self) -> watch::Receiver<DashboardStats> {
        self.stats.subscribe()
    }

    pub fn subscribe_filter(&self) -> watch::Receiver<EventFilter> {
        self.filter.subscribe()
    }
}

impl Default for ViewStore {
    fn default() -> Self {
        Self::new()
    }
}
