// Event log and dashboard statistics endpoints

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{DashboardStats, SensorEvent};

impl ApiClient {
    /// List all events, newest first (backend ordering is preserved).
    ///
    /// `GET /api/events`
    pub async fn list_events(&self) -> Result<Vec<SensorEvent>, Error> {
        self.get("events").await
    }

    /// List only events the backend classified as critical.
    ///
    /// `GET /api/events/critical`
    pub async fn critical_events(&self) -> Result<Vec<SensorEvent>, Error> {
        self.get("events/critical").await
    }

    /// Fetch the dashboard counters.
    ///
    /// `GET /api/events/stats`
    pub async fn event_stats(&self) -> Result<DashboardStats, Error> {
        self.get("events/stats").await
    }

    /// Mark an event as processed.
    ///
    /// `PATCH /api/events/{id}/process` — returns the updated event.
    pub async fn mark_processed(&self, event_id: i64) -> Result<SensorEvent, Error> {
        debug!(event_id, "marking event processed");
        self.patch(&format!("events/{event_id}/process")).await
    }
}
