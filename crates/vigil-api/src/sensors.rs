// Sensor inventory and reading-dispatch endpoints

use serde::Serialize;
use serde_json::json;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{Ack, BatchReading, Reading, Sensor, SensorKind};

/// Wire shape for one batch entry: `{sensorId, type, data}`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchEntryWire<'a> {
    sensor_id: &'a str,
    #[serde(rename = "type")]
    kind: SensorKind,
    data: serde_json::Value,
}

impl ApiClient {
    /// List the full sensor inventory.
    ///
    /// `GET /api/sensors`
    pub async fn list_sensors(&self) -> Result<Vec<Sensor>, Error> {
        self.get("sensors").await
    }

    /// List sensors of a single kind.
    ///
    /// `GET /api/sensors/type/{kind}`
    pub async fn sensors_by_kind(&self, kind: SensorKind) -> Result<Vec<Sensor>, Error> {
        self.get(&format!("sensors/type/{kind}")).await
    }

    /// Dispatch one simulated reading for processing.
    ///
    /// `POST /api/sensors/{id}/process` with `{type, data}`. The
    /// backend processes asynchronously and acknowledges with 202.
    pub async fn process_reading(&self, sensor_id: &str, reading: &Reading) -> Result<Ack, Error> {
        debug!(sensor_id, kind = %reading.kind(), "dispatching reading");
        let body = json!({
            "type": reading.kind(),
            "data": reading.payload(),
        });
        self.post(&format!("sensors/{sensor_id}/process"), &body)
            .await
    }

    /// Dispatch a heterogeneous batch of readings as one request.
    ///
    /// `POST /api/sensors/process-batch` with `[{sensorId, type, data}]`.
    pub async fn process_batch(&self, entries: &[BatchReading]) -> Result<Ack, Error> {
        debug!(count = entries.len(), "dispatching batch");
        let wire: Vec<BatchEntryWire<'_>> = entries
            .iter()
            .map(|e| BatchEntryWire {
                sensor_id: &e.sensor_id,
                kind: e.reading.kind(),
                data: e.reading.payload(),
            })
            .collect();
        self.post("sensors/process-batch", &wire).await
    }
}
