// ── Wire types for the Vigil backend API ──
//
// All timestamps are RFC 3339 UTC. Field names follow the backend's
// camelCase JSON convention.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kind of sensor, as registered in the backend inventory.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum SensorKind {
    Movement,
    Temperature,
    Access,
}

/// A sensor as reported by the inventory endpoint.
///
/// Immutable snapshot — the client never mutates sensors, it replaces
/// the whole list on each refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sensor {
    pub sensor_id: String,
    #[serde(rename = "type")]
    pub kind: SensorKind,
    pub location: String,
    pub active: bool,
    #[serde(default)]
    pub last_check: Option<DateTime<Utc>>,
}

/// An event detected by a sensor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorEvent {
    pub id: i64,
    pub event_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub value: Option<f64>,
    pub critical: bool,
    #[serde(default)]
    pub processed: bool,
    pub detected_at: DateTime<Utc>,
    pub sensor: Sensor,
}

/// Dashboard counters, fully replaced on each poll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_sensors: u64,
    pub active_sensors: u64,
    pub total_events: u64,
    pub unprocessed_critical_events: u64,
}

/// A simulated sensor reading, dispatched to the backend for processing.
#[derive(Debug, Clone, PartialEq)]
pub enum Reading {
    Movement(bool),
    Temperature(f64),
    Access { user_id: String, authorized: bool },
}

impl Reading {
    /// The sensor kind this reading targets.
    pub fn kind(&self) -> SensorKind {
        match self {
            Self::Movement(_) => SensorKind::Movement,
            Self::Temperature(_) => SensorKind::Temperature,
            Self::Access { .. } => SensorKind::Access,
        }
    }

    /// The `data` payload in the backend's expected shape.
    pub(crate) fn payload(&self) -> serde_json::Value {
        match self {
            Self::Movement(detected) => serde_json::json!(detected),
            Self::Temperature(celsius) => serde_json::json!(celsius),
            Self::Access {
                user_id,
                authorized,
            } => serde_json::json!({ "userId": user_id, "authorized": authorized }),
        }
    }
}

/// One entry of a heterogeneous batch submission.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReading {
    pub sensor_id: String,
    pub reading: Reading,
}

/// Generic acknowledgment returned by processing endpoints.
///
/// Non-JSON success responses are normalized into this shape by the
/// client (`{"success": true, "message": <raw body>}`), so callers can
/// treat both uniformly.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ack {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub sensors_processed: Option<u32>,
}

/// Role assigned to an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    SecurityOfficer,
    Viewer,
}

/// Successful login exchange response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub identity: String,
    #[serde(default)]
    pub full_name: Option<String>,
    pub role: Role,
    pub credential_token: String,
}
