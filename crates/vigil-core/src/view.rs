// ── Render model derivation ──
//
// Pure projection of store state into display-ready data for the
// rendering sink. No network or timer side effects here.

use std::sync::Arc;

use vigil_api::types::{DashboardStats, Sensor, SensorEvent, SensorKind};

use crate::notify::Notification;

/// Display order of sensor groups.
const KIND_ORDER: [SensorKind; 3] = [
    SensorKind::Movement,
    SensorKind::Temperature,
    SensorKind::Access,
];

/// One sensor, display-ready.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorCard {
    pub sensor_id: String,
    pub location: String,
    pub active: bool,
    /// "active" / "inactive".
    pub status_badge: &'static str,
    /// Formatted last-check timestamp, or "not yet checked".
    pub last_check: String,
}

/// Sensors of one kind, in backend order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorGroup {
    pub kind: SensorKind,
    pub sensors: Vec<SensorCard>,
}

/// One event, display-ready, post-filter.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRow {
    pub event_type: String,
    pub description: String,
    pub detected_at: String,
    pub critical: bool,
    /// "critical" / "normal".
    pub badge: &'static str,
    pub sensor_kind: SensorKind,
    pub location: String,
}

/// The full display-ready projection handed to the rendering sink.
#[derive(Debug, Clone)]
pub struct RenderModel {
    pub groups: Vec<SensorGroup>,
    pub events: Vec<EventRow>,
    pub stats: DashboardStats,
    pub notifications: Vec<Arc<Notification>>,
}

impl RenderModel {
    /// Derive the render model from current snapshots. Pure.
    pub fn project(
        sensors: &[Sensor],
        events: &[SensorEvent],
        stats: DashboardStats,
        notifications: &[Arc<Notification>],
    ) -> Self {
        let groups = KIND_ORDER
            .iter()
            .filter_map(|&kind| {
                let cards: Vec<SensorCard> = sensors
                    .iter()
                    .filter(|s| s.kind == kind)
                    .map(sensor_card)
                    .collect();
                (!cards.is_empty()).then_some(SensorGroup {
                    kind,
                    sensors: cards,
                })
            })
            .collect();

        let events = events.iter().map(event_row).collect();

        Self {
            groups,
            events,
            stats,
            notifications: notifications.to_vec(),
        }
    }

    /// All sensor cards flattened in display order.
    pub fn sensor_cards(&self) -> impl Iterator<Item = &SensorCard> {
        self.groups.iter().flat_map(|g| g.sensors.iter())
    }
}

fn sensor_card(sensor: &Sensor) -> SensorCard {
    SensorCard {
        sensor_id: sensor.sensor_id.clone(),
        location: sensor.location.clone(),
        active: sensor.active,
        status_badge: if sensor.active { "active" } else { "inactive" },
        last_check: sensor.last_check.map_or_else(
            || "not yet checked".to_owned(),
            |t| t.format("%Y-%m-%d %H:%M:%S").to_string(),
        ),
    }
}

fn event_row(event: &SensorEvent) -> EventRow {
    EventRow {
        event_type: event.event_type.clone(),
        description: event.description.clone(),
        detected_at: event.detected_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        critical: event.critical,
        badge: if event.critical { "critical" } else { "normal" },
        sensor_kind: event.sensor.kind,
        location: event.sensor.location.clone(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sensor(id: &str, kind: SensorKind, active: bool) -> Sensor {
        Sensor {
            sensor_id: id.into(),
            kind,
            location: "Lab".into(),
            active,
            last_check: None,
        }
    }

    #[test]
    fn groups_by_kind_preserving_backend_order() {
        let sensors = vec![
            sensor("TEMP-001", SensorKind::Temperature, true),
            sensor("MOV-001", SensorKind::Movement, true),
            sensor("MOV-002", SensorKind::Movement, false),
        ];

        let model = RenderModel::project(&sensors, &[], DashboardStats::default(), &[]);

        assert_eq!(model.groups.len(), 2);
        assert_eq!(model.groups[0].kind, SensorKind::Movement);
        let ids: Vec<_> = model.groups[0]
            .sensors
            .iter()
            .map(|c| c.sensor_id.as_str())
            .collect();
        assert_eq!(ids, ["MOV-001", "MOV-002"]);
        assert_eq!(model.groups[1].kind, SensorKind::Temperature);
    }

    #[test]
    fn badges_and_missing_last_check() {
        let mut active = sensor("ACC-001", SensorKind::Access, true);
        active.last_check = Some("2026-08-25T10:15:30Z".parse().unwrap());
        let inactive = sensor("ACC-002", SensorKind::Access, false);

        let model =
            RenderModel::project(&[active, inactive], &[], DashboardStats::default(), &[]);

        let cards: Vec<_> = model.sensor_cards().collect();
        assert_eq!(cards[0].status_badge, "active");
        assert_eq!(cards[0].last_check, "2026-08-25 10:15:30");
        assert_eq!(cards[1].status_badge, "inactive");
        assert_eq!(cards[1].last_check, "not yet checked");
    }
}
