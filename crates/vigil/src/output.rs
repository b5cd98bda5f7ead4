//! Plain-text rendering of the display model.

use owo_colors::OwoColorize;

use vigil_core::view::{EventRow, RenderModel, SensorCard};
use vigil_core::{DashboardStats, Notification, SensorKind, Severity};

pub fn kind_label(kind: SensorKind) -> &'static str {
    match kind {
        SensorKind::Movement => "Movement",
        SensorKind::Temperature => "Temperature",
        SensorKind::Access => "Access",
    }
}

pub fn print_stats(stats: &DashboardStats) {
    println!("{}", "Dashboard".bold());
    println!(
        "  sensors: {} total, {} active",
        stats.total_sensors,
        stats.active_sensors.to_string().green()
    );
    let unprocessed = stats.unprocessed_critical_events;
    let unprocessed = if unprocessed > 0 {
        unprocessed.to_string().red().bold().to_string()
    } else {
        unprocessed.to_string().green().to_string()
    };
    println!(
        "  events:  {} total, {unprocessed} critical unprocessed",
        stats.total_events
    );
}

pub fn print_sensor_groups(model: &RenderModel) {
    if model.groups.is_empty() {
        println!("{}", "no sensors registered".dimmed());
        return;
    }
    for group in &model.groups {
        println!("{}", kind_label(group.kind).bold());
        for card in &group.sensors {
            print_sensor_card(card);
        }
    }
}

fn print_sensor_card(card: &SensorCard) {
    let badge = if card.active {
        card.status_badge.green().to_string()
    } else {
        card.status_badge.red().to_string()
    };
    println!(
        "  {:<12} {:<24} {badge:<10} last check: {}",
        card.sensor_id,
        card.location,
        card.last_check.dimmed()
    );
}

pub fn print_events(rows: &[EventRow]) {
    if rows.is_empty() {
        println!("{}", "no events".dimmed());
        return;
    }
    for row in rows {
        print_event_row(row);
    }
}

fn print_event_row(row: &EventRow) {
    let badge = if row.critical {
        row.badge.red().bold().to_string()
    } else {
        row.badge.dimmed().to_string()
    };
    println!(
        "  {} {badge:<10} [{}] {} -- {}",
        row.detected_at.dimmed(),
        kind_label(row.sensor_kind),
        row.location,
        row.description
    );
}

pub fn print_notification(n: &Notification) {
    let tag = match n.severity {
        Severity::Success => "ok".green().to_string(),
        Severity::Warning => "warn".yellow().to_string(),
        Severity::Error => "error".red().bold().to_string(),
        Severity::Info => "info".dimmed().to_string(),
    };
    println!("[{tag}] {}", n.message);
}
