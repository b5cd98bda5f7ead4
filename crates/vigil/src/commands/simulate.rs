//! `vigil simulate` -- dispatch simulated sensor readings.

use std::path::Path;

use serde::Deserialize;

use vigil_core::monitor::{BATCH_REFRESH_DELAY, READING_REFRESH_DELAY};
use vigil_core::{BatchReading, Monitor, Reading, SensorKind};

use crate::cli::{GlobalOpts, SimulateArgs, SimulateCommand};
use crate::error::CliError;
use crate::{output, session};

pub async fn handle(args: SimulateArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let monitor = session::connect(global).await?;

    let result = run(&monitor, args).await;
    monitor.logout().await;
    result
}

async fn run(monitor: &Monitor, args: SimulateArgs) -> Result<(), CliError> {
    let delay = match args.command {
        SimulateCommand::Movement { sensor_id, clear } => {
            monitor.simulate(&sensor_id, Reading::Movement(!clear)).await?;
            READING_REFRESH_DELAY
        }

        SimulateCommand::Temperature { sensor_id, value } => {
            monitor.simulate(&sensor_id, Reading::Temperature(value)).await?;
            READING_REFRESH_DELAY
        }

        SimulateCommand::Access {
            sensor_id,
            user,
            denied,
        } => {
            monitor
                .simulate(
                    &sensor_id,
                    Reading::Access {
                        user_id: user,
                        authorized: !denied,
                    },
                )
                .await?;
            READING_REFRESH_DELAY
        }

        SimulateCommand::Batch { from_file } => {
            let entries = read_batch_file(&from_file)?;
            monitor.simulate_batch(entries).await?;
            BATCH_REFRESH_DELAY
        }
    };

    let mut seen = std::collections::HashSet::new();
    for n in monitor.notifications_snapshot().iter() {
        seen.insert(n.id);
        output::print_notification(n);
    }

    // Wait out the deferred refresh so the printed counters reflect the
    // dispatched readings.
    tokio::time::sleep(delay + std::time::Duration::from_millis(200)).await;
    for n in monitor.notifications_snapshot().iter() {
        if seen.insert(n.id) {
            output::print_notification(n);
        }
    }
    output::print_stats(&monitor.stats());
    Ok(())
}

// ── Batch file parsing ──────────────────────────────────────────────

/// File shape for one batch entry: `{sensorId, type, data}`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatchEntryFile {
    sensor_id: String,
    #[serde(rename = "type")]
    kind: SensorKind,
    data: serde_json::Value,
}

fn read_batch_file(path: &Path) -> Result<Vec<BatchReading>, CliError> {
    let contents = std::fs::read_to_string(path)?;
    let entries: Vec<BatchEntryFile> =
        serde_json::from_str(&contents).map_err(|e| CliError::Validation {
            field: "from-file".into(),
            reason: format!("invalid JSON: {e}"),
        })?;

    entries.into_iter().map(entry_to_reading).collect()
}

/// Access entry payload: `{userId, authorized}`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccessData {
    user_id: String,
    authorized: bool,
}

fn entry_to_reading(entry: BatchEntryFile) -> Result<BatchReading, CliError> {
    let invalid = |reason: String| CliError::Validation {
        field: "data".into(),
        reason,
    };

    let reading = match entry.kind {
        SensorKind::Movement => Reading::Movement(entry.data.as_bool().ok_or_else(|| {
            invalid(format!("movement data must be a boolean, got {}", entry.data))
        })?),

        SensorKind::Temperature => Reading::Temperature(entry.data.as_f64().ok_or_else(|| {
            invalid(format!("temperature data must be a number, got {}", entry.data))
        })?),

        SensorKind::Access => {
            let data: AccessData = serde_json::from_value(entry.data)
                .map_err(|e| invalid(format!("access data must be {{userId, authorized}}: {e}")))?;
            Reading::Access {
                user_id: data.user_id,
                authorized: data.authorized,
            }
        }
    };

    Ok(BatchReading {
        sensor_id: entry.sensor_id,
        reading,
    })
}
