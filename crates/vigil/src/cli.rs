//! Argument definitions for the `vigil` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use vigil_core::SensorKind;

#[derive(Debug, Parser)]
#[command(
    name = "vigil",
    version,
    about = "Sensor monitoring client for the Vigil security backend",
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Profile name from the config file.
    #[arg(short, long, global = true, env = "VIGIL_PROFILE")]
    pub profile: Option<String>,

    /// Backend root URL (overrides the profile).
    #[arg(long, global = true, env = "VIGIL_SERVER")]
    pub server: Option<String>,

    /// Login username (overrides the profile).
    #[arg(short, long, global = true, env = "VIGIL_USERNAME")]
    pub username: Option<String>,

    /// Accept self-signed TLS certificates.
    #[arg(short = 'k', long, global = true)]
    pub insecure: bool,

    /// Request timeout in seconds.
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show dashboard counters for the backend.
    Status,

    /// Sensor inventory.
    Sensors(SensorsArgs),

    /// Detected events.
    Events(EventsArgs),

    /// Dispatch simulated sensor readings.
    Simulate(SimulateArgs),

    /// Follow the dashboard live, refreshing on the poll cycle.
    Watch(WatchArgs),

    /// Manage configuration profiles.
    Config(ConfigArgs),
}

// ── Sensors ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SensorsArgs {
    /// Only show sensors of one kind (movement, temperature, access).
    #[arg(long)]
    pub kind: Option<SensorKind>,
}

// ── Events ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct EventsArgs {
    #[command(subcommand)]
    pub command: EventsCommand,
}

#[derive(Debug, Subcommand)]
pub enum EventsCommand {
    /// List detected events, newest first.
    List {
        /// Only show critical events.
        #[arg(long, conflicts_with = "kind")]
        critical: bool,

        /// Only show events from sensors of one kind.
        #[arg(long)]
        kind: Option<SensorKind>,
    },

    /// Mark an event as processed.
    Process {
        /// Event id.
        event_id: i64,
    },
}

// ── Simulate ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SimulateArgs {
    #[command(subcommand)]
    pub command: SimulateCommand,
}

#[derive(Debug, Subcommand)]
pub enum SimulateCommand {
    /// Report a movement detection.
    Movement {
        /// Target sensor id.
        sensor_id: String,

        /// Report "no movement" instead of a detection.
        #[arg(long)]
        clear: bool,
    },

    /// Report a temperature reading in degrees Celsius.
    Temperature {
        /// Target sensor id.
        sensor_id: String,

        /// Temperature value.
        value: f64,
    },

    /// Report an access attempt.
    Access {
        /// Target sensor id.
        sensor_id: String,

        /// Badge or user id attempting access.
        #[arg(long)]
        user: String,

        /// Report the attempt as denied.
        #[arg(long)]
        denied: bool,
    },

    /// Submit a batch of readings from a JSON file.
    Batch {
        /// Path to a JSON array of `{sensorId, type, data}` entries.
        #[arg(long, value_name = "FILE")]
        from_file: PathBuf,
    },
}

// ── Watch ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Only show critical events.
    #[arg(long, conflicts_with = "kind")]
    pub critical: bool,

    /// Only show events from sensors of one kind.
    #[arg(long)]
    pub kind: Option<SensorKind>,
}

// ── Config ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Write a starter config file with a sample profile.
    Init,

    /// Print the loaded configuration (passwords redacted).
    Show,

    /// Print the config file path.
    Path,

    /// Store a profile's password in the system keyring.
    SetPassword,
}
