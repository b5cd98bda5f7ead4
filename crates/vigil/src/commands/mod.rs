//! Command dispatch: bridges CLI args -> Monitor operations -> output.

pub mod config_cmd;
pub mod events;
pub mod sensors;
pub mod simulate;
pub mod status;
pub mod watch;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Status => status::handle(global).await,
        Command::Sensors(args) => sensors::handle(args, global).await,
        Command::Events(args) => events::handle(args, global).await,
        Command::Simulate(args) => simulate::handle(args, global).await,
        Command::Watch(args) => watch::handle(args, global).await,
        // Config is handled before dispatch
        Command::Config(_) => unreachable!(),
    }
}
