//! `vigil events` -- event listing and processing.

use vigil_core::{CoreError, EventFilter, Monitor};

use crate::cli::{EventsArgs, EventsCommand, GlobalOpts};
use crate::error::CliError;
use crate::{output, session};

pub async fn handle(args: EventsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let monitor = session::connect(global).await?;

    let result = run(&monitor, args).await;
    monitor.logout().await;
    result
}

async fn run(monitor: &Monitor, args: EventsArgs) -> Result<(), CliError> {
    match args.command {
        EventsCommand::List { critical, kind } => {
            let filter = match (critical, kind) {
                (true, _) => EventFilter::Critical,
                (false, Some(k)) => EventFilter::Kind(k),
                (false, None) => EventFilter::All,
            };
            monitor.set_filter(filter).await;
            output::print_events(&monitor.render_model().events);
            Ok(())
        }

        EventsCommand::Process { event_id } => {
            monitor.mark_processed(event_id).await.map_err(|e| match e {
                CoreError::Backend { status: 404 } => CliError::EventNotFound { event_id },
                other => other.into(),
            })?;
            println!("event {event_id} marked as processed");
            output::print_stats(&monitor.stats());
            Ok(())
        }
    }
}
