//! `vigil watch` -- follow the dashboard live until Ctrl-C.

use std::collections::HashSet;

use vigil_core::{EventFilter, Monitor};

use crate::cli::{GlobalOpts, WatchArgs};
use crate::error::CliError;
use crate::{output, session};

pub async fn handle(args: WatchArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let monitor = session::connect(global).await?;

    let filter = match (args.critical, args.kind) {
        (true, _) => EventFilter::Critical,
        (false, Some(k)) => EventFilter::Kind(k),
        (false, None) => EventFilter::All,
    };
    monitor.set_filter(filter).await;

    render(&monitor);
    follow(&monitor).await?;

    monitor.logout().await;
    Ok(())
}

/// React to refreshes and notifications until interrupted.
async fn follow(monitor: &Monitor) -> Result<(), CliError> {
    let mut stats_rx = monitor.store().subscribe_stats();
    let mut events_rx = monitor.store().subscribe_events();
    let mut notif_rx = monitor.notifications().subscribe();
    let mut seen: HashSet<uuid::Uuid> = HashSet::new();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,

            changed = stats_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                render(monitor);
            }

            changed = events_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                render(monitor);
            }

            changed = notif_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = notif_rx.borrow_and_update().clone();
                for n in snapshot.iter() {
                    if seen.insert(n.id) {
                        output::print_notification(n);
                    }
                }
            }
        }
    }
    Ok(())
}

fn render(monitor: &Monitor) {
    let model = monitor.render_model();
    println!();
    output::print_stats(&model.stats);
    output::print_events(&model.events);
}
