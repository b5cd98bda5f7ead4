//! `vigil status` -- dashboard counters.

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::{output, session};

pub async fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let monitor = session::connect(global).await?;

    if let Some(s) = monitor.current_session().session() {
        println!("signed in as {} ({})\n", s.display_name(), s.role);
    }
    output::print_stats(&monitor.stats());

    monitor.logout().await;
    Ok(())
}
