//! `vigil sensors` -- sensor inventory.

use crate::cli::{GlobalOpts, SensorsArgs};
use crate::error::CliError;
use crate::{output, session};

pub async fn handle(args: SensorsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let monitor = session::connect(global).await?;

    let result = run(&monitor, args).await;
    monitor.logout().await;
    result
}

async fn run(monitor: &vigil_core::Monitor, args: SensorsArgs) -> Result<(), CliError> {
    if let Some(kind) = args.kind {
        let sensors = monitor.sensors_by_kind(kind).await?;
        let model = vigil_core::RenderModel::project(
            &sensors,
            &[],
            vigil_core::DashboardStats::default(),
            &[],
        );
        output::print_sensor_groups(&model);
    } else {
        output::print_sensor_groups(&monitor.render_model());
    }
    Ok(())
}
