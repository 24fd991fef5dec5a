use super::print_artifacts;
use crate::cli::LjHeatCapacityArgs;
use crate::config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use pchem::workflows::lj_heat_capacity;
use tracing::{info, warn};

pub fn run(args: LjHeatCapacityArgs, quiet: bool) -> Result<()> {
    let app = config::build_lj_heat_capacity(&args)?;
    let progress_handler = CliProgressHandler::new();
    let reporter = progress_handler.reporter(quiet);

    println!("Integrating the Lennard-Jones pair partition function...");
    info!("Invoking the heat-capacity workflow...");
    let report = lj_heat_capacity::run(&app.workflow, &app.output_dir, &reporter)?;

    match report.dissociation_temperature {
        Some(t) => println!("  Dissociation temperature ≈ {t:.2} K"),
        None => {
            warn!("No finite heat-capacity values; dissociation temperature undetermined.");
            println!("  Dissociation temperature could not be determined");
        }
    }
    print_artifacts(&report.artifacts);
    Ok(())
}
