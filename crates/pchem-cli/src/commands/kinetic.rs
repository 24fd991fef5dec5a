use super::print_artifacts;
use crate::cli::KineticArgs;
use crate::config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use pchem::workflows::kinetic;
use tracing::info;

pub fn run(args: KineticArgs, quiet: bool) -> Result<()> {
    let app = config::build_kinetic(&args)?;
    let progress_handler = CliProgressHandler::new();
    let reporter = progress_handler.reporter(quiet);

    println!(
        "Estimating kinetic-energy matrix elements with seed {}...",
        app.workflow.seed
    );
    info!("Invoking the kinetic-energy workflow...");
    let report = kinetic::run(&app.workflow, &app.output_dir, &reporter)?;

    for (element, _) in app.workflow.elements() {
        for spec in &app.workflow.proposals {
            if let Some(row) = report.best(element, spec.name()) {
                println!(
                    "  {} ({}): T = {:.5} ± {:.1e} Hartree (exact {:.5})",
                    row.element, row.proposal, row.kinetic_energy, row.std_error, row.exact
                );
            }
        }
    }
    print_artifacts(&report.artifacts);
    Ok(())
}
