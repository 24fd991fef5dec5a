use super::print_artifacts;
use crate::cli::WorkArgs;
use crate::config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use pchem::workflows::work;
use tracing::info;

pub fn run(args: WorkArgs, quiet: bool) -> Result<()> {
    let app = config::build_work(&args)?;
    let progress_handler = CliProgressHandler::new();
    let reporter = progress_handler.reporter(quiet);

    println!("Integrating reversible expansion work...");
    info!("Invoking the expansion work workflow...");
    let report = work::run(&app.workflow, &app.output_dir, &reporter)?;

    if let (Some(v), Some(w_t), Some(w_a)) = (
        report.final_volumes.last(),
        report.isothermal.last(),
        report.adiabatic.last(),
    ) {
        println!("  V_f = {v:.3} m³: isothermal {w_t:.1} J, adiabatic {w_a:.1} J");
    }
    print_artifacts(&report.artifacts);
    Ok(())
}
