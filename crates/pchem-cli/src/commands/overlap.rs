use super::print_artifacts;
use crate::cli::OverlapArgs;
use crate::config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use pchem::workflows::overlap;
use tracing::info;

pub fn run(args: OverlapArgs, quiet: bool) -> Result<()> {
    let app = config::build_overlap(&args)?;
    let progress_handler = CliProgressHandler::new();
    let reporter = progress_handler.reporter(quiet);

    println!(
        "Estimating 2p_z overlaps with seed {}...",
        app.workflow.seed
    );
    info!("Invoking the overlap workflow...");
    let report = overlap::run(&app.workflow, &app.output_dir, &reporter)?;

    for spec in &app.workflow.proposals {
        if let Some(row) = report
            .convergence
            .iter()
            .filter(|r| r.proposal == spec.name())
            .max_by_key(|r| r.samples)
        {
            println!(
                "  {}: S = {:.5} ± {:.1e} with {} samples (exact {:.5})",
                row.proposal, row.overlap, row.std_error, row.samples, row.exact
            );
        }
    }
    print_artifacts(&report.artifacts);
    Ok(())
}
