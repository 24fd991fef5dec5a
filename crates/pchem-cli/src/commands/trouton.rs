use super::print_artifacts;
use crate::cli::TroutonArgs;
use crate::config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use pchem::workflows::trouton;
use tracing::{info, warn};

pub fn run(args: TroutonArgs, quiet: bool) -> Result<()> {
    let app = config::build_trouton(&args)?;
    let progress_handler = CliProgressHandler::new();
    let reporter = progress_handler.reporter(quiet);

    println!(
        "Fitting Trouton's rule to {}...",
        app.workflow.input.display()
    );
    info!("Invoking the Trouton workflow...");
    let report = trouton::run(&app.workflow, &app.output_dir, &reporter)?;

    if !report.minimized.converged {
        warn!(
            "Direct minimization stopped after {} iterations without converging.",
            report.minimized.iterations
        );
    }
    println!("  {} substances", report.records);
    for row in report.parameter_rows() {
        println!(
            "  {} = {:.4} {} (CI {:.4} to {:.4}); minimization gives {:.4}",
            row.parameter, row.regression, row.unit, row.ci_lower, row.ci_upper, row.minimization
        );
    }
    print_artifacts(&report.artifacts);
    Ok(())
}
