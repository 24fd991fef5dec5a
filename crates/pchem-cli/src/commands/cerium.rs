use super::print_artifacts;
use crate::cli::CeriumArgs;
use crate::config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use pchem::workflows::cerium;
use tracing::info;

pub fn run(args: CeriumArgs, quiet: bool) -> Result<()> {
    let app = config::build_cerium(&args)?;
    let progress_handler = CliProgressHandler::new();
    let reporter = progress_handler.reporter(quiet);

    println!("Computing Ce3+ canonical-ensemble thermodynamics...");
    info!("Invoking the cerium workflow...");
    let report = cerium::run(&app.workflow, &app.output_dir, &reporter)?;

    for table in &report.tables {
        if let Some(last) = table.rows.last() {
            println!(
                "  {}: S({:.0} K) = {:.4e} J/K",
                table.system, last.temperature, last.entropy
            );
        }
    }
    print_artifacts(&report.artifacts);
    Ok(())
}
