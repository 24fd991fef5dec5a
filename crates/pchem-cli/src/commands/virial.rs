use super::print_artifacts;
use crate::cli::VirialArgs;
use crate::config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use pchem::workflows::virial;
use tracing::info;

pub fn run(args: VirialArgs, quiet: bool) -> Result<()> {
    let app = config::build_virial(&args)?;
    let progress_handler = CliProgressHandler::new();
    let reporter = progress_handler.reporter(quiet);

    println!("Computing second virial coefficients...");
    info!("Invoking the virial workflow...");
    let report = virial::run(&app.workflow, &app.output_dir, &reporter)?;

    for curve in &report.curves {
        match curve.boyle_temperature {
            Some(t) => println!("  {}: Boyle temperature ≈ {:.1} K", curve.potential.name(), t),
            None => println!(
                "  {}: B2V does not change sign in the sweep",
                curve.potential.name()
            ),
        }
    }
    print_artifacts(&report.artifacts);
    Ok(())
}
