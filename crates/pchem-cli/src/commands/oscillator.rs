use super::print_artifacts;
use crate::cli::OscillatorArgs;
use crate::config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use pchem::workflows::oscillator;
use tracing::info;

pub fn run(args: OscillatorArgs, quiet: bool) -> Result<()> {
    let app = config::build_oscillator(&args)?;
    let progress_handler = CliProgressHandler::new();
    let reporter = progress_handler.reporter(quiet);

    println!("Solving the harmonic and Morse oscillators...");
    info!("Invoking the oscillator workflow...");
    let report = oscillator::run(&app.workflow, &app.output_dir, &reporter)?;

    println!("  {:>5} {:>12} {:>12}", "n", "harmonic", "anharmonic");
    for row in report.eigenvalue_rows() {
        println!(
            "  {:>5} {:>12.6} {:>12.6}",
            row.state, row.harmonic, row.anharmonic
        );
    }
    print_artifacts(&report.artifacts);
    Ok(())
}
