use super::print_artifacts;
use crate::cli::ArgonArgs;
use crate::config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use pchem::workflows::argon;
use tracing::{info, warn};

pub fn run(args: ArgonArgs, quiet: bool) -> Result<()> {
    let app = config::build_argon(&args)?;
    let progress_handler = CliProgressHandler::new();
    let reporter = progress_handler.reporter(quiet);

    println!("Optimizing argon dimer and trimer geometries...");
    info!("Invoking the argon cluster workflow...");
    let report = argon::run(&app.workflow, &app.output_dir, &reporter)?;

    if !report.dimer.converged || !report.trimer.converged {
        warn!("At least one geometry optimization stopped before converging.");
    }
    println!(
        "  Dimer: r = {:.4} Å, E = {:.6} eV",
        report.dimer.distance, report.dimer.energy
    );
    println!(
        "  Trimer: r12 = {:.4} Å, r13 = {:.4} Å, r23 = {:.4} Å, E = {:.6} eV",
        report.trimer.r12(),
        report.trimer.r13(),
        report.trimer.r23(),
        report.trimer.energy
    );
    let [a, b, c] = report.angle_classes;
    println!("  Trimer angles: {a}, {b}, {c}");
    print_artifacts(&report.artifacts);
    Ok(())
}
