mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod utils;

use crate::cli::{Cli, Commands};
use crate::error::{CliError, Result};
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;

    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default().into_hooks();
    eyre_hook.install().map_err(|e| CliError::Other(e.into()))?;
    std::panic::set_hook(Box::new(move |pi| {
        error!("{}", panic_hook.panic_report(pi));
    }));

    info!("🚀 pchem CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let quiet = cli.quiet;
    let command_result = match cli.command {
        Commands::Virial(args) => {
            info!("Dispatching to 'virial' command.");
            commands::virial::run(args, quiet)
        }
        Commands::Argon(args) => {
            info!("Dispatching to 'argon' command.");
            commands::argon::run(args, quiet)
        }
        Commands::Oscillator(args) => {
            info!("Dispatching to 'oscillator' command.");
            commands::oscillator::run(args, quiet)
        }
        Commands::Trouton(args) => {
            info!("Dispatching to 'trouton' command.");
            commands::trouton::run(args, quiet)
        }
        Commands::Work(args) => {
            info!("Dispatching to 'work' command.");
            commands::work::run(args, quiet)
        }
        Commands::Cerium(args) => {
            info!("Dispatching to 'cerium' command.");
            commands::cerium::run(args, quiet)
        }
        Commands::LjHeatCapacity(args) => {
            info!("Dispatching to 'lj-heat-capacity' command.");
            commands::lj_heat_capacity::run(args, quiet)
        }
        Commands::Overlap(args) => {
            info!("Dispatching to 'overlap' command.");
            commands::overlap::run(args, quiet)
        }
        Commands::Kinetic(args) => {
            info!("Dispatching to 'kinetic' command.");
            commands::kinetic::run(args, quiet)
        }
    };

    match &command_result {
        Ok(_) => {
            info!("✅ Command completed successfully.");
            println!("✅ Command completed successfully.");
        }
        Err(e) => {
            error!("❌ Command failed: {}", e);
        }
    }

    command_result
}
