use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "pchem - Physical-chemistry computations: virial coefficients, cluster geometries, oscillators, regression, thermodynamics and Monte Carlo integrals.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Second virial coefficient of argon for hard-sphere, square-well and Lennard-Jones potentials.
    Virial(VirialArgs),
    /// Minimum-energy geometries of the Lennard-Jones argon dimer and trimer.
    Argon(ArgonArgs),
    /// Finite-difference eigenstates of the harmonic and Morse oscillators.
    Oscillator(OscillatorArgs),
    /// Trouton's rule: regression and direct minimization on boiling-point data.
    Trouton(TroutonArgs),
    /// Reversible isothermal and adiabatic expansion work of an ideal gas.
    Work(WorkArgs),
    /// Canonical-ensemble thermodynamics of Ce3+ with spin-orbit and crystal-field splitting.
    Cerium(CeriumArgs),
    /// Heat capacity and dissociation temperature of a Lennard-Jones argon pair.
    LjHeatCapacity(LjHeatCapacityArgs),
    /// Monte Carlo overlap of two hydrogen 2p_z orbitals.
    Overlap(OverlapArgs),
    /// Monte Carlo kinetic-energy matrix of H2+ in a 1s basis.
    Kinetic(KineticArgs),
}

/// Arguments shared by every workflow.
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Directory for the generated tables, plots and discussions.
    #[arg(short, long, value_name = "PATH")]
    pub output_dir: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S overlap.seed=42
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct VirialArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// First temperature of the sweep (K).
    #[arg(long, value_name = "FLOAT")]
    pub t_start: Option<f64>,

    /// Exclusive end of the sweep (K).
    #[arg(long, value_name = "FLOAT")]
    pub t_stop: Option<f64>,

    /// Temperature step (K).
    #[arg(long, value_name = "FLOAT")]
    pub t_step: Option<f64>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ArgonArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Initial dimer separation (Å).
    #[arg(long, value_name = "FLOAT")]
    pub dimer_guess: Option<f64>,

    /// Points of the plotted dimer potential curve.
    #[arg(long, value_name = "INT")]
    pub curve_points: Option<usize>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct OscillatorArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Number of lowest eigenstates to keep.
    #[arg(short = 'n', long, value_name = "INT")]
    pub states: Option<usize>,

    /// Grid points of the finite-difference Hamiltonian.
    #[arg(long, value_name = "INT")]
    pub points: Option<usize>,

    /// Well depth of the Morse potential (hartree).
    #[arg(long, value_name = "FLOAT")]
    pub morse_depth: Option<f64>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct TroutonArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// CSV with boiling points, enthalpies of vaporization and liquid classes.
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Confidence level of the parameter intervals.
    #[arg(long, value_name = "FLOAT")]
    pub confidence_level: Option<f64>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct WorkArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Amount of gas (mol).
    #[arg(long, value_name = "FLOAT")]
    pub moles: Option<f64>,

    /// Initial temperature (K).
    #[arg(long, value_name = "FLOAT")]
    pub temperature: Option<f64>,

    /// Heat-capacity ratio of the adiabatic expansion.
    #[arg(long, value_name = "FLOAT")]
    pub gamma: Option<f64>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct CeriumArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Lowest temperature (K).
    #[arg(long, value_name = "FLOAT")]
    pub t_start: Option<f64>,

    /// Highest temperature (K).
    #[arg(long, value_name = "FLOAT")]
    pub t_end: Option<f64>,

    /// Number of temperatures.
    #[arg(long, value_name = "INT")]
    pub points: Option<usize>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct LjHeatCapacityArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Lowest temperature (K).
    #[arg(long, value_name = "FLOAT")]
    pub t_start: Option<f64>,

    /// Highest temperature (K).
    #[arg(long, value_name = "FLOAT")]
    pub t_end: Option<f64>,

    /// Number of temperatures.
    #[arg(long, value_name = "INT")]
    pub points: Option<usize>,

    /// Spatial grid points per axis of the box.
    #[arg(long, value_name = "INT")]
    pub grid_points: Option<usize>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct OverlapArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Seed of the random number generator.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Samples per point of the separation sweep.
    #[arg(long, value_name = "INT")]
    pub sweep_samples: Option<usize>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct KineticArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Seed of the random number generator.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Internuclear separation of the off-diagonal element (bohr).
    #[arg(long, value_name = "FLOAT")]
    pub bond_length: Option<f64>,
}
