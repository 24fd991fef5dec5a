pub mod argon;
pub mod cerium;
pub mod kinetic;
pub mod lj_heat_capacity;
pub mod oscillator;
pub mod overlap;
pub mod trouton;
pub mod virial;
pub mod work;

use pchem::workflows::Artifacts;
use tracing::info;

fn print_artifacts(artifacts: &Artifacts) {
    info!(
        "Wrote {} file(s) to {:?}",
        artifacts.files.len(),
        artifacts.output_dir
    );
    println!("Files written to {}:", artifacts.output_dir.display());
    for path in &artifacts.files {
        println!("  {}", path.display());
    }
}
