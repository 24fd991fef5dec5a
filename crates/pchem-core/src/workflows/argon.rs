use std::path::Path;
use tracing::{info, instrument, warn};

use super::{Artifacts, WorkflowError};
use crate::core::geometry::{AngleClass, classify_angle};
use crate::core::io::plot::{LinePlot, Series, render_svg};
use crate::core::io::xyz::{XyzAtom, write_xyz};
use crate::core::numerics::linspace;
use crate::engine::cluster::{ArgonCluster, Dimer, Trimer};
use crate::engine::progress::ProgressReporter;

#[derive(Debug, Clone, PartialEq)]
pub struct ArgonConfig {
    pub cluster: ArgonCluster,
    /// Initial interatomic distance of the dimer (Å).
    pub dimer_guess: f64,
    /// Initial `[r12, x3, y3]` of the trimer (Å).
    pub trimer_guess: [f64; 3],
    /// Range and resolution of the plotted potential curve (Å).
    pub curve_start: f64,
    pub curve_end: f64,
    pub curve_points: usize,
}

impl Default for ArgonConfig {
    fn default() -> Self {
        Self {
            cluster: ArgonCluster::default(),
            dimer_guess: 4.0,
            trimer_guess: [4.0, 4.0, 4.0],
            curve_start: 3.0,
            curve_end: 6.0,
            curve_points: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArgonReport {
    pub dimer: Dimer,
    pub trimer: Trimer,
    pub angle_classes: [AngleClass; 3],
    pub artifacts: Artifacts,
}

fn argon_atoms(positions: &[nalgebra::Point3<f64>]) -> Vec<XyzAtom> {
    positions.iter().map(|p| XyzAtom::new("Ar", *p)).collect()
}

#[instrument(skip_all, name = "argon_workflow")]
pub fn run(
    config: &ArgonConfig,
    output_dir: &Path,
    reporter: &ProgressReporter,
) -> Result<ArgonReport, WorkflowError> {
    let mut artifacts = Artifacts::new(output_dir);
    let cluster = config.cluster;

    let (dimer, trimer) = reporter.phase("Geometry Optimization", || {
        let dimer = cluster.optimize_dimer(config.dimer_guess)?;
        let trimer = cluster.optimize_trimer(config.trimer_guess)?;
        Ok::<_, WorkflowError>((dimer, trimer))
    })?;
    if !(dimer.converged && trimer.converged) {
        warn!("At least one cluster optimization did not reach its tolerance.");
    }

    let angles = trimer.angles();
    let angle_classes = angles.map(classify_angle);
    for (vertex, (angle, class)) in angles.iter().zip(&angle_classes).enumerate() {
        info!(vertex = vertex + 1, angle, class = %class, "Trimer interior angle.");
    }

    reporter.phase("Writing Output", || -> Result<(), WorkflowError> {
        write_xyz(
            &artifacts.file("argon_dimer.xyz"),
            "Argon dimer",
            &argon_atoms(&dimer.positions()),
        )?;
        write_xyz(
            &artifacts.file("argon_trimer.xyz"),
            "Argon trimer",
            &argon_atoms(&trimer.positions),
        )?;

        let distances = linspace(config.curve_start, config.curve_end, config.curve_points);
        let energies = cluster.potential_curve(&distances);
        let plot = LinePlot::new(
            "Argon dimer potential energy",
            "Distance (Å)",
            "Potential energy (eV)",
        )
        .with_series(Series::line("Lennard-Jones", &distances, &energies))
        .with_marker(dimer.distance, "Vmin Distance");
        render_svg(&artifacts.file("argon_dimer_potential_vs_distance.svg"), &plot)?;
        Ok(())
    })?;

    Ok(ArgonReport {
        dimer,
        trimer,
        angle_classes,
        artifacts,
    })
}
