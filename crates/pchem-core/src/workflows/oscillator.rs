use serde::Serialize;
use std::path::Path;
use tracing::{info, instrument};

use super::{Artifacts, WorkflowError};
use crate::core::io::plot::{LinePlot, Series, render_panels};
use crate::core::io::table::write_csv;
use crate::core::potentials::OscillatorPotential;
use crate::engine::error::EngineError;
use crate::engine::progress::ProgressReporter;
use crate::engine::schrodinger::{OscillatorGrid, SchrodingerSolver, Spectrum};

#[derive(Debug, Clone, PartialEq)]
pub struct OscillatorConfig {
    pub grid: OscillatorGrid,
    /// Number of lowest states kept per potential.
    pub states: usize,
    /// Well depth of the Morse potential (hartree).
    pub morse_depth: f64,
}

impl Default for OscillatorConfig {
    fn default() -> Self {
        Self {
            grid: OscillatorGrid::default(),
            states: 10,
            morse_depth: 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EigenvalueRow {
    pub state: usize,
    pub harmonic: f64,
    pub anharmonic: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OscillatorReport {
    pub harmonic: Spectrum,
    pub anharmonic: Spectrum,
    pub artifacts: Artifacts,
}

impl OscillatorReport {
    pub fn eigenvalue_rows(&self) -> Vec<EigenvalueRow> {
        self.harmonic
            .states
            .iter()
            .zip(&self.anharmonic.states)
            .enumerate()
            .map(|(state, (h, a))| EigenvalueRow {
                state,
                harmonic: h.energy,
                anharmonic: a.energy,
            })
            .collect()
    }
}

fn wavefunction_panel(title: &str, spectrum: &Spectrum) -> LinePlot {
    spectrum.states.iter().fold(
        LinePlot::new(title, "Width (a0)", "1D wavefunction (a0^-1/2)"),
        |plot, state| {
            plot.with_series(Series::line(
                format!("Energy: {:.2}", state.energy),
                &spectrum.grid,
                &state.wavefunction,
            ))
        },
    )
}

#[instrument(skip_all, name = "oscillator_workflow")]
pub fn run(
    config: &OscillatorConfig,
    output_dir: &Path,
    reporter: &ProgressReporter,
) -> Result<OscillatorReport, WorkflowError> {
    if !(config.morse_depth > 0.0) {
        return Err(EngineError::invalid(
            "morse_depth",
            format!("must be positive, got {}", config.morse_depth),
        )
        .into());
    }
    let mut artifacts = Artifacts::new(output_dir);

    let (harmonic, anharmonic) = reporter.phase("Eigen Decomposition", || {
        let harmonic = SchrodingerSolver::new(OscillatorPotential::unit_harmonic(), config.grid)?
            .solve(config.states)?;
        let anharmonic =
            SchrodingerSolver::new(OscillatorPotential::matched_morse(config.morse_depth), config.grid)?
                .solve(config.states)?;
        Ok::<_, EngineError>((harmonic, anharmonic))
    })?;
    info!(
        harmonic_ground = harmonic.states.first().map(|s| s.energy),
        anharmonic_ground = anharmonic.states.first().map(|s| s.energy),
        "Solved both oscillators."
    );

    let report = OscillatorReport {
        harmonic,
        anharmonic,
        artifacts: Artifacts::default(),
    };

    reporter.phase("Writing Output", || -> Result<(), WorkflowError> {
        write_csv(&artifacts.file("eigenvalues.csv"), &report.eigenvalue_rows())?;
        let panels = [
            wavefunction_panel(
                &format!("First {} 1D-Wavefunctions for Harmonic Oscillators", config.states),
                &report.harmonic,
            ),
            wavefunction_panel(
                &format!("First {} 1D-Wavefunctions for Anharmonic Oscillators", config.states),
                &report.anharmonic,
            ),
        ];
        render_panels(&artifacts.file("first_10_wavefunctions.svg"), &panels)?;
        Ok(())
    })?;

    Ok(OscillatorReport {
        artifacts,
        ..report
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn small_config() -> OscillatorConfig {
        OscillatorConfig {
            grid: OscillatorGrid {
                length: 20.0,
                points: 400,
            },
            states: 4,
            morse_depth: 10.0,
        }
    }

    #[test]
    fn harmonic_and_morse_levels_are_tabulated() {
        let dir = tempdir().unwrap();
        let report = run(&small_config(), dir.path(), &ProgressReporter::new()).unwrap();

        let rows = report.eigenvalue_rows();
        assert_eq!(rows.len(), 4);
        for row in &rows {
            let n = row.state as f64 + 0.5;
            assert!((row.harmonic - n).abs() < 0.02, "harmonic {row:?}");
            let morse = n - n * n / 40.0;
            assert!((row.anharmonic - morse).abs() < 0.03, "morse {row:?}");
            assert!(row.anharmonic < row.harmonic);
        }

        let csv = std::fs::read_to_string(dir.path().join("eigenvalues.csv")).unwrap();
        assert!(csv.starts_with("state,harmonic,anharmonic\n"));
        assert!(dir.path().join("first_10_wavefunctions.svg").exists());
        assert_eq!(report.artifacts.files.len(), 2);
    }

    #[test]
    fn rejects_non_positive_morse_depth() {
        let dir = tempdir().unwrap();
        let config = OscillatorConfig {
            morse_depth: 0.0,
            ..small_config()
        };
        let err = run(&config, dir.path(), &ProgressReporter::new()).unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::Engine(EngineError::InvalidParameter { name: "morse_depth", .. })
        ));
    }
}
