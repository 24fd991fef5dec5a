//! # Workflows Module
//!
//! End-to-end pipelines, one per task. Every workflow follows the same shape: build the
//! model from a typed configuration, compute, tabulate to CSV, plot to SVG and write a
//! short markdown discussion whose numbers come from the computation itself.
//!
//! - **Second virial coefficient** ([`virial`])
//! - **Argon dimer and trimer geometry** ([`argon`])
//! - **Harmonic and anharmonic oscillators** ([`oscillator`])
//! - **Trouton's rule regression and minimization** ([`trouton`])
//! - **Ideal-gas expansion work** ([`work`])
//! - **Ce³⁺ thermodynamics** ([`cerium`])
//! - **Lennard-Jones pair heat capacity** ([`lj_heat_capacity`])
//! - **2p_z overlap by Monte Carlo** ([`overlap`])
//! - **1s kinetic-energy matrix by Monte Carlo** ([`kinetic`])
//!
//! Each `run` takes the output directory explicitly and returns a report listing the files
//! it wrote together with the headline numbers.

pub mod argon;
pub mod cerium;
pub mod kinetic;
pub mod lj_heat_capacity;
pub mod oscillator;
pub mod overlap;
pub mod trouton;
pub mod virial;
pub mod work;

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::io::OutputError;
use crate::core::numerics::NumericsError;
use crate::engine::error::EngineError;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Output(#[from] OutputError),

    #[error(transparent)]
    Numerics(#[from] NumericsError),
}

/// Paths of the files a workflow wrote, in creation order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Artifacts {
    pub output_dir: PathBuf,
    pub files: Vec<PathBuf>,
}

impl Artifacts {
    pub(crate) fn new(output_dir: &Path) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
            files: Vec::new(),
        }
    }

    /// Reserves `name` inside the output directory and returns its full path.
    pub(crate) fn file(&mut self, name: &str) -> PathBuf {
        let path = self.output_dir.join(name);
        self.files.push(path.clone());
        path
    }

    pub fn contains(&self, name: &str) -> bool {
        self.files.iter().any(|p| p.file_name().is_some_and(|f| f == name))
    }
}

/// Linearly interpolated abscissa where `ys` first changes sign.
pub(crate) fn first_sign_change(xs: &[f64], ys: &[f64]) -> Option<f64> {
    xs.windows(2).zip(ys.windows(2)).find_map(|(x, y)| {
        if y[0] == 0.0 {
            Some(x[0])
        } else if y[0].signum() != y[1].signum() {
            Some(x[0] + (x[1] - x[0]) * y[0] / (y[0] - y[1]))
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sign_change_interpolates_linearly() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        let ys = [-2.0, -1.0, 1.0, 2.0];
        assert_eq!(first_sign_change(&xs, &ys), Some(1.5));
        assert_eq!(first_sign_change(&xs, &[1.0, 2.0, 3.0, 4.0]), None);
    }

    #[test]
    fn artifacts_track_reserved_files() {
        let mut artifacts = Artifacts::new(Path::new("out"));
        let path = artifacts.file("B2V_temp.csv");
        assert_eq!(path, Path::new("out").join("B2V_temp.csv"));
        assert!(artifacts.contains("B2V_temp.csv"));
        assert!(!artifacts.contains("missing.svg"));
    }
}
