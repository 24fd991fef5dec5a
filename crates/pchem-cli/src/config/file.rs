use crate::error::{CliError, Result};
use pchem::core::potentials::PairPotential;
use pchem::engine::ensemble::CeriumModel;
use pchem::engine::monte_carlo::ProposalSpec;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileVirialConfig {
    pub output_dir: Option<PathBuf>,
    pub t_start: Option<f64>,
    pub t_stop: Option<f64>,
    pub t_step: Option<f64>,
    pub potentials: Option<Vec<PairPotential>>,
    pub r_min: Option<f64>,
    pub cutoff_sigmas: Option<f64>,
    pub grid_points: Option<usize>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileArgonConfig {
    pub output_dir: Option<PathBuf>,
    pub epsilon: Option<f64>,
    pub sigma: Option<f64>,
    pub tolerance: Option<f64>,
    pub max_iterations: Option<usize>,
    pub dimer_guess: Option<f64>,
    pub trimer_guess: Option<[f64; 3]>,
    pub curve_start: Option<f64>,
    pub curve_end: Option<f64>,
    pub curve_points: Option<usize>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileOscillatorConfig {
    pub output_dir: Option<PathBuf>,
    pub length: Option<f64>,
    pub points: Option<usize>,
    pub states: Option<usize>,
    pub morse_depth: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileTroutonConfig {
    pub output_dir: Option<PathBuf>,
    pub input: Option<PathBuf>,
    pub confidence_level: Option<f64>,
    pub minimization_guess: Option<[f64; 2]>,
    pub tolerance: Option<f64>,
    pub max_iterations: Option<usize>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileWorkConfig {
    pub output_dir: Option<PathBuf>,
    pub moles: Option<f64>,
    pub temperature: Option<f64>,
    pub initial_volume: Option<f64>,
    pub gamma: Option<f64>,
    pub max_expansion: Option<f64>,
    pub points: Option<usize>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileCeriumConfig {
    pub output_dir: Option<PathBuf>,
    pub models: Option<Vec<CeriumModel>>,
    pub t_start: Option<f64>,
    pub t_end: Option<f64>,
    pub points: Option<usize>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileLjHeatCapacityConfig {
    pub output_dir: Option<PathBuf>,
    pub epsilon: Option<f64>,
    pub sigma: Option<f64>,
    pub box_length: Option<f64>,
    pub grid_points: Option<usize>,
    pub t_start: Option<f64>,
    pub t_end: Option<f64>,
    pub points: Option<usize>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileOverlapConfig {
    pub output_dir: Option<PathBuf>,
    pub proposals: Option<Vec<ProposalSpec>>,
    pub separation: Option<f64>,
    pub sample_counts: Option<Vec<usize>>,
    pub separations: Option<Vec<f64>>,
    pub sweep_samples: Option<usize>,
    pub chunk_size: Option<usize>,
    pub seed: Option<u64>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileKineticConfig {
    pub output_dir: Option<PathBuf>,
    pub proposals: Option<Vec<ProposalSpec>>,
    pub bond_length: Option<f64>,
    pub sample_counts: Option<Vec<usize>>,
    pub chunk_size: Option<usize>,
    pub seed: Option<u64>,
}

/// Optional sections of a configuration file, one per workflow.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    pub virial: Option<FileVirialConfig>,
    pub argon: Option<FileArgonConfig>,
    pub oscillator: Option<FileOscillatorConfig>,
    pub trouton: Option<FileTroutonConfig>,
    pub work: Option<FileWorkConfig>,
    pub cerium: Option<FileCeriumConfig>,
    pub lj_heat_capacity: Option<FileLjHeatCapacityConfig>,
    pub overlap: Option<FileOverlapConfig>,
    pub kinetic: Option<FileKineticConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn parses_sections_with_tagged_lists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pchem.toml");
        fs::write(
            &path,
            r#"
            [virial]
            t-step = 50.0

            [[virial.potentials]]
            type = "lennard-jones"
            epsilon = 0.0103
            sigma = 3.4

            [cerium]
            models = ["isolated", "spin-orbit"]

            [[overlap.proposals]]
            type = "gamma"
            shape = 2.0
            scale = 1.5
            "#,
        )
        .unwrap();

        let config = FileConfig::from_file(&path).unwrap();
        let virial = config.virial.unwrap();
        assert_eq!(virial.t_step, Some(50.0));
        assert_eq!(
            virial.potentials,
            Some(vec![PairPotential::LennardJones {
                epsilon: 0.0103,
                sigma: 3.4
            }])
        );
        assert_eq!(
            config.cerium.unwrap().models,
            Some(vec![CeriumModel::Isolated, CeriumModel::SpinOrbit])
        );
        assert_eq!(
            config.overlap.unwrap().proposals,
            Some(vec![ProposalSpec::Gamma {
                shape: 2.0,
                scale: 1.5
            }])
        );
        assert!(config.kinetic.is_none());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pchem.toml");
        fs::write(&path, "[work]\nvolume = 2.0\n").unwrap();
        assert!(matches!(
            FileConfig::from_file(&path),
            Err(CliError::FileParsing { .. })
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            FileConfig::from_file(&dir.path().join("absent.toml")),
            Err(CliError::Io(_))
        ));
    }
}
