use serde::Serialize;
use std::path::Path;
use tracing::{info, instrument};

use super::{Artifacts, WorkflowError};
use crate::core::io::plot::{LinePlot, Series, render_svg};
use crate::core::io::table::write_csv;
use crate::engine::ensemble::{CanonicalEnsemble, CeriumModel, ThermoRow, ThermoTable};
use crate::engine::progress::ProgressReporter;

#[derive(Debug, Clone, PartialEq)]
pub struct CeriumConfig {
    pub models: Vec<CeriumModel>,
    /// K
    pub t_start: f64,
    pub t_end: f64,
    pub points: usize,
}

impl Default for CeriumConfig {
    fn default() -> Self {
        Self {
            models: CeriumModel::ALL.to_vec(),
            t_start: 300.0,
            t_end: 2000.0,
            points: 100,
        }
    }
}

/// Long-format row: one line per temperature and system.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CeriumRow<'a> {
    pub temperature: f64,
    pub internal_energy: f64,
    pub free_energy: f64,
    pub entropy: f64,
    pub system: &'a str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CeriumReport {
    pub tables: Vec<ThermoTable>,
    pub artifacts: Artifacts,
}

impl CeriumReport {
    pub fn rows(&self) -> Vec<CeriumRow<'_>> {
        self.tables
            .iter()
            .flat_map(|table| {
                table.rows.iter().map(|r| CeriumRow {
                    temperature: r.temperature,
                    internal_energy: r.internal_energy,
                    free_energy: r.free_energy,
                    entropy: r.entropy,
                    system: table.system.as_str(),
                })
            })
            .collect()
    }
}

fn property_plot(
    tables: &[ThermoTable],
    title: &str,
    y_label: &str,
    pick: fn(&ThermoRow) -> f64,
) -> LinePlot {
    tables.iter().fold(
        LinePlot::new(title, "Temperature (K)", y_label),
        |plot, table| {
            plot.with_series(Series::line(
                table.system.as_str(),
                &table.temperatures(),
                &table.column(pick),
            ))
        },
    )
}

#[instrument(skip_all, name = "cerium_workflow")]
pub fn run(
    config: &CeriumConfig,
    output_dir: &Path,
    reporter: &ProgressReporter,
) -> Result<CeriumReport, WorkflowError> {
    let mut artifacts = Artifacts::new(output_dir);

    let tables = reporter.phase("Canonical Ensembles", || {
        config
            .models
            .iter()
            .map(|&model| {
                CanonicalEnsemble::new(model).thermo(config.t_start, config.t_end, config.points, reporter)
            })
            .collect::<Result<Vec<_>, _>>()
    })?;
    for table in &tables {
        if let (Some(first), Some(last)) = (table.rows.first(), table.rows.last()) {
            info!(
                system = %table.system,
                entropy_low = first.entropy,
                entropy_high = last.entropy,
                "Computed Ce3+ thermodynamics."
            );
        }
    }

    let report = CeriumReport {
        tables,
        artifacts: Artifacts::default(),
    };

    reporter.phase("Writing Output", || -> Result<(), WorkflowError> {
        write_csv(&artifacts.file("thermo_properties.csv"), &report.rows())?;
        let plots: [(&str, &str, &str, fn(&ThermoRow) -> f64); 3] = [
            (
                "internal_energies.svg",
                "Internal energies for different Ce3+ systems vs. temperature",
                "Internal Energy (J)",
                |r| r.internal_energy,
            ),
            (
                "free_energies.svg",
                "Free energies for different Ce3+ systems vs. temperature",
                "Free Energy (J)",
                |r| r.free_energy,
            ),
            (
                "entropies.svg",
                "Entropies for different Ce3+ systems vs. temperature",
                "Entropy (J/K)",
                |r| r.entropy,
            ),
        ];
        for (file, title, y_label, pick) in plots {
            render_svg(
                &artifacts.file(file),
                &property_plot(&report.tables, title, y_label, pick),
            )?;
        }
        Ok(())
    })?;

    Ok(CeriumReport {
        artifacts,
        ..report
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::BOLTZMANN_J_PER_K;
    use tempfile::tempdir;

    #[test]
    fn writes_long_format_table_and_three_plots() {
        let dir = tempdir().unwrap();
        let config = CeriumConfig {
            points: 20,
            ..CeriumConfig::default()
        };
        let report = run(&config, dir.path(), &ProgressReporter::new()).unwrap();

        let rows = report.rows();
        assert_eq!(rows.len(), 60);
        assert_eq!(rows[0].system, "isolated");
        assert_eq!(rows[59].system, "soc and cfs");

        let csv = std::fs::read_to_string(dir.path().join("thermo_properties.csv")).unwrap();
        assert!(csv.starts_with("temperature,internal_energy,free_energy,entropy,system\n"));
        assert!(csv.contains(",soc and cfs\n"));
        for name in ["internal_energies.svg", "free_energies.svg", "entropies.svg"] {
            assert!(dir.path().join(name).exists(), "{name} not written");
        }
    }

    #[test]
    fn splitting_lowers_entropy_below_the_isolated_limit() {
        let dir = tempdir().unwrap();
        let config = CeriumConfig {
            points: 20,
            ..CeriumConfig::default()
        };
        let report = run(&config, dir.path(), &ProgressReporter::new()).unwrap();
        let isolated_s = BOLTZMANN_J_PER_K * 14f64.ln();
        for table in &report.tables[1..] {
            for row in &table.rows {
                assert!(row.entropy < isolated_s);
            }
        }
    }
}
