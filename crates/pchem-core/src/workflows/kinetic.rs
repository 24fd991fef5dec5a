//! Kinetic-energy matrix elements of H2+ in a minimal 1s basis by Monte Carlo.

use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;
use tracing::{info, instrument, warn};

use super::{Artifacts, WorkflowError};
use crate::core::io::markdown::write_markdown;
use crate::core::io::plot::{LinePlot, Series, render_svg};
use crate::core::io::table::write_csv;
use crate::engine::error::EngineError;
use crate::engine::monte_carlo::{
    DEFAULT_CHUNK_SIZE, DEFAULT_SEED, Drawer, Estimate, MonteCarlo, ProposalSpec,
};
use crate::engine::orbitals::{DEFAULT_BOND_LENGTH, kinetic_1s_exact, kinetic_1s_integrand};
use crate::engine::progress::ProgressReporter;

#[derive(Debug, Clone, PartialEq)]
pub struct KineticConfig {
    /// Proposals must cover all of space; the integrand has no octant symmetry off the diagonal.
    pub proposals: Vec<ProposalSpec>,
    /// Internuclear separation of the off-diagonal element (bohr).
    pub bond_length: f64,
    pub sample_counts: Vec<usize>,
    pub chunk_size: usize,
    pub seed: u64,
}

impl Default for KineticConfig {
    fn default() -> Self {
        Self {
            proposals: vec![
                ProposalSpec::Uniform {
                    low: -7.0,
                    high: 7.0,
                },
                ProposalSpec::Gaussian {
                    loc: 0.0,
                    scale: 1.0,
                },
            ],
            bond_length: DEFAULT_BOND_LENGTH,
            sample_counts: (2..=7).map(|k| 10usize.pow(k)).collect(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            seed: DEFAULT_SEED,
        }
    }
}

impl KineticConfig {
    /// The two distinct elements of the 2x2 matrix with their separations.
    pub fn elements(&self) -> [(&'static str, f64); 2] {
        [("diagonal", 0.0), ("off-diagonal", self.bond_length)]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KineticRow {
    pub element: &'static str,
    pub separation: f64,
    pub proposal: &'static str,
    pub samples: usize,
    pub kinetic_energy: f64,
    pub std_error: f64,
    pub exact: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KineticReport {
    pub rows: Vec<KineticRow>,
    pub artifacts: Artifacts,
}

impl KineticReport {
    /// Estimate with the most samples for an element and proposal.
    pub fn best(&self, element: &str, proposal: &str) -> Option<&KineticRow> {
        self.rows
            .iter()
            .filter(|r| r.element == element && r.proposal == proposal)
            .max_by_key(|r| r.samples)
    }
}

/// `−½⟨1s_a|∇²|1s_b⟩` at `separation` from `samples` draws of `spec`.
pub fn estimate_kinetic(
    spec: &ProposalSpec,
    separation: f64,
    samples: usize,
    chunk_size: usize,
    seed: u64,
    reporter: &ProgressReporter,
) -> Result<Estimate, WorkflowError> {
    if spec.is_positive_octant() {
        return Err(EngineError::invalid(
            "proposal",
            format!("{} proposal only covers the positive octant", spec.name()),
        )
        .into());
    }
    let drawer = Drawer::with_seed(spec.build()?, seed);
    let mut mc = MonteCarlo::new(kinetic_1s_integrand(separation), drawer);
    Ok(mc.integrate(samples, chunk_size, reporter)?)
}

#[instrument(skip_all, name = "kinetic_workflow")]
pub fn run(
    config: &KineticConfig,
    output_dir: &Path,
    reporter: &ProgressReporter,
) -> Result<KineticReport, WorkflowError> {
    let mut artifacts = Artifacts::new(output_dir);

    let rows = reporter.phase("Kinetic Energy Integrals", || {
        let mut rows = Vec::new();
        for (element, separation) in config.elements() {
            let exact = kinetic_1s_exact(separation);
            for spec in &config.proposals {
                for &samples in &config.sample_counts {
                    reporter.message(format!(
                        "{element} element, {} proposal, {samples} samples",
                        spec.name()
                    ));
                    let estimate = estimate_kinetic(
                        spec,
                        separation,
                        samples,
                        config.chunk_size,
                        config.seed,
                        reporter,
                    )?;
                    rows.push(KineticRow {
                        element,
                        separation,
                        proposal: spec.name(),
                        samples,
                        kinetic_energy: estimate.mean,
                        std_error: estimate.std_error,
                        exact,
                    });
                }
            }
        }
        Ok::<_, WorkflowError>(rows)
    })?;
    for row in &rows {
        if (row.kinetic_energy - row.exact).abs() > 5.0 * row.std_error && row.samples >= 10_000 {
            warn!(
                element = row.element,
                proposal = row.proposal,
                samples = row.samples,
                "Estimate lies more than five standard errors from the analytic value."
            );
        }
    }
    info!(estimates = rows.len(), "Finished kinetic-energy estimates.");

    let report = KineticReport {
        rows,
        artifacts: Artifacts::default(),
    };

    reporter.phase("Writing Output", || -> Result<(), WorkflowError> {
        write_csv(&artifacts.file("kinetic_energy.csv"), &report.rows)?;

        let mut plot = LinePlot::new(
            "Kinetic-energy matrix elements of H2+",
            "Number of samples",
            "Kinetic energy (Hartree)",
        )
        .with_log_x();
        let counts: Vec<f64> = config.sample_counts.iter().map(|&n| n as f64).collect();
        let span = (
            counts.iter().copied().reduce(f64::min),
            counts.iter().copied().reduce(f64::max),
        );
        for (element, separation) in config.elements() {
            for spec in &config.proposals {
                let (xs, ys): (Vec<f64>, Vec<f64>) = report
                    .rows
                    .iter()
                    .filter(|r| r.element == element && r.proposal == spec.name())
                    .map(|r| (r.samples as f64, r.kinetic_energy))
                    .unzip();
                plot = plot.with_series(Series::line(
                    format!("{element}, {}", spec.name()),
                    &xs,
                    &ys,
                ));
            }
            if let (Some(lo), Some(hi)) = span {
                let exact = kinetic_1s_exact(separation);
                plot = plot.with_series(Series::line(
                    format!("{element}, exact"),
                    &[lo, hi],
                    &[exact, exact],
                ));
            }
        }
        render_svg(&artifacts.file("kinetic_energy.svg"), &plot)?;

        write_markdown(
            &artifacts.file("discussion.md"),
            &discussion(config, &report),
        )?;
        Ok(())
    })?;

    Ok(KineticReport {
        artifacts,
        ..report
    })
}

fn discussion(config: &KineticConfig, report: &KineticReport) -> String {
    let mut text = String::from("# Kinetic-energy matrix of H2+\n\n");
    let _ = writeln!(
        text,
        "Elements −½⟨1s_a|∇²|1s_b⟩ were sampled with the nuclei {} bohr apart.\n",
        config.bond_length
    );
    text.push_str("| Element | Proposal | Samples | Estimate | Std. error | Exact |\n");
    text.push_str("|---|---|---|---|---|---|\n");
    for (element, _) in config.elements() {
        for spec in &config.proposals {
            if let Some(row) = report.best(element, spec.name()) {
                let _ = writeln!(
                    text,
                    "| {} | {} | {} | {:.5} | {:.2e} | {:.5} |",
                    row.element, row.proposal, row.samples, row.kinetic_energy, row.std_error, row.exact
                );
            }
        }
    }
    text.push_str(
        "\nThe Gaussian proposal puts its samples where the orbitals are large and converges with \
         fewer samples than the uniform box, which wastes most draws in regions where the integrand \
         is negligible. Its tails decay faster than the orbitals, so rare far-out samples carry large \
         weights and its error estimate is less trustworthy than the uniform one.\n",
    );
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn small_config() -> KineticConfig {
        KineticConfig {
            sample_counts: vec![1_000, 100_000],
            chunk_size: 40_000,
            ..KineticConfig::default()
        }
    }

    #[test]
    fn estimates_match_analytic_elements() {
        let dir = tempdir().unwrap();
        let report = run(&small_config(), dir.path(), &ProgressReporter::new()).unwrap();
        assert_eq!(report.rows.len(), 8);

        for element in ["diagonal", "off-diagonal"] {
            let uniform = report.best(element, "uniform").unwrap();
            assert_eq!(uniform.samples, 100_000);
            assert!(
                (uniform.kinetic_energy - uniform.exact).abs() < 5.0 * uniform.std_error + 0.01,
                "{uniform:?}"
            );
            let gaussian = report.best(element, "gaussian").unwrap();
            assert!((gaussian.kinetic_energy - gaussian.exact).abs() < 0.05, "{gaussian:?}");
        }
        let diagonal = report.best("diagonal", "uniform").unwrap();
        assert!((diagonal.exact - 0.5).abs() < 1e-15);
    }

    #[test]
    fn writes_table_plot_and_discussion() {
        let dir = tempdir().unwrap();
        let report = run(&small_config(), dir.path(), &ProgressReporter::new()).unwrap();
        for name in ["kinetic_energy.csv", "kinetic_energy.svg", "discussion.md"] {
            assert!(report.artifacts.contains(name), "{name} missing");
        }
        let csv = std::fs::read_to_string(dir.path().join("kinetic_energy.csv")).unwrap();
        assert!(csv.starts_with(
            "element,separation,proposal,samples,kinetic_energy,std_error,exact\n"
        ));
        assert_eq!(csv.lines().count(), 9);
    }

    #[test]
    fn octant_proposals_are_rejected() {
        let dir = tempdir().unwrap();
        let config = KineticConfig {
            proposals: vec![ProposalSpec::Exponential { scale: 1.0 }],
            ..small_config()
        };
        let err = run(&config, dir.path(), &ProgressReporter::new()).unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::Engine(EngineError::InvalidParameter { name: "proposal", .. })
        ));
    }
}
