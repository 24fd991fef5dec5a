//! Overlap of two hydrogen 2p_z orbitals by Monte Carlo.
//!
//! Both orbitals lie on the z-axis, so the integrand is even in x, y and z. Proposals
//! confined to the positive octant estimate one eighth of the integral and are scaled by 8.

use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;
use tracing::{info, instrument};

use super::{Artifacts, WorkflowError};
use crate::core::io::markdown::write_markdown;
use crate::core::io::plot::{LinePlot, Series, render_svg};
use crate::core::io::table::write_csv;
use crate::engine::monte_carlo::{
    DEFAULT_CHUNK_SIZE, DEFAULT_SEED, Drawer, Estimate, MonteCarlo, ProposalSpec,
};
use crate::engine::orbitals::{overlap_2pz_exact, overlap_2pz_integrand};
use crate::engine::progress::ProgressReporter;

const OCTANTS: f64 = 8.0;

#[derive(Debug, Clone, PartialEq)]
pub struct OverlapConfig {
    pub proposals: Vec<ProposalSpec>,
    /// Separation used for the convergence study (bohr).
    pub separation: f64,
    pub sample_counts: Vec<usize>,
    /// Separations of the overlap curve (bohr).
    pub separations: Vec<f64>,
    /// Samples per point of the overlap curve.
    pub sweep_samples: usize,
    pub chunk_size: usize,
    pub seed: u64,
}

impl Default for OverlapConfig {
    fn default() -> Self {
        Self {
            proposals: vec![
                ProposalSpec::Uniform {
                    low: 0.0,
                    high: 20.0,
                },
                ProposalSpec::Exponential { scale: 2.0 },
            ],
            separation: 2.0,
            sample_counts: (2..=7).map(|k| 10usize.pow(k)).collect(),
            separations: (1..=40).map(|k| 0.5 * k as f64).collect(),
            sweep_samples: 1_000_000,
            chunk_size: DEFAULT_CHUNK_SIZE,
            seed: DEFAULT_SEED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvergenceRow {
    pub proposal: &'static str,
    pub samples: usize,
    pub overlap: f64,
    pub std_error: f64,
    pub exact: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeparationRow {
    pub separation: f64,
    pub proposal: &'static str,
    pub overlap: f64,
    pub std_error: f64,
    pub exact: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlapReport {
    pub convergence: Vec<ConvergenceRow>,
    pub curve: Vec<SeparationRow>,
    pub artifacts: Artifacts,
}

/// Overlap at `separation` from `samples` draws of `spec`.
pub fn estimate_overlap(
    spec: &ProposalSpec,
    separation: f64,
    samples: usize,
    chunk_size: usize,
    seed: u64,
    reporter: &ProgressReporter,
) -> Result<Estimate, WorkflowError> {
    let drawer = Drawer::with_seed(spec.build()?, seed);
    let mut mc = MonteCarlo::new(overlap_2pz_integrand(separation), drawer);
    let estimate = mc.integrate(samples, chunk_size, reporter)?;
    Ok(if spec.is_positive_octant() {
        estimate.scaled(OCTANTS)
    } else {
        estimate
    })
}

#[instrument(skip_all, name = "overlap_workflow")]
pub fn run(
    config: &OverlapConfig,
    output_dir: &Path,
    reporter: &ProgressReporter,
) -> Result<OverlapReport, WorkflowError> {
    let mut artifacts = Artifacts::new(output_dir);
    let exact = overlap_2pz_exact(config.separation);

    let convergence = reporter.phase("Convergence Study", || {
        let mut rows = Vec::new();
        for spec in &config.proposals {
            for &samples in &config.sample_counts {
                reporter.message(format!("{} proposal, {samples} samples", spec.name()));
                let estimate = estimate_overlap(
                    spec,
                    config.separation,
                    samples,
                    config.chunk_size,
                    config.seed,
                    reporter,
                )?;
                rows.push(ConvergenceRow {
                    proposal: spec.name(),
                    samples,
                    overlap: estimate.mean,
                    std_error: estimate.std_error,
                    exact,
                });
            }
        }
        Ok::<_, WorkflowError>(rows)
    })?;

    let curve = reporter.phase("Separation Sweep", || {
        let mut rows = Vec::new();
        for spec in &config.proposals {
            for &separation in &config.separations {
                let estimate = estimate_overlap(
                    spec,
                    separation,
                    config.sweep_samples,
                    config.chunk_size,
                    config.seed,
                    reporter,
                )?;
                rows.push(SeparationRow {
                    separation,
                    proposal: spec.name(),
                    overlap: estimate.mean,
                    std_error: estimate.std_error,
                    exact: overlap_2pz_exact(separation),
                });
            }
        }
        Ok::<_, WorkflowError>(rows)
    })?;
    info!(
        estimates = convergence.len() + curve.len(),
        "Finished 2p_z overlap estimates."
    );

    reporter.phase("Writing Output", || -> Result<(), WorkflowError> {
        write_csv(&artifacts.file("overlap_convergence.csv"), &convergence)?;
        write_csv(&artifacts.file("overlap_vs_separation.csv"), &curve)?;

        let mut plot = LinePlot::new(
            format!("2p_z overlap at R = {} bohr", config.separation),
            "Number of samples",
            "Overlap",
        )
        .with_log_x();
        for spec in &config.proposals {
            let (xs, ys): (Vec<f64>, Vec<f64>) = convergence
                .iter()
                .filter(|r| r.proposal == spec.name())
                .map(|r| (r.samples as f64, r.overlap))
                .unzip();
            plot = plot.with_series(Series::line(spec.name(), &xs, &ys));
        }
        let counts: Vec<f64> = config.sample_counts.iter().map(|&n| n as f64).collect();
        if let (Some(lo), Some(hi)) = (
            counts.iter().copied().reduce(f64::min),
            counts.iter().copied().reduce(f64::max),
        ) {
            plot = plot.with_series(Series::line("exact", &[lo, hi], &[exact, exact]));
        }
        render_svg(&artifacts.file("overlap_convergence.svg"), &plot)?;

        let mut plot = LinePlot::new(
            format!("2p_z overlap with {} samples", config.sweep_samples),
            "Separation (bohr)",
            "Overlap",
        );
        for spec in &config.proposals {
            let (xs, ys): (Vec<f64>, Vec<f64>) = curve
                .iter()
                .filter(|r| r.proposal == spec.name())
                .map(|r| (r.separation, r.overlap))
                .unzip();
            plot = plot.with_series(Series::points(spec.name(), &xs, &ys));
        }
        let exact_curve: Vec<f64> = config.separations.iter().map(|&r| overlap_2pz_exact(r)).collect();
        plot = plot.with_series(Series::line("exact", &config.separations, &exact_curve));
        render_svg(&artifacts.file("overlap_vs_separation.svg"), &plot)?;

        write_markdown(
            &artifacts.file("discussion.md"),
            &discussion(config, exact, &convergence, &curve),
        )?;
        Ok(())
    })?;

    Ok(OverlapReport {
        convergence,
        curve,
        artifacts,
    })
}

fn discussion(
    config: &OverlapConfig,
    exact: f64,
    convergence: &[ConvergenceRow],
    curve: &[SeparationRow],
) -> String {
    let mut text = String::from("# Overlap of two 2p_z orbitals\n\n");
    let _ = writeln!(
        text,
        "The analytic overlap at R = {} bohr is {exact:.5}. Estimates with the largest sample count:\n",
        config.separation
    );
    text.push_str("| Proposal | Samples | Estimate | Std. error | |error| |\n|---|---|---|---|---|\n");
    let mut best: Option<&ConvergenceRow> = None;
    for spec in &config.proposals {
        let Some(row) = convergence
            .iter()
            .filter(|r| r.proposal == spec.name())
            .max_by_key(|r| r.samples)
        else {
            continue;
        };
        let _ = writeln!(
            text,
            "| {} | {} | {:.5} | {:.2e} | {:.2e} |",
            row.proposal,
            row.samples,
            row.overlap,
            row.std_error,
            (row.overlap - exact).abs()
        );
        if best.is_none_or(|b| row.std_error < b.std_error) {
            best = Some(row);
        }
    }
    if let Some(best) = best {
        let _ = writeln!(
            text,
            "\nThe {} proposal has the smallest standard error. Uniform sampling spends most points \
             where the orbitals have decayed to nothing, while a proposal concentrated near the nuclei \
             samples the region that carries the integral, so its ratio f/g varies less and the \
             estimate converges faster for the same number of samples.",
            best.proposal
        );
    }

    let worst = curve
        .iter()
        .map(|r| (r.overlap - r.exact).abs())
        .fold(0.0, f64::max);
    let _ = writeln!(
        text,
        "\nAcross the separation sweep the largest deviation from the analytic curve is {worst:.2e}. \
         The overlap falls from near 1 at small R, passes through zero and becomes negative, because \
         the positive lobe of one orbital meets the negative lobe of the other, then decays to zero \
         as the orbitals separate."
    );
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn small_config() -> OverlapConfig {
        OverlapConfig {
            sample_counts: vec![1_000, 50_000],
            separations: vec![1.0, 2.0, 6.0],
            sweep_samples: 50_000,
            chunk_size: 20_000,
            ..OverlapConfig::default()
        }
    }

    #[test]
    fn estimates_agree_with_analytic_overlap() {
        let dir = tempdir().unwrap();
        let report = run(&small_config(), dir.path(), &ProgressReporter::new()).unwrap();

        assert_eq!(report.convergence.len(), 4);
        assert_eq!(report.curve.len(), 6);
        for row in report.convergence.iter().filter(|r| r.samples == 50_000) {
            assert!(
                (row.overlap - row.exact).abs() < 5.0 * row.std_error + 0.02,
                "{row:?}"
            );
        }
        for row in report.curve.iter().filter(|r| r.proposal == "exponential") {
            assert!(
                (row.overlap - row.exact).abs() < 5.0 * row.std_error + 0.02,
                "{row:?}"
            );
        }
    }

    #[test]
    fn writes_tables_plots_and_discussion() {
        let dir = tempdir().unwrap();
        let report = run(&small_config(), dir.path(), &ProgressReporter::new()).unwrap();
        for name in [
            "overlap_convergence.csv",
            "overlap_vs_separation.csv",
            "overlap_convergence.svg",
            "overlap_vs_separation.svg",
            "discussion.md",
        ] {
            assert!(report.artifacts.contains(name), "{name} missing");
            assert!(dir.path().join(name).exists(), "{name} not written");
        }
        let csv = std::fs::read_to_string(dir.path().join("overlap_convergence.csv")).unwrap();
        assert!(csv.starts_with("proposal,samples,overlap,std_error,exact\n"));
    }

    #[test]
    fn octant_proposals_are_scaled_by_eight() {
        let reporter = ProgressReporter::new();
        let octant = ProposalSpec::Uniform { low: 0.0, high: 20.0 };
        let full = ProposalSpec::Uniform {
            low: -20.0,
            high: 20.0,
        };
        let a = estimate_overlap(&octant, 2.0, 100_000, 50_000, DEFAULT_SEED, &reporter).unwrap();
        let b = estimate_overlap(&full, 2.0, 100_000, 50_000, DEFAULT_SEED, &reporter).unwrap();
        let exact = overlap_2pz_exact(2.0);
        assert!((a.mean - exact).abs() < 5.0 * a.std_error + 0.02);
        assert!((b.mean - exact).abs() < 5.0 * b.std_error + 0.05);
    }

    #[test]
    fn same_seed_reproduces_estimates() {
        let reporter = ProgressReporter::new();
        let spec = ProposalSpec::Exponential { scale: 2.0 };
        let a = estimate_overlap(&spec, 2.0, 10_000, 3_000, 7, &reporter).unwrap();
        let b = estimate_overlap(&spec, 2.0, 10_000, 10_000, 7, &reporter).unwrap();
        assert_eq!(a, b);
    }
}
