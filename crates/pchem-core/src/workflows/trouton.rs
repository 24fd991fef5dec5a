use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use super::{Artifacts, WorkflowError};
use crate::core::io::markdown::write_markdown;
use crate::core::io::plot::{LinePlot, Series, render_svg};
use crate::core::io::table::{read_csv, write_csv};
use crate::core::optimize::NelderMeadOptions;
use crate::engine::error::EngineError;
use crate::engine::progress::ProgressReporter;
use crate::engine::regression::{
    DEFAULT_MINIMIZATION_GUESS, MinimizedFit, TROUTON_CONSTANT, TroutonFit, TroutonRecord,
    fit_by_minimization, intercept_to_kj_per_mol, slope_to_j_per_mol_k,
};

#[derive(Debug, Clone, PartialEq)]
pub struct TroutonConfig {
    /// CSV with `T_B (K)`, `H_v (kcal/mol)` and `Class` columns.
    pub input: PathBuf,
    pub confidence_level: f64,
    pub minimization_guess: [f64; 2],
    pub minimization: NelderMeadOptions,
}

impl Default for TroutonConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("trouton.csv"),
            confidence_level: 0.95,
            minimization_guess: DEFAULT_MINIMIZATION_GUESS,
            minimization: NelderMeadOptions::default(),
        }
    }
}

/// One fitted parameter in display units with its confidence interval.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterRow {
    pub parameter: &'static str,
    pub unit: &'static str,
    pub regression: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
    pub minimization: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TroutonReport {
    pub records: usize,
    pub regression: TroutonFit,
    pub minimized: MinimizedFit,
    pub artifacts: Artifacts,
}

impl TroutonReport {
    pub fn parameter_rows(&self) -> [ParameterRow; 2] {
        let (a_lo, a_hi) = self.regression.slope_interval_j_per_mol_k();
        let (b_lo, b_hi) = self.regression.intercept_interval_kj_per_mol();
        [
            ParameterRow {
                parameter: "a",
                unit: "J/(mol K)",
                regression: self.regression.slope_j_per_mol_k(),
                ci_lower: a_lo,
                ci_upper: a_hi,
                minimization: slope_to_j_per_mol_k(self.minimized.fit.slope),
            },
            ParameterRow {
                parameter: "b",
                unit: "kJ/mol",
                regression: self.regression.intercept_kj_per_mol(),
                ci_lower: b_lo,
                ci_upper: b_hi,
                minimization: intercept_to_kj_per_mol(self.minimized.fit.intercept),
            },
        ]
    }
}

/// Scatter series per class, in name order so colours are stable between runs.
fn class_series(records: &[TroutonRecord]) -> Vec<Series> {
    let mut by_class: BTreeMap<&str, (Vec<f64>, Vec<f64>)> = BTreeMap::new();
    for r in records {
        let entry = by_class.entry(r.class.as_str()).or_default();
        entry.0.push(r.boiling_point_k);
        entry.1.push(r.enthalpy_kj_mol());
    }
    by_class
        .into_iter()
        .map(|(class, (xs, ys))| Series::points(class, &xs, &ys))
        .collect()
}

/// Plot of `H_v` (kJ/mol) against `T_B` with the line `a·T_B + b` drawn from 0 to max `T_B`.
fn fit_plot(title: &str, records: &[TroutonRecord], slope_j: f64, intercept_kj: f64, label: String) -> LinePlot {
    let t_max = records
        .iter()
        .map(|r| r.boiling_point_k)
        .fold(0.0, f64::max);
    let xs = [0.0, t_max];
    let ys = xs.map(|t| slope_j / 1000.0 * t + intercept_kj);
    class_series(records)
        .into_iter()
        .fold(LinePlot::new(title, "T_B (K)", "H_v (kJ/mol)"), LinePlot::with_series)
        .with_series(Series::line(label, &xs, &ys))
}

#[instrument(skip_all, name = "trouton_workflow")]
pub fn run(
    config: &TroutonConfig,
    output_dir: &Path,
    reporter: &ProgressReporter,
) -> Result<TroutonReport, WorkflowError> {
    let mut artifacts = Artifacts::new(output_dir);
    let records: Vec<TroutonRecord> = read_csv(&config.input)?;
    info!(count = records.len(), input = %config.input.display(), "Loaded Trouton data.");

    let regression = reporter.phase("Linear Regression", || {
        TroutonFit::fit(&records, config.confidence_level)
    })?;
    let minimized = reporter.phase("SSE Minimization", || {
        fit_by_minimization(&records, config.minimization_guess, config.minimization)
    })?;
    if !minimized.converged {
        warn!("SSE minimization stopped before convergence; comparison may be loose.");
    }

    let report = TroutonReport {
        records: records.len(),
        regression,
        minimized,
        artifacts: Artifacts::default(),
    };

    reporter.phase("Writing Output", || -> Result<(), WorkflowError> {
        let reg = &report.regression;
        let (a_lo, a_hi) = reg.slope_interval_j_per_mol_k();
        let (b_lo, b_hi) = reg.intercept_interval_kj_per_mol();
        let plot = fit_plot(
            "Trouton's Rule",
            &records,
            reg.slope_j_per_mol_k(),
            reg.intercept_kj_per_mol(),
            format!(
                "H_v = a·T_B + b; a = {:.2} ({a_lo:.2}, {a_hi:.2}) J/(mol K), b = {:.2} ({b_lo:.2}, {b_hi:.2}) kJ/mol",
                reg.slope_j_per_mol_k(),
                reg.intercept_kj_per_mol()
            ),
        );
        render_svg(&artifacts.file("trouton.svg"), &plot)?;
        write_csv(&artifacts.file("trouton_fit.csv"), &report.parameter_rows())?;
        write_markdown(
            &artifacts.file("discussion.md"),
            &regression_discussion(reg, config.confidence_level),
        )?;

        let [a, b] = report.parameter_rows();
        let plot = fit_plot(
            "Trouton's Rule Optimization",
            &records,
            a.minimization,
            b.minimization,
            format!(
                "H_v = a·T_B + b; a = {:.2} J/(mol K), b = {:.2} kJ/mol",
                a.minimization, b.minimization
            ),
        );
        render_svg(&artifacts.file("trouton_optimization.svg"), &plot)?;
        write_markdown(
            &artifacts.file("optimization_discussion.md"),
            &optimization_discussion(&a, &b, report.minimized.converged),
        )?;
        Ok(())
    })?;

    Ok(TroutonReport {
        artifacts,
        ..report
    })
}

fn regression_discussion(fit: &TroutonFit, confidence_level: f64) -> String {
    let pct = confidence_level * 100.0;
    let (a_lo, a_hi) = fit.slope_interval_j_per_mol_k();
    let (b_lo, b_hi) = fit.intercept_interval_kj_per_mol();
    let mut text = String::from("# Trouton's rule\n\n");
    let _ = writeln!(
        text,
        "The slope estimates the entropy of vaporization ΔS_v. Linear regression over {} substances gives \
         a = {:.2} J/(mol·K) with a {pct:.0}% confidence interval of ({a_lo:.2}, {a_hi:.2}) J/(mol·K).\n",
        fit.summary.n,
        fit.slope_j_per_mol_k()
    );
    if fit.slope_interval_contains(TROUTON_CONSTANT) {
        let _ = writeln!(
            text,
            "The interval contains Trouton's constant of {TROUTON_CONSTANT} J/(mol·K), so the null hypothesis \
             ΔS_v = {TROUTON_CONSTANT} J/(mol·K) cannot be rejected at the {pct:.0}% level.\n"
        );
    } else {
        let _ = writeln!(
            text,
            "The interval does not contain Trouton's constant of {TROUTON_CONSTANT} J/(mol·K), so the null \
             hypothesis ΔS_v = {TROUTON_CONSTANT} J/(mol·K) is rejected at the {pct:.0}% level. Most points \
             cluster at low boiling points while a few high-temperature substances scatter widely; least \
             squares weighs those few points heavily, which pulls the slope away from the rule.\n"
        );
    }
    let _ = writeln!(
        text,
        "The intercept is b = {:.2} kJ/mol with interval ({b_lo:.2}, {b_hi:.2}) kJ/mol.",
        fit.intercept_kj_per_mol()
    );
    if fit.intercept_interval_contains(0.0) {
        text.push_str(
            "It contains 0, consistent with ΔG_v = ΔH_v − T_B·ΔS_v = 0 at the boiling point, which \
             predicts a line through the origin.\n",
        );
    } else {
        text.push_str(
            "It excludes 0, so the data are not consistent with a line through the origin as \
             ΔG_v = ΔH_v − T_B·ΔS_v = 0 would predict.\n",
        );
    }
    text
}

fn optimization_discussion(a: &ParameterRow, b: &ParameterRow, converged: bool) -> String {
    let mut text = String::from("# Trouton's rule by direct minimization\n\n");
    let _ = writeln!(
        text,
        "| Parameter | Minimization | Regression |\n|---|---|---|\n| a ({}) | {:.2} | {:.2} |\n| b ({}) | {:.2} | {:.2} |\n",
        a.unit, a.minimization, a.regression, b.unit, b.minimization, b.regression
    );
    let agree = (a.minimization - a.regression).abs() < 0.005
        && (b.minimization - b.regression).abs() < 0.005;
    if !converged {
        text.push_str(
            "The minimizer hit its iteration cap before the simplex converged, so these parameters \
             are not the optimum of the SSE surface and should not be compared with the regression.\n\n",
        );
    } else if agree {
        text.push_str("Both parameters agree with the regression to two decimal places.\n\n");
    } else {
        text.push_str(
            "The minimizer stopped slightly away from the analytic optimum; the difference is within \
             its tolerance on the SSE surface.\n\n",
        );
    }
    text.push_str(
        "Minimizing the SSE directly generalizes to models without a closed-form solution, but it can \
         stall in a local minimum without warning and yields no confidence intervals by itself. \
         Linear regression guarantees the global best fit and provides intervals, but only for \
         models that are linear in their parameters.\n",
    );
    text
}
