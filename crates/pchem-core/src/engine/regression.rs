//! Trouton's rule: `H_v = a·T_B + b`, where the slope `a` estimates the entropy of
//! vaporization and the intercept is expected to vanish.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use super::error::EngineError;
use crate::core::constants::CALORIE_J;
use crate::core::optimize::{NelderMeadOptions, nelder_mead};
use crate::core::stats::{LinearFit, RegressionSummary, linear_regression, residuals, sse};

/// Trouton's constant in J/(mol·K).
pub const TROUTON_CONSTANT: f64 = 88.0;
/// Starting point `[slope, intercept]` of the SSE minimization.
pub const DEFAULT_MINIMIZATION_GUESS: [f64; 2] = [0.02, 0.0];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TroutonRecord {
    #[serde(rename = "T_B (K)")]
    pub boiling_point_k: f64,
    #[serde(rename = "H_v (kcal/mol)")]
    pub enthalpy_kcal_mol: f64,
    #[serde(rename = "Class")]
    pub class: String,
}

impl TroutonRecord {
    pub fn enthalpy_kj_mol(&self) -> f64 {
        self.enthalpy_kcal_mol * CALORIE_J
    }
}

/// Slope (kcal/(mol·K)) to J/(mol·K).
#[inline]
pub fn slope_to_j_per_mol_k(slope: f64) -> f64 {
    slope * 1000.0 * CALORIE_J
}

/// Intercept (kcal/mol) to kJ/mol.
#[inline]
pub fn intercept_to_kj_per_mol(intercept: f64) -> f64 {
    intercept * CALORIE_J
}

fn columns(records: &[TroutonRecord]) -> (Vec<f64>, Vec<f64>) {
    records
        .iter()
        .map(|r| (r.boiling_point_k, r.enthalpy_kcal_mol))
        .unzip()
}

#[derive(Debug, Clone, PartialEq)]
pub struct TroutonFit {
    pub summary: RegressionSummary,
    pub residuals: Vec<f64>,
}

impl TroutonFit {
    #[instrument(skip_all, name = "trouton_regression")]
    pub fn fit(records: &[TroutonRecord], confidence_level: f64) -> Result<Self, EngineError> {
        let (x, y) = columns(records);
        let summary = linear_regression(&x, &y, confidence_level)?;
        let residuals = residuals(&x, &y, &summary.fit);
        info!(
            slope = slope_to_j_per_mol_k(summary.fit.slope),
            intercept = intercept_to_kj_per_mol(summary.fit.intercept),
            n = summary.n,
            "Fitted Trouton's rule."
        );
        Ok(Self { summary, residuals })
    }

    pub fn slope_j_per_mol_k(&self) -> f64 {
        slope_to_j_per_mol_k(self.summary.fit.slope)
    }

    pub fn slope_interval_j_per_mol_k(&self) -> (f64, f64) {
        let (lo, hi) = self.summary.slope_interval();
        (slope_to_j_per_mol_k(lo), slope_to_j_per_mol_k(hi))
    }

    pub fn intercept_kj_per_mol(&self) -> f64 {
        intercept_to_kj_per_mol(self.summary.fit.intercept)
    }

    pub fn intercept_interval_kj_per_mol(&self) -> (f64, f64) {
        let (lo, hi) = self.summary.intercept_interval();
        (intercept_to_kj_per_mol(lo), intercept_to_kj_per_mol(hi))
    }

    pub fn sse(&self) -> f64 {
        sse(&self.residuals)
    }

    /// Whether the slope interval contains `value` (J/(mol·K)).
    pub fn slope_interval_contains(&self, value: f64) -> bool {
        let (lo, hi) = self.slope_interval_j_per_mol_k();
        lo <= value && value <= hi
    }

    /// Whether the intercept interval contains `value` (kJ/mol).
    pub fn intercept_interval_contains(&self, value: f64) -> bool {
        let (lo, hi) = self.intercept_interval_kj_per_mol();
        lo <= value && value <= hi
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MinimizedFit {
    pub fit: LinearFit,
    pub sse: f64,
    pub iterations: usize,
    pub converged: bool,
}

/// Sum of squared residuals of `H_v ≈ a·T_B + b` for `params = [a, b]`.
pub fn sse_objective(records: &[TroutonRecord]) -> impl Fn(&[f64]) -> f64 + '_ {
    move |params: &[f64]| {
        records
            .iter()
            .map(|r| {
                let predicted = params[0] * r.boiling_point_k + params[1];
                (r.enthalpy_kcal_mol - predicted).powi(2)
            })
            .sum()
    }
}

/// Fits the same line by minimizing the SSE directly with Nelder-Mead.
#[instrument(skip_all, name = "trouton_minimization")]
pub fn fit_by_minimization(
    records: &[TroutonRecord],
    guess: [f64; 2],
    options: NelderMeadOptions,
) -> Result<MinimizedFit, EngineError> {
    if records.len() < 2 {
        return Err(EngineError::invalid(
            "records",
            format!("need at least 2 data points, got {}", records.len()),
        ));
    }
    let minimum = nelder_mead(sse_objective(records), &guess, options)?;
    if !minimum.converged {
        warn!("SSE minimization did not converge; reporting the best simplex vertex.");
    }
    Ok(MinimizedFit {
        fit: LinearFit {
            slope: minimum.x[0],
            intercept: minimum.x[1],
        },
        sse: minimum.value,
        iterations: minimum.iterations,
        converged: minimum.converged,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(t: f64, h: f64, class: &str) -> TroutonRecord {
        TroutonRecord {
            boiling_point_k: t,
            enthalpy_kcal_mol: h,
            class: class.to_string(),
        }
    }

    fn sample() -> Vec<TroutonRecord> {
        vec![
            record(111.7, 1.96, "Perfect liquids"),
            record(239.7, 5.58, "Perfect liquids"),
            record(263.1, 5.96, "Perfect liquids"),
            record(319.4, 6.4, "Perfect liquids"),
            record(353.3, 7.35, "Perfect liquids"),
            record(373.2, 9.72, "Liquids subject to hydrogen bonding"),
            record(351.5, 9.22, "Liquids subject to hydrogen bonding"),
            record(629.9, 14.13, "Liquids with metallic bonding"),
        ]
    }

    #[test]
    fn unit_conversions_use_thermochemical_calorie() {
        assert!((slope_to_j_per_mol_k(0.021) - 87.864).abs() < 1e-9);
        assert!((intercept_to_kj_per_mol(2.0) - 8.368).abs() < 1e-12);
        assert!((record(300.0, 1.0, "x").enthalpy_kj_mol() - 4.184).abs() < 1e-12);
    }

    #[test]
    fn fit_recovers_exact_trouton_line() {
        let records: Vec<_> = [100.0, 200.0, 300.0, 400.0]
            .iter()
            .map(|&t| record(t, 0.021 * t, "synthetic"))
            .collect();
        let fit = TroutonFit::fit(&records, 0.95).unwrap();
        assert!((fit.slope_j_per_mol_k() - 87.864).abs() < 1e-6);
        assert!(fit.intercept_kj_per_mol().abs() < 1e-9);
        assert!(fit.intercept_interval_contains(fit.intercept_kj_per_mol()));
        assert!(!fit.slope_interval_contains(TROUTON_CONSTANT));
    }

    #[test]
    fn confidence_intervals_bracket_estimates() {
        let fit = TroutonFit::fit(&sample(), 0.95).unwrap();
        let (lo, hi) = fit.slope_interval_j_per_mol_k();
        assert!(lo < fit.slope_j_per_mol_k() && fit.slope_j_per_mol_k() < hi);
        let (lo, hi) = fit.intercept_interval_kj_per_mol();
        assert!(lo < fit.intercept_kj_per_mol() && fit.intercept_kj_per_mol() < hi);
        assert_eq!(fit.residuals.len(), 8);
        assert!(fit.sse() > 0.0);
    }

    #[test]
    fn minimization_agrees_with_least_squares() {
        let records = sample();
        let ols = TroutonFit::fit(&records, 0.95).unwrap();
        let options = NelderMeadOptions {
            tol: 1e-10,
            max_iterations: Some(5000),
        };
        let minimized = fit_by_minimization(&records, DEFAULT_MINIMIZATION_GUESS, options).unwrap();
        assert!((minimized.sse - ols.sse()).abs() < 1e-3 * ols.sse().max(1.0));
        assert!(
            (slope_to_j_per_mol_k(minimized.fit.slope) - ols.slope_j_per_mol_k()).abs() < 0.5
        );
    }

    #[test]
    fn sse_objective_is_zero_on_exact_data() {
        let records = vec![record(100.0, 2.0, "a"), record(200.0, 4.0, "a")];
        let objective = sse_objective(&records);
        assert!(objective(&[0.02, 0.0]).abs() < 1e-24);
        assert!((objective(&[0.0, 0.0]) - 20.0).abs() < 1e-12);
    }

    #[test]
    fn minimization_requires_data() {
        assert!(fit_by_minimization(&[], DEFAULT_MINIMIZATION_GUESS, Default::default()).is_err());
    }
}
