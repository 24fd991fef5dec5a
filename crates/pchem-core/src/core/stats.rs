use super::special::student_t_ppf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum StatsError {
    #[error("Length mismatch: {x} x-values against {y} y-values")]
    LengthMismatch { x: usize, y: usize },

    #[error("Linear regression needs at least 3 points for error estimates, got {0}")]
    TooFewPoints(usize),

    #[error("All x-values are identical; the slope is undefined")]
    DegenerateX,

    #[error("Confidence level must lie in (0, 1), got {0}")]
    InvalidConfidenceLevel(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    #[inline]
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Best-fit parameters together with symmetric confidence intervals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegressionSummary {
    pub fit: LinearFit,
    pub slope_half_width: f64,
    pub intercept_half_width: f64,
    pub confidence_level: f64,
    pub n: usize,
}

impl RegressionSummary {
    pub fn slope_interval(&self) -> (f64, f64) {
        (
            self.fit.slope - self.slope_half_width,
            self.fit.slope + self.slope_half_width,
        )
    }

    pub fn intercept_interval(&self) -> (f64, f64) {
        (
            self.fit.intercept - self.intercept_half_width,
            self.fit.intercept + self.intercept_half_width,
        )
    }
}

pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn sxx(x: &[f64]) -> f64 {
    let x_mean = mean(x);
    x.iter().map(|xi| (xi - x_mean).powi(2)).sum()
}

fn check_lengths(x: &[f64], y: &[f64]) -> Result<(), StatsError> {
    if x.len() != y.len() {
        return Err(StatsError::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }
    Ok(())
}

pub fn ols_slope(x: &[f64], y: &[f64]) -> Result<f64, StatsError> {
    check_lengths(x, y)?;
    if x.len() < 2 {
        return Err(StatsError::TooFewPoints(x.len()));
    }
    let denominator = sxx(x);
    if denominator == 0.0 {
        return Err(StatsError::DegenerateX);
    }
    let x_mean = mean(x);
    let y_mean = mean(y);
    let numerator: f64 = x
        .iter()
        .zip(y)
        .map(|(xi, yi)| (xi - x_mean) * (yi - y_mean))
        .sum();
    Ok(numerator / denominator)
}

pub fn ols_intercept(x: &[f64], y: &[f64]) -> Result<f64, StatsError> {
    let slope = ols_slope(x, y)?;
    Ok(mean(y) - slope * mean(x))
}

pub fn ols(x: &[f64], y: &[f64]) -> Result<LinearFit, StatsError> {
    let slope = ols_slope(x, y)?;
    Ok(LinearFit {
        slope,
        intercept: mean(y) - slope * mean(x),
    })
}

pub fn residuals(x: &[f64], y: &[f64], fit: &LinearFit) -> Vec<f64> {
    x.iter().zip(y).map(|(xi, yi)| yi - fit.predict(*xi)).collect()
}

/// Sum of squared residuals.
pub fn sse(residuals: &[f64]) -> f64 {
    residuals.iter().map(|r| r * r).sum()
}

/// Residual variance with `n - 2` degrees of freedom.
pub fn residual_variance(residuals: &[f64]) -> f64 {
    sse(residuals) / (residuals.len() as f64 - 2.0)
}

pub fn se_slope(x: &[f64], residuals: &[f64]) -> f64 {
    (residual_variance(residuals) / sxx(x)).sqrt()
}

pub fn se_intercept(x: &[f64], residuals: &[f64]) -> f64 {
    let n = x.len() as f64;
    let x_mean = mean(x);
    (residual_variance(residuals) * (1.0 / n + x_mean * x_mean / sxx(x))).sqrt()
}

/// Half-width `t_{1-α/2, n-2} · se` of a two-sided confidence interval.
pub fn confidence_half_width(
    standard_error: f64,
    n: usize,
    confidence_level: f64,
) -> Result<f64, StatsError> {
    if n < 3 {
        return Err(StatsError::TooFewPoints(n));
    }
    let alpha = 1.0 - confidence_level;
    let critical = student_t_ppf(1.0 - alpha / 2.0, (n - 2) as f64)
        .ok_or(StatsError::InvalidConfidenceLevel(confidence_level))?;
    Ok(critical * standard_error)
}

/// Fits `y = slope·x + intercept` and attaches confidence intervals at `confidence_level`.
pub fn linear_regression(
    x: &[f64],
    y: &[f64],
    confidence_level: f64,
) -> Result<RegressionSummary, StatsError> {
    check_lengths(x, y)?;
    if x.len() < 3 {
        return Err(StatsError::TooFewPoints(x.len()));
    }
    let fit = ols(x, y)?;
    let res = residuals(x, y, &fit);
    let n = x.len();
    Ok(RegressionSummary {
        fit,
        slope_half_width: confidence_half_width(se_slope(x, &res), n, confidence_level)?,
        intercept_half_width: confidence_half_width(se_intercept(x, &res), n, confidence_level)?,
        confidence_level,
        n,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn ols_recovers_exact_line() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y: Vec<f64> = x.iter().map(|v| 2.5 * v - 1.0).collect();
        let fit = ols(&x, &y).unwrap();
        assert!((fit.slope - 2.5).abs() < TOLERANCE);
        assert!((fit.intercept + 1.0).abs() < TOLERANCE);
        assert!((ols_intercept(&x, &y).unwrap() + 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn ols_slope_matches_closed_form_on_noisy_data() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let y = [1.0, 3.0, 2.0, 5.0];
        // Sxy = 5.5, Sxx = 5.
        assert!((ols_slope(&x, &y).unwrap() - 1.1).abs() < TOLERANCE);
    }

    #[test]
    fn standard_errors_match_hand_computation() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let y = [1.0, 3.0, 2.0, 5.0];
        let fit = ols(&x, &y).unwrap();
        let res = residuals(&x, &y, &fit);
        // intercept = 2.75 - 1.1 * 1.5 = 1.1; residuals = [-0.1, 0.8, -1.3, 0.6].
        assert!((sse(&res) - 2.7).abs() < 1e-12);
        assert!((residual_variance(&res) - 1.35).abs() < 1e-12);
        assert!((se_slope(&x, &res) - (1.35f64 / 5.0).sqrt()).abs() < 1e-12);
        let expected_se_b = (1.35f64 * (0.25 + 2.25 / 5.0)).sqrt();
        assert!((se_intercept(&x, &res) - expected_se_b).abs() < 1e-12);
    }

    #[test]
    fn perfect_fit_has_zero_width_intervals() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [2.0, 4.0, 6.0, 8.0];
        let summary = linear_regression(&x, &y, 0.95).unwrap();
        assert!(summary.slope_half_width.abs() < 1e-9);
        assert!(summary.intercept_half_width.abs() < 1e-9);
    }

    #[test]
    fn confidence_half_width_uses_student_t_quantile() {
        let half = confidence_half_width(1.0, 12, 0.95).unwrap();
        assert!((half - 2.228_138_852).abs() < 1e-6);
    }

    #[test]
    fn regression_rejects_invalid_inputs() {
        assert_eq!(
            ols(&[1.0, 2.0], &[1.0]),
            Err(StatsError::LengthMismatch { x: 2, y: 1 })
        );
        assert_eq!(
            linear_regression(&[1.0, 2.0], &[1.0, 2.0], 0.95),
            Err(StatsError::TooFewPoints(2))
        );
        assert_eq!(
            ols(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]),
            Err(StatsError::DegenerateX)
        );
        assert_eq!(
            confidence_half_width(1.0, 10, 1.5),
            Err(StatsError::InvalidConfidenceLevel(1.5))
        );
    }
}
