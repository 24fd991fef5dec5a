//! Grids, trapezoid quadrature and finite-difference gradients.
//!
//! The routines mirror the conventions of the common array libraries so that tabulated
//! results are directly comparable: [`linspace`] includes both endpoints, [`arange`]
//! excludes the stop value, and [`gradient`] uses second-order central differences on a
//! (possibly non-uniform) grid with first-order one-sided differences at the boundaries.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum NumericsError {
    #[error("Length mismatch: {left} values against {right} abscissae")]
    LengthMismatch { left: usize, right: usize },

    #[error("At least {required} points are required, got {actual}")]
    TooFewPoints { required: usize, actual: usize },

    #[error("Invalid step {0}: step must be finite and non-zero")]
    InvalidStep(f64),

    #[error("Repeated abscissa at index {0}: spacing must be non-zero")]
    ZeroSpacing(usize),
}

/// `n` evenly spaced samples over `[start, stop]`, endpoints included.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n)
                .map(|i| {
                    if i == n - 1 {
                        stop
                    } else {
                        start + step * i as f64
                    }
                })
                .collect()
        }
    }
}

/// Values `start, start + step, …` strictly below `stop` (above it for negative steps).
pub fn arange(start: f64, stop: f64, step: f64) -> Result<Vec<f64>, NumericsError> {
    if step == 0.0 || !step.is_finite() {
        return Err(NumericsError::InvalidStep(step));
    }
    let count = ((stop - start) / step).ceil();
    if count <= 0.0 {
        return Ok(Vec::new());
    }
    Ok((0..count as usize)
        .map(|i| start + step * i as f64)
        .collect())
}

pub fn trapezoid(y: &[f64], x: &[f64]) -> Result<f64, NumericsError> {
    if y.len() != x.len() {
        return Err(NumericsError::LengthMismatch {
            left: y.len(),
            right: x.len(),
        });
    }
    Ok(x.windows(2)
        .zip(y.windows(2))
        .map(|(xs, ys)| 0.5 * (xs[1] - xs[0]) * (ys[0] + ys[1]))
        .sum())
}

/// Per-node weights `w` such that `Σ wᵢ·yᵢ` equals [`trapezoid`] on the same grid.
pub fn trapezoid_weights(x: &[f64]) -> Vec<f64> {
    let mut weights = vec![0.0; x.len()];
    for (i, pair) in x.windows(2).enumerate() {
        let half = 0.5 * (pair[1] - pair[0]);
        weights[i] += half;
        weights[i + 1] += half;
    }
    weights
}

pub fn gradient(y: &[f64], x: &[f64]) -> Result<Vec<f64>, NumericsError> {
    if y.len() != x.len() {
        return Err(NumericsError::LengthMismatch {
            left: y.len(),
            right: x.len(),
        });
    }
    let n = y.len();
    if n < 2 {
        return Err(NumericsError::TooFewPoints {
            required: 2,
            actual: n,
        });
    }
    for (i, pair) in x.windows(2).enumerate() {
        if pair[1] == pair[0] {
            return Err(NumericsError::ZeroSpacing(i + 1));
        }
    }

    let mut out = vec![0.0; n];
    out[0] = (y[1] - y[0]) / (x[1] - x[0]);
    out[n - 1] = (y[n - 1] - y[n - 2]) / (x[n - 1] - x[n - 2]);
    for i in 1..n - 1 {
        let hs = x[i] - x[i - 1];
        let hd = x[i + 1] - x[i];
        out[i] = (hs * hs * y[i + 1] + (hd * hd - hs * hs) * y[i] - hd * hd * y[i - 1])
            / (hs * hd * (hd + hs));
    }
    Ok(out)
}
