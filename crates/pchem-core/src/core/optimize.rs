use std::cell::Cell;
use thiserror::Error;
use tracing::{trace, warn};

const REFLECTION: f64 = 1.0;
const EXPANSION: f64 = 2.0;
const CONTRACTION: f64 = 0.5;
const SHRINK: f64 = 0.5;
const NONZERO_DELTA: f64 = 0.05;
const ZERO_DELTA: f64 = 0.00025;

#[derive(Debug, Error, PartialEq)]
pub enum OptimizeError {
    #[error("Initial guess must contain at least one coordinate")]
    EmptyGuess,
    #[error("Objective is not finite at the initial guess")]
    NonFiniteStart,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NelderMeadOptions {
    /// Absolute tolerance on both the simplex spread and the function spread.
    pub tol: f64,
    /// Defaults to `200 · dimension` when `None`.
    pub max_iterations: Option<usize>,
}

impl Default for NelderMeadOptions {
    fn default() -> Self {
        Self {
            tol: 1e-6,
            max_iterations: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Minimum {
    pub x: Vec<f64>,
    pub value: f64,
    pub iterations: usize,
    pub evaluations: usize,
    pub converged: bool,
}

/// Minimizes `objective` with the downhill simplex method.
///
/// Non-convergence is not an error: the best vertex found is returned with
/// `converged == false` and a warning is logged.
pub fn nelder_mead<F>(
    objective: F,
    guess: &[f64],
    options: NelderMeadOptions,
) -> Result<Minimum, OptimizeError>
where
    F: Fn(&[f64]) -> f64,
{
    let dim = guess.len();
    if dim == 0 {
        return Err(OptimizeError::EmptyGuess);
    }
    let max_iterations = options.max_iterations.unwrap_or(200 * dim);

    let evaluations = Cell::new(0usize);
    let eval = |x: &[f64]| {
        evaluations.set(evaluations.get() + 1);
        objective(x)
    };

    let mut simplex: Vec<Vec<f64>> = Vec::with_capacity(dim + 1);
    simplex.push(guess.to_vec());
    for k in 0..dim {
        let mut vertex = guess.to_vec();
        vertex[k] = if vertex[k] != 0.0 {
            (1.0 + NONZERO_DELTA) * vertex[k]
        } else {
            ZERO_DELTA
        };
        simplex.push(vertex);
    }
    let mut values: Vec<f64> = simplex.iter().map(|v| eval(v.as_slice())).collect();
    if !values[0].is_finite() {
        return Err(OptimizeError::NonFiniteStart);
    }
    sort_simplex(&mut simplex, &mut values);

    let mut iterations = 0usize;
    let mut converged = false;
    while iterations < max_iterations {
        if has_converged(&simplex, &values, options.tol) {
            converged = true;
            break;
        }

        let centroid = centroid(&simplex[..dim]);
        let worst = simplex[dim].clone();
        let f_worst = values[dim];

        let reflected = affine(&centroid, &worst, 1.0 + REFLECTION, -REFLECTION);
        let f_reflected = eval(reflected.as_slice());
        let mut shrink = false;

        if f_reflected < values[0] {
            let expanded = affine(
                &centroid,
                &worst,
                1.0 + REFLECTION * EXPANSION,
                -REFLECTION * EXPANSION,
            );
            let f_expanded = eval(expanded.as_slice());
            if f_expanded < f_reflected {
                simplex[dim] = expanded;
                values[dim] = f_expanded;
            } else {
                simplex[dim] = reflected;
                values[dim] = f_reflected;
            }
        } else if f_reflected < values[dim - 1] {
            simplex[dim] = reflected;
            values[dim] = f_reflected;
        } else if f_reflected < f_worst {
            let outside = affine(
                &centroid,
                &worst,
                1.0 + CONTRACTION * REFLECTION,
                -CONTRACTION * REFLECTION,
            );
            let f_outside = eval(outside.as_slice());
            if f_outside <= f_reflected {
                simplex[dim] = outside;
                values[dim] = f_outside;
            } else {
                shrink = true;
            }
        } else {
            let inside = affine(&centroid, &worst, 1.0 - CONTRACTION, CONTRACTION);
            let f_inside = eval(inside.as_slice());
            if f_inside < f_worst {
                simplex[dim] = inside;
                values[dim] = f_inside;
            } else {
                shrink = true;
            }
        }

        if shrink {
            let best = simplex[0].clone();
            for j in 1..=dim {
                simplex[j] = affine(&best, &simplex[j], 1.0 - SHRINK, SHRINK);
                values[j] = eval(simplex[j].as_slice());
            }
        }

        iterations += 1;
        sort_simplex(&mut simplex, &mut values);
        trace!(iteration = iterations, best = values[0], "Nelder-Mead step");
    }

    if !converged {
        converged = has_converged(&simplex, &values, options.tol);
    }
    if !converged {
        warn!(
            iterations,
            "Nelder-Mead stopped before reaching the requested tolerance."
        );
    }

    Ok(Minimum {
        x: simplex.swap_remove(0),
        value: values[0],
        iterations,
        evaluations: evaluations.get(),
        converged,
    })
}

fn has_converged(simplex: &[Vec<f64>], values: &[f64], tol: f64) -> bool {
    let best = &simplex[0];
    let x_spread = simplex[1..]
        .iter()
        .flat_map(|v| v.iter().zip(best).map(|(a, b)| (a - b).abs()))
        .fold(0.0, f64::max);
    let f_spread = values[1..]
        .iter()
        .map(|f| (f - values[0]).abs())
        .fold(0.0, f64::max);
    x_spread <= tol && f_spread <= tol
}

fn centroid(vertices: &[Vec<f64>]) -> Vec<f64> {
    let n = vertices.len() as f64;
    let mut c = vec![0.0; vertices[0].len()];
    for v in vertices {
        for (ci, vi) in c.iter_mut().zip(v) {
            *ci += vi;
        }
    }
    c.iter_mut().for_each(|ci| *ci /= n);
    c
}

/// `a·p + b·q`, component-wise.
fn affine(p: &[f64], q: &[f64], a: f64, b: f64) -> Vec<f64> {
    p.iter().zip(q).map(|(pi, qi)| a * pi + b * qi).collect()
}

fn sort_simplex(simplex: &mut [Vec<f64>], values: &mut [f64]) {
    let mut paired: Vec<(f64, Vec<f64>)> = values
        .iter()
        .copied()
        .zip(simplex.iter_mut().map(std::mem::take))
        .collect();
    paired.sort_by(|a, b| a.0.total_cmp(&b.0));
    for (i, (value, vertex)) in paired.into_iter().enumerate() {
        values[i] = value;
        simplex[i] = vertex;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_simplex_orders_vertices_by_value() {
        let mut simplex = vec![vec![2.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]];
        let mut values = vec![3.0, -1.0, 0.5];
        sort_simplex(&mut simplex, &mut values);
        assert_eq!(values, [-1.0, 0.5, 3.0]);
        assert_eq!(simplex, [vec![0.0, 1.0], vec![1.0, 1.0], vec![2.0, 0.0]]);
    }

    #[test]
    fn minimizes_one_dimensional_parabola() {
        let result = nelder_mead(|x| (x[0] - 3.0).powi(2) + 1.0, &[0.0], Default::default())
            .unwrap();
        assert!(result.converged);
        assert!((result.x[0] - 3.0).abs() < 1e-3);
        assert!((result.value - 1.0).abs() < 1e-6);
    }

    #[test]
    fn minimizes_rosenbrock_function() {
        let rosenbrock = |x: &[f64]| (1.0 - x[0]).powi(2) + 100.0 * (x[1] - x[0] * x[0]).powi(2);
        let options = NelderMeadOptions {
            tol: 1e-10,
            max_iterations: Some(5000),
        };
        let result = nelder_mead(rosenbrock, &[-1.2, 1.0], options).unwrap();
        assert!((result.x[0] - 1.0).abs() < 1e-3);
        assert!((result.x[1] - 1.0).abs() < 1e-3);
    }

    #[test]
    fn reports_non_convergence_without_failing() {
        let options = NelderMeadOptions {
            tol: 1e-14,
            max_iterations: Some(3),
        };
        let result = nelder_mead(|x| x[0].powi(2) + x[1].powi(2), &[5.0, 5.0], options).unwrap();
        assert!(!result.converged);
        assert_eq!(result.iterations, 3);
    }

    #[test]
    fn empty_guess_is_rejected() {
        let err = nelder_mead(|_| 0.0, &[], Default::default()).unwrap_err();
        assert_eq!(err, OptimizeError::EmptyGuess);
    }

    #[test]
    fn non_finite_start_is_rejected() {
        let err = nelder_mead(|_| f64::NAN, &[1.0], Default::default()).unwrap_err();
        assert_eq!(err, OptimizeError::NonFiniteStart);
    }
}
