use nalgebra::{DMatrix, SymmetricEigen};
use tracing::{debug, instrument};

use super::error::EngineError;
use crate::core::numerics::{linspace, trapezoid};
use crate::core::potentials::OscillatorPotential;

/// Uniform grid `linspace(−L/2, L/2, N)` in bohr.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OscillatorGrid {
    pub length: f64,
    pub points: usize,
}

impl Default for OscillatorGrid {
    fn default() -> Self {
        Self {
            length: 40.0,
            points: 2000,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Eigenstate {
    pub energy: f64,
    /// Normalized so that `∫ψ² dx = 1` under the trapezoid rule.
    pub wavefunction: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    pub potential: OscillatorPotential,
    pub grid: Vec<f64>,
    pub states: Vec<Eigenstate>,
}

impl Spectrum {
    pub fn energies(&self) -> Vec<f64> {
        self.states.iter().map(|s| s.energy).collect()
    }
}

/// Finite-difference solver for `−ħ²/(2m) ψ'' + V ψ = E ψ` with ħ = m = 1.
#[derive(Debug, Clone)]
pub struct SchrodingerSolver {
    potential: OscillatorPotential,
    grid: Vec<f64>,
    dx: f64,
    hbar: f64,
    mass: f64,
}

impl SchrodingerSolver {
    pub fn new(potential: OscillatorPotential, grid: OscillatorGrid) -> Result<Self, EngineError> {
        if grid.points < 3 {
            return Err(EngineError::invalid(
                "points",
                format!("grid needs at least 3 points, got {}", grid.points),
            ));
        }
        if !(grid.length > 0.0) {
            return Err(EngineError::invalid(
                "length",
                format!("must be positive, got {}", grid.length),
            ));
        }
        let x = linspace(-grid.length / 2.0, grid.length / 2.0, grid.points);
        let dx = x[1] - x[0];
        Ok(Self {
            potential,
            grid: x,
            dx,
            hbar: 1.0,
            mass: 1.0,
        })
    }

    pub fn grid(&self) -> &[f64] {
        &self.grid
    }

    /// Second-derivative stencil `(1, −2, 1)/dx²` with Dirichlet walls.
    pub fn laplacian(&self) -> DMatrix<f64> {
        let n = self.grid.len();
        let inv_dx2 = 1.0 / (self.dx * self.dx);
        DMatrix::from_fn(n, n, |i, j| {
            if i == j {
                -2.0 * inv_dx2
            } else if i.abs_diff(j) == 1 {
                inv_dx2
            } else {
                0.0
            }
        })
    }

    pub fn hamiltonian(&self) -> DMatrix<f64> {
        let mut h = self.laplacian() * (-self.hbar * self.hbar / (2.0 * self.mass));
        for (i, &x) in self.grid.iter().enumerate() {
            h[(i, i)] += self.potential.energy(x);
        }
        h
    }

    /// Lowest `count` eigenstates in ascending energy.
    #[instrument(skip_all, name = "schrodinger_solve", fields(potential = self.potential.label()))]
    pub fn solve(&self, count: usize) -> Result<Spectrum, EngineError> {
        let n = self.grid.len();
        if count > n {
            return Err(EngineError::TooFewStates {
                requested: count,
                available: n,
            });
        }
        debug!(dimension = n, "Diagonalizing Hamiltonian.");
        let eigen = SymmetricEigen::new(self.hamiltonian());

        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| eigen.eigenvalues[a].total_cmp(&eigen.eigenvalues[b]));

        let states = order
            .into_iter()
            .take(count)
            .map(|k| {
                let column: Vec<f64> = eigen.eigenvectors.column(k).iter().copied().collect();
                Ok(Eigenstate {
                    energy: eigen.eigenvalues[k],
                    wavefunction: self.normalize(column)?,
                })
            })
            .collect::<Result<Vec<_>, EngineError>>()?;

        Ok(Spectrum {
            potential: self.potential,
            grid: self.grid.clone(),
            states,
        })
    }

    /// Scales to unit norm and fixes the sign so the first significant lobe is positive.
    fn normalize(&self, mut psi: Vec<f64>) -> Result<Vec<f64>, EngineError> {
        let density: Vec<f64> = psi.iter().map(|v| v * v).collect();
        let norm = trapezoid(&density, &self.grid)?.sqrt();
        let peak = psi.iter().fold(0.0f64, |m, v| m.max(v.abs()));
        let sign = psi
            .iter()
            .find(|v| v.abs() > 1e-3 * peak)
            .map_or(1.0, |v| v.signum());
        psi.iter_mut().for_each(|v| *v *= sign / norm);
        Ok(psi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_grid() -> OscillatorGrid {
        OscillatorGrid {
            length: 20.0,
            points: 400,
        }
    }

    #[test]
    fn harmonic_levels_are_half_integers() {
        let solver = SchrodingerSolver::new(OscillatorPotential::unit_harmonic(), small_grid()).unwrap();
        let spectrum = solver.solve(5).unwrap();
        for (n, energy) in spectrum.energies().iter().enumerate() {
            assert!((energy - (n as f64 + 0.5)).abs() < 1e-2, "level {n}: {energy}");
        }
    }

    #[test]
    fn morse_levels_follow_anharmonic_formula() {
        let depth = 10.0;
        let solver =
            SchrodingerSolver::new(OscillatorPotential::matched_morse(depth), small_grid()).unwrap();
        let spectrum = solver.solve(3).unwrap();
        for (n, energy) in spectrum.energies().iter().enumerate() {
            let v = n as f64 + 0.5;
            let expected = v - v * v / (4.0 * depth);
            assert!((energy - expected).abs() < 1e-2, "level {n}: {energy} vs {expected}");
        }
    }

    #[test]
    fn wavefunctions_are_normalized_and_positive_first() {
        let solver = SchrodingerSolver::new(OscillatorPotential::unit_harmonic(), small_grid()).unwrap();
        let spectrum = solver.solve(3).unwrap();
        for state in &spectrum.states {
            let density: Vec<f64> = state.wavefunction.iter().map(|v| v * v).collect();
            let norm = trapezoid(&density, solver.grid()).unwrap();
            assert!((norm - 1.0).abs() < 1e-10);
        }
        let ground = &spectrum.states[0].wavefunction;
        assert!(ground[ground.len() / 2] > 0.0);
    }

    #[test]
    fn hamiltonian_is_tridiagonal_plus_potential() {
        let grid = OscillatorGrid {
            length: 2.0,
            points: 3,
        };
        let solver = SchrodingerSolver::new(OscillatorPotential::unit_harmonic(), grid).unwrap();
        let h = solver.hamiltonian();
        // dx = 1: kinetic diagonal 1, off-diagonal −0.5, V(±1) = 0.5.
        assert!((h[(0, 0)] - 1.5).abs() < 1e-12);
        assert!((h[(1, 1)] - 1.0).abs() < 1e-12);
        assert!((h[(0, 1)] + 0.5).abs() < 1e-12);
        assert_eq!(h[(0, 2)], 0.0);
    }

    #[test]
    fn requesting_more_states_than_grid_points_fails() {
        let grid = OscillatorGrid {
            length: 2.0,
            points: 3,
        };
        let solver = SchrodingerSolver::new(OscillatorPotential::unit_harmonic(), grid).unwrap();
        assert!(matches!(
            solver.solve(4),
            Err(EngineError::TooFewStates {
                requested: 4,
                available: 3
            })
        ));
    }
}
