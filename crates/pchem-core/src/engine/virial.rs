use std::f64::consts::PI;
use tracing::{debug, instrument};

use super::error::EngineError;
use super::progress::ProgressReporter;
use crate::core::constants::{AVOGADRO_VIRIAL, BOLTZMANN_EV_PER_K};
use crate::core::numerics::{linspace, trapezoid};
use crate::core::potentials::PairPotential;

/// Radial grid used for the Mayer-function quadrature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialGrid {
    /// First abscissa (Å); kept positive so `r⁻¹²` stays finite.
    pub r_min: f64,
    /// Upper bound as a multiple of the potential's `σ`.
    pub cutoff_sigmas: f64,
    pub points: usize,
}

impl Default for RadialGrid {
    fn default() -> Self {
        Self {
            r_min: 1e-6,
            cutoff_sigmas: 5.0,
            points: 1000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VirialPoint {
    pub temperature: f64,
    pub b2v: f64,
}

/// Second virial coefficient `B₂V(T) = −2π N_A ∫ (e^{−u(r)/k_BT} − 1) r² dr`, in Å³/mol.
#[derive(Debug, Clone)]
pub struct SecondVirialCoefficient {
    potential: PairPotential,
    r: Vec<f64>,
}

impl SecondVirialCoefficient {
    pub fn new(potential: PairPotential) -> Self {
        let grid = RadialGrid::default();
        Self {
            potential,
            r: linspace(grid.r_min, grid.cutoff_sigmas * potential.sigma(), grid.points),
        }
    }

    pub fn with_grid(potential: PairPotential, grid: RadialGrid) -> Result<Self, EngineError> {
        if grid.points < 2 {
            return Err(EngineError::invalid(
                "points",
                format!("radial grid needs at least 2 points, got {}", grid.points),
            ));
        }
        let r_max = grid.cutoff_sigmas * potential.sigma();
        if !(grid.r_min > 0.0 && r_max > grid.r_min) {
            return Err(EngineError::invalid(
                "r_min",
                format!("expected 0 < r_min < {r_max}, got {}", grid.r_min),
            ));
        }
        Ok(Self {
            potential,
            r: linspace(grid.r_min, r_max, grid.points),
        })
    }

    pub fn potential(&self) -> &PairPotential {
        &self.potential
    }

    pub fn radii(&self) -> &[f64] {
        &self.r
    }

    /// Mayer function weighted by `r²` on the radial grid.
    pub fn integrand(&self, temperature: f64) -> Vec<f64> {
        let kt = BOLTZMANN_EV_PER_K * temperature;
        self.r
            .iter()
            .map(|&r| ((-self.potential.energy(r) / kt).exp() - 1.0) * r * r)
            .collect()
    }

    pub fn integrate(&self, temperature: f64) -> Result<f64, EngineError> {
        if !(temperature > 0.0) {
            return Err(EngineError::invalid(
                "temperature",
                format!("must be positive, got {temperature}"),
            ));
        }
        let integral = trapezoid(&self.integrand(temperature), &self.r)?;
        Ok(-2.0 * PI * AVOGADRO_VIRIAL * integral)
    }

    #[instrument(skip_all, name = "virial_tabulation", fields(potential = self.potential.name()))]
    pub fn tabulate(
        &self,
        temperatures: &[f64],
        reporter: &ProgressReporter,
    ) -> Result<Vec<VirialPoint>, EngineError> {
        let task = reporter.task(temperatures.len() as u64);
        let points = temperatures
            .iter()
            .map(|&temperature| -> Result<VirialPoint, EngineError> {
                let b2v = self.integrate(temperature)?;
                task.tick();
                Ok(VirialPoint { temperature, b2v })
            })
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = points.len(), "Tabulated B2V.");
        Ok(points)
    }
}

/// Closed-form hard-sphere limit `2π N_A σ³ / 3`.
pub fn hard_sphere_b2v(sigma: f64) -> f64 {
    2.0 * PI * AVOGADRO_VIRIAL * sigma.powi(3) / 3.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hard_sphere_b2v_is_temperature_independent() {
        let integrator = SecondVirialCoefficient::new(PairPotential::hard_sphere_argon());
        let expected = hard_sphere_b2v(3.4);
        let cold = integrator.integrate(100.0).unwrap();
        let hot = integrator.integrate(1480.0).unwrap();
        assert!((cold - expected).abs() / expected < 0.01);
        assert!((cold - hot).abs() / expected < 1e-12);
    }

    #[test]
    fn square_well_b2v_increases_toward_hard_sphere_limit() {
        let integrator = SecondVirialCoefficient::new(PairPotential::square_well_argon());
        let hard = SecondVirialCoefficient::new(PairPotential::hard_sphere_argon())
            .integrate(300.0)
            .unwrap();
        let low = integrator.integrate(100.0).unwrap();
        let high = integrator.integrate(1400.0).unwrap();
        assert!(low < high);
        assert!(high < hard);
    }

    #[test]
    fn lennard_jones_b2v_is_negative_when_cold() {
        let integrator = SecondVirialCoefficient::new(PairPotential::lennard_jones_argon());
        assert!(integrator.integrate(100.0).unwrap() < 0.0);
        assert!(integrator.integrate(1400.0).unwrap() > integrator.integrate(100.0).unwrap());
    }

    #[test]
    fn tabulate_sweeps_every_temperature() {
        let integrator = SecondVirialCoefficient::new(PairPotential::lennard_jones_argon());
        let table = integrator
            .tabulate(&[100.0, 200.0, 300.0], &ProgressReporter::new())
            .unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table[1].temperature, 200.0);
        assert!(table.iter().all(|p| p.b2v.is_finite()));
    }

    #[test]
    fn non_positive_temperature_is_rejected() {
        let integrator = SecondVirialCoefficient::new(PairPotential::hard_sphere_argon());
        assert!(matches!(
            integrator.integrate(0.0),
            Err(EngineError::InvalidParameter { name: "temperature", .. })
        ));
    }

    #[test]
    fn custom_grid_is_validated() {
        let grid = RadialGrid {
            points: 1,
            ..Default::default()
        };
        assert!(SecondVirialCoefficient::with_grid(PairPotential::hard_sphere_argon(), grid).is_err());
    }
}
