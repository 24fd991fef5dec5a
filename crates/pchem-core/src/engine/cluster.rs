//! Lennard-Jones argon clusters.
//!
//! The dimer is a one-parameter problem in the interatomic distance. The trimer is placed in
//! the xy-plane with atom 1 at the origin, atom 2 on the x-axis at `r12` and atom 3 at
//! `(x3, y3)`, so three coordinates describe every geometry up to rigid motion.

use nalgebra::Point3;
use tracing::{info, instrument};

use super::error::EngineError;
use crate::core::geometry::{bond_angle, bond_length};
use crate::core::optimize::{Minimum, NelderMeadOptions, nelder_mead};
use crate::core::potentials::lennard_jones;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArgonCluster {
    /// Well depth (eV).
    pub epsilon: f64,
    /// Zero-crossing distance (Å).
    pub sigma: f64,
    pub options: NelderMeadOptions,
}

impl Default for ArgonCluster {
    fn default() -> Self {
        Self {
            epsilon: 0.01,
            sigma: 3.4,
            options: NelderMeadOptions::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dimer {
    pub distance: f64,
    pub energy: f64,
    pub converged: bool,
}

impl Dimer {
    pub fn positions(&self) -> [Point3<f64>; 2] {
        [Point3::origin(), Point3::new(self.distance, 0.0, 0.0)]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trimer {
    pub positions: [Point3<f64>; 3],
    pub energy: f64,
    pub converged: bool,
}

impl Trimer {
    pub fn r12(&self) -> f64 {
        bond_length(&self.positions[0], &self.positions[1])
    }

    pub fn r13(&self) -> f64 {
        bond_length(&self.positions[0], &self.positions[2])
    }

    pub fn r23(&self) -> f64 {
        bond_length(&self.positions[1], &self.positions[2])
    }

    /// Interior angles in degrees with atoms 1, 2 and 3 as the vertex, in that order.
    pub fn angles(&self) -> [f64; 3] {
        let [a1, a2, a3] = &self.positions;
        [
            bond_angle(a2, a1, a3),
            bond_angle(a1, a2, a3),
            bond_angle(a1, a3, a2),
        ]
    }
}

impl ArgonCluster {
    #[inline]
    pub fn pair_energy(&self, r: f64) -> f64 {
        lennard_jones(r, self.epsilon, self.sigma)
    }

    /// Total energy of the planar trimer parameterized as `[r12, x3, y3]`.
    pub fn trimer_energy(&self, params: &[f64]) -> f64 {
        let (r12, x3, y3) = (params[0], params[1], params[2]);
        let r13 = (x3 * x3 + y3 * y3).sqrt();
        let r23 = ((r12 - x3).powi(2) + y3 * y3).sqrt();
        self.pair_energy(r12) + self.pair_energy(r13) + self.pair_energy(r23)
    }

    #[instrument(skip_all, name = "dimer_optimization")]
    pub fn optimize_dimer(&self, guess: f64) -> Result<Dimer, EngineError> {
        let Minimum {
            x, value, converged, ..
        } = nelder_mead(|p| self.pair_energy(p[0]), &[guess], self.options)?;
        info!(distance = x[0], energy = value, "Optimized Ar2 geometry.");
        Ok(Dimer {
            distance: x[0],
            energy: value,
            converged,
        })
    }

    #[instrument(skip_all, name = "trimer_optimization")]
    pub fn optimize_trimer(&self, guess: [f64; 3]) -> Result<Trimer, EngineError> {
        let Minimum {
            x, value, converged, ..
        } = nelder_mead(|p| self.trimer_energy(p), &guess, self.options)?;
        let trimer = Trimer {
            positions: [
                Point3::origin(),
                Point3::new(x[0], 0.0, 0.0),
                Point3::new(x[1], x[2], 0.0),
            ],
            energy: value,
            converged,
        };
        info!(
            r12 = trimer.r12(),
            r13 = trimer.r13(),
            r23 = trimer.r23(),
            energy = value,
            "Optimized Ar3 geometry."
        );
        Ok(trimer)
    }

    /// Samples the pair potential on `distances` for plotting.
    pub fn potential_curve(&self, distances: &[f64]) -> Vec<f64> {
        distances.iter().map(|&r| self.pair_energy(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::potentials::lennard_jones_minimum;

    #[test]
    fn dimer_relaxes_to_lennard_jones_minimum() {
        let cluster = ArgonCluster::default();
        let dimer = cluster.optimize_dimer(4.0).unwrap();
        assert!(dimer.converged);
        assert!((dimer.distance - lennard_jones_minimum(3.4)).abs() < 1e-3);
        assert!((dimer.energy + 0.01).abs() < 1e-8);
        assert_eq!(dimer.positions()[1].x, dimer.distance);
    }

    #[test]
    fn trimer_relaxes_to_equilateral_triangle() {
        let cluster = ArgonCluster::default();
        let trimer = cluster.optimize_trimer([4.0, 4.0, 4.0]).unwrap();
        let r_min = lennard_jones_minimum(3.4);
        for r in [trimer.r12(), trimer.r13(), trimer.r23()] {
            assert!((r - r_min).abs() < 1e-2, "distance {r}");
        }
        for angle in trimer.angles() {
            assert!((angle - 60.0).abs() < 0.5, "angle {angle}");
        }
        assert!((trimer.energy + 0.03).abs() < 1e-5);
        assert!(trimer.positions.iter().all(|p| p.z == 0.0));
    }

    #[test]
    fn trimer_energy_sums_three_pairs() {
        let cluster = ArgonCluster::default();
        let r = lennard_jones_minimum(3.4);
        let h = r * 3f64.sqrt() / 2.0;
        let energy = cluster.trimer_energy(&[r, r / 2.0, h]);
        assert!((energy + 0.03).abs() < 1e-12);
    }

    #[test]
    fn potential_curve_crosses_zero_at_sigma() {
        let cluster = ArgonCluster::default();
        let curve = cluster.potential_curve(&[3.4, lennard_jones_minimum(3.4)]);
        assert!(curve[0].abs() < 1e-15);
        assert!((curve[1] + 0.01).abs() < 1e-12);
    }
}
