//! Canonical-ensemble thermodynamics from a partition function.
//!
//! On a temperature grid the ensemble evaluates `Z(T)` and derives
//! `U = −∂lnZ/∂β`, `F = −k_B T lnZ`, `S = −∂F/∂T` and `C_v = ∂U/∂T` with
//! finite-difference gradients. All energies are in joules.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::error::EngineError;
use super::progress::ProgressReporter;
use crate::core::constants::{BOLTZMANN_J_PER_K, ELECTRON_VOLT_J, PLANCK_J_S};
use crate::core::numerics::{gradient, linspace, trapezoid_weights};
use crate::core::potentials::lennard_jones;

pub trait PartitionFunction {
    fn name(&self) -> String;

    /// `Z(T)` for every temperature of the grid.
    fn evaluate(
        &self,
        temperatures: &[f64],
        reporter: &ProgressReporter,
    ) -> Result<Vec<f64>, EngineError>;
}

/// Electronic levels of a Ce³⁺ ion under increasingly detailed Hamiltonians.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CeriumModel {
    /// 14-fold degenerate 4f¹ manifold.
    Isolated,
    /// ²F₅/₂ (6) and ²F₇/₂ (8) split by 0.28 eV.
    SpinOrbit,
    /// Spin-orbit levels further split by the crystal field.
    CrystalField,
}

const SPIN_ORBIT_SPLITTING_EV: f64 = 0.28;
const CRYSTAL_FIELD_LEVELS: [(f64, f64); 5] = [
    (4.0, 0.0),
    (2.0, 0.12),
    (2.0, 0.12 + 0.13),
    (4.0, 0.12 + 0.13 + 0.07),
    (2.0, 0.12 + 0.13 + 0.07 + 0.14),
];

impl CeriumModel {
    pub const ALL: [CeriumModel; 3] = [Self::Isolated, Self::SpinOrbit, Self::CrystalField];

    /// Label used in tables and plot legends.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Isolated => "isolated",
            Self::SpinOrbit => "soc",
            Self::CrystalField => "soc and cfs",
        }
    }

    /// Degeneracy and energy (eV) of every level.
    pub fn levels(&self) -> Vec<(f64, f64)> {
        match self {
            Self::Isolated => vec![(14.0, 0.0)],
            Self::SpinOrbit => vec![(6.0, 0.0), (8.0, SPIN_ORBIT_SPLITTING_EV)],
            Self::CrystalField => CRYSTAL_FIELD_LEVELS.to_vec(),
        }
    }

    pub fn partition(&self, temperature: f64) -> f64 {
        let kt = BOLTZMANN_J_PER_K * temperature;
        self.levels()
            .iter()
            .map(|&(g, e_ev)| g * (-e_ev * ELECTRON_VOLT_J / kt).exp())
            .sum()
    }
}

impl PartitionFunction for CeriumModel {
    fn name(&self) -> String {
        self.label().to_string()
    }

    fn evaluate(&self, temperatures: &[f64], _: &ProgressReporter) -> Result<Vec<f64>, EngineError> {
        Ok(temperatures.iter().map(|&t| self.partition(t)).collect())
    }
}

/// Classical partition function of two Lennard-Jones atoms in a cubic box.
///
/// The six-dimensional trapezoid integral over both positions depends only on the
/// displacement between the atoms, so the per-axis weights are folded into displacement
/// weights `c_d = Σ_{i−j=d} w_i w_j` and the integral becomes a sum over `(2n−1)³`
/// displacement vectors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LennardJonesPair {
    /// eV
    pub epsilon: f64,
    /// Å
    pub sigma: f64,
    /// Box side (Å).
    pub box_length: f64,
    /// Grid points per axis.
    pub grid_points: usize,
}

impl Default for LennardJonesPair {
    fn default() -> Self {
        Self {
            epsilon: 0.0103,
            sigma: 3.4,
            box_length: 10.0,
            grid_points: 10,
        }
    }
}

struct Displacement {
    distance: f64,
    weight: f64,
}

impl LennardJonesPair {
    /// Pair energy in joules; coincident atoms are assigned an infinite energy.
    fn energy_j(&self, r: f64) -> f64 {
        if r == 0.0 {
            f64::INFINITY
        } else {
            lennard_jones(r, self.epsilon, self.sigma) * ELECTRON_VOLT_J
        }
    }

    fn displacements(&self) -> Result<Vec<Displacement>, EngineError> {
        let n = self.grid_points;
        if n < 2 {
            return Err(EngineError::invalid(
                "grid_points",
                format!("need at least 2 points per axis, got {n}"),
            ));
        }
        if !(self.box_length > 0.0) {
            return Err(EngineError::invalid(
                "box_length",
                format!("must be positive, got {}", self.box_length),
            ));
        }
        let axis = linspace(0.0, self.box_length, n);
        let spacing = axis[1] - axis[0];
        let w = trapezoid_weights(&axis);

        // c[d + n - 1] = Σ_{i - j = d} w_i w_j
        let mut c = vec![0.0; 2 * n - 1];
        for i in 0..n {
            for j in 0..n {
                c[i + n - 1 - j] += w[i] * w[j];
            }
        }

        let offsets = |k: usize| k as f64 - (n - 1) as f64;
        let mut out = Vec::with_capacity(c.len().pow(3));
        for (a, ca) in c.iter().enumerate() {
            for (b, cb) in c.iter().enumerate() {
                for (d, cd) in c.iter().enumerate() {
                    let (dx, dy, dz) = (offsets(a), offsets(b), offsets(d));
                    out.push(Displacement {
                        distance: spacing * (dx * dx + dy * dy + dz * dz).sqrt(),
                        weight: ca * cb * cd,
                    });
                }
            }
        }
        Ok(out)
    }
}

impl PartitionFunction for LennardJonesPair {
    fn name(&self) -> String {
        "lennard_jones_pair".to_string()
    }

    #[instrument(skip_all, name = "lj_pair_partition")]
    fn evaluate(
        &self,
        temperatures: &[f64],
        reporter: &ProgressReporter,
    ) -> Result<Vec<f64>, EngineError> {
        let displacements = self.displacements()?;
        let energies: Vec<f64> = displacements.iter().map(|d| self.energy_j(d.distance)).collect();
        let prefactor = (1.0 / PLANCK_J_S).powi(6);
        debug!(terms = displacements.len(), "Integrating configurational partition function.");

        let task = reporter.task(temperatures.len() as u64);
        let values = temperatures
            .iter()
            .map(|&t| {
                let beta = 1.0 / (BOLTZMANN_J_PER_K * t);
                let integral: f64 = displacements
                    .iter()
                    .zip(&energies)
                    .map(|(d, &u)| d.weight * (-beta * u).exp())
                    .sum();
                task.tick();
                prefactor * integral
            })
            .collect();
        Ok(values)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThermoRow {
    pub temperature: f64,
    pub partition: f64,
    pub internal_energy: f64,
    pub free_energy: f64,
    pub entropy: f64,
    pub heat_capacity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThermoTable {
    pub system: String,
    pub rows: Vec<ThermoRow>,
}

impl ThermoTable {
    pub fn temperatures(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.temperature).collect()
    }

    pub fn column(&self, pick: impl Fn(&ThermoRow) -> f64) -> Vec<f64> {
        self.rows.iter().map(pick).collect()
    }

    /// Temperature at which `C_v` peaks, taken as the dissociation temperature.
    pub fn heat_capacity_peak(&self) -> Option<&ThermoRow> {
        self.rows
            .iter()
            .filter(|r| r.heat_capacity.is_finite())
            .max_by(|a, b| a.heat_capacity.total_cmp(&b.heat_capacity))
    }
}

pub struct CanonicalEnsemble<P> {
    partition: P,
}

impl<P: PartitionFunction> CanonicalEnsemble<P> {
    pub fn new(partition: P) -> Self {
        Self { partition }
    }

    pub fn partition(&self) -> &P {
        &self.partition
    }

    /// Thermodynamic functions on `linspace(t_start, t_end, points)`.
    #[instrument(skip_all, name = "canonical_ensemble", fields(system = %self.partition.name()))]
    pub fn thermo(
        &self,
        t_start: f64,
        t_end: f64,
        points: usize,
        reporter: &ProgressReporter,
    ) -> Result<ThermoTable, EngineError> {
        if !(t_start > 0.0 && t_end > 0.0) {
            return Err(EngineError::invalid(
                "temperature",
                format!("range must be positive, got {t_start}..{t_end}"),
            ));
        }
        let temps = linspace(t_start, t_end, points);
        let z = self.partition.evaluate(&temps, reporter)?;
        for (&temperature, &value) in temps.iter().zip(&z) {
            if !(value > 0.0 && value.is_finite()) {
                return Err(EngineError::InvalidPartition {
                    system: self.partition.name(),
                    temperature,
                    value,
                });
            }
        }

        let ln_z: Vec<f64> = z.iter().map(|v| v.ln()).collect();
        let betas: Vec<f64> = temps.iter().map(|t| 1.0 / (BOLTZMANN_J_PER_K * t)).collect();
        let u: Vec<f64> = gradient(&ln_z, &betas)?.into_iter().map(|g| -g).collect();
        let f: Vec<f64> = temps
            .iter()
            .zip(&ln_z)
            .map(|(t, lz)| -BOLTZMANN_J_PER_K * t * lz)
            .collect();
        let s: Vec<f64> = gradient(&f, &temps)?.into_iter().map(|g| -g).collect();
        let cv = gradient(&u, &temps)?;

        let rows = (0..temps.len())
            .map(|i| ThermoRow {
                temperature: temps[i],
                partition: z[i],
                internal_energy: u[i],
                free_energy: f[i],
                entropy: s[i],
                heat_capacity: cv[i],
            })
            .collect();
        Ok(ThermoTable {
            system: self.partition.name(),
            rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reporter() -> ProgressReporter<'static> {
        ProgressReporter::new()
    }

    #[test]
    fn isolated_ion_has_zero_energy_and_constant_entropy() {
        let table = CanonicalEnsemble::new(CeriumModel::Isolated)
            .thermo(300.0, 2000.0, 100, &reporter())
            .unwrap();
        let expected_s = BOLTZMANN_J_PER_K * 14f64.ln();
        for row in &table.rows {
            assert!(row.internal_energy.abs() < 1e-30);
            assert!((row.entropy - expected_s).abs() < 1e-9 * expected_s);
            let expected_f = -BOLTZMANN_J_PER_K * row.temperature * 14f64.ln();
            assert!((row.free_energy - expected_f).abs() < 1e-12 * expected_f.abs());
        }
        assert_eq!(table.system, "isolated");
    }

    #[test]
    fn spin_orbit_partition_approaches_limits() {
        let cold = CeriumModel::SpinOrbit.partition(10.0);
        let hot = CeriumModel::SpinOrbit.partition(1e9);
        assert!((cold - 6.0).abs() < 1e-9);
        assert!((hot - 14.0).abs() < 1e-3);
    }

    #[test]
    fn crystal_field_ground_state_is_fourfold() {
        assert!((CeriumModel::CrystalField.partition(5.0) - 4.0).abs() < 1e-9);
        let total: f64 = CeriumModel::CrystalField.levels().iter().map(|(g, _)| g).sum();
        assert_eq!(total, 14.0);
    }

    #[test]
    fn spin_orbit_internal_energy_matches_two_level_formula() {
        let table = CanonicalEnsemble::new(CeriumModel::SpinOrbit)
            .thermo(300.0, 2000.0, 400, &reporter())
            .unwrap();
        let de = SPIN_ORBIT_SPLITTING_EV * ELECTRON_VOLT_J;
        for row in &table.rows[1..table.rows.len() - 1] {
            let boltz = 8.0 * (-de / (BOLTZMANN_J_PER_K * row.temperature)).exp();
            let exact = de * boltz / (6.0 + boltz);
            assert!((row.internal_energy - exact).abs() < 1e-3 * de);
        }
    }

    #[test]
    fn displacement_weights_reproduce_box_volume_squared() {
        let pair = LennardJonesPair {
            grid_points: 5,
            ..Default::default()
        };
        let displacements = pair.displacements().unwrap();
        assert_eq!(displacements.len(), 9usize.pow(3));
        let total: f64 = displacements.iter().map(|d| d.weight).sum();
        assert!((total - 1e6).abs() < 1e-6);
    }

    #[test]
    fn collapsed_grid_matches_brute_force_six_dimensional_sum() {
        let pair = LennardJonesPair {
            grid_points: 4,
            ..Default::default()
        };
        let t = 120.0;
        let beta = 1.0 / (BOLTZMANN_J_PER_K * t);
        let axis = linspace(0.0, pair.box_length, 4);
        let w = trapezoid_weights(&axis);
        let mut brute = 0.0;
        for a in 0..4 {
            for b in 0..4 {
                for c in 0..4 {
                    for d in 0..4 {
                        for e in 0..4 {
                            for f in 0..4 {
                                let r = ((axis[a] - axis[d]).powi(2)
                                    + (axis[b] - axis[e]).powi(2)
                                    + (axis[c] - axis[f]).powi(2))
                                .sqrt();
                                let weight = w[a] * w[b] * w[c] * w[d] * w[e] * w[f];
                                brute += weight * (-beta * pair.energy_j(r)).exp();
                            }
                        }
                    }
                }
            }
        }
        brute *= (1.0 / PLANCK_J_S).powi(6);
        let z = pair.evaluate(&[t], &reporter()).unwrap()[0];
        assert!((z - brute).abs() < 1e-9 * brute);
    }

    #[test]
    fn lennard_jones_pair_has_heat_capacity_peak() {
        let table = CanonicalEnsemble::new(LennardJonesPair::default())
            .thermo(10.0, 1000.0, 200, &reporter())
            .unwrap();
        let peak = table.heat_capacity_peak().unwrap();
        assert!(peak.heat_capacity > 0.0);
        assert!(peak.temperature > 10.0 && peak.temperature < 1000.0);
    }

    #[test]
    fn non_positive_temperatures_are_rejected() {
        let result = CanonicalEnsemble::new(CeriumModel::Isolated).thermo(0.0, 10.0, 5, &reporter());
        assert!(matches!(result, Err(EngineError::InvalidParameter { .. })));
    }
}
