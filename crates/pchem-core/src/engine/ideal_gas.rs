use serde::{Deserialize, Serialize};

use super::error::EngineError;
use crate::core::constants::GAS_CONSTANT;
use crate::core::numerics::{linspace, trapezoid};

/// Quadrature nodes used for `∫P dV`.
pub const WORK_QUADRATURE_POINTS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "type")]
pub enum Process {
    Isothermal,
    Adiabatic { gamma: f64 },
}

impl Process {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Isothermal => "isothermal",
            Self::Adiabatic { .. } => "adiabatic",
        }
    }
}

/// An ideal gas prepared at `(initial_temperature, initial_volume)` and taken through `process`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdealGas {
    /// mol
    pub moles: f64,
    /// K
    pub initial_temperature: f64,
    /// m³
    pub initial_volume: f64,
    pub process: Process,
}

impl IdealGas {
    pub fn new(
        moles: f64,
        initial_temperature: f64,
        initial_volume: f64,
        process: Process,
    ) -> Result<Self, EngineError> {
        for (name, value) in [
            ("moles", moles),
            ("initial_temperature", initial_temperature),
            ("initial_volume", initial_volume),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(EngineError::invalid(
                    name,
                    format!("must be positive, got {value}"),
                ));
            }
        }
        if let Process::Adiabatic { gamma } = process {
            if !(gamma > 1.0) {
                return Err(EngineError::invalid(
                    "gamma",
                    format!("adiabatic index must exceed 1, got {gamma}"),
                ));
            }
        }
        Ok(Self {
            moles,
            initial_temperature,
            initial_volume,
            process,
        })
    }

    pub fn initial_pressure(&self) -> f64 {
        self.moles * GAS_CONSTANT * self.initial_temperature / self.initial_volume
    }

    /// Pressure (Pa) at volume `volume` (m³) along the process path.
    pub fn pressure_at(&self, volume: f64) -> f64 {
        match self.process {
            Process::Isothermal => self.moles * GAS_CONSTANT * self.initial_temperature / volume,
            Process::Adiabatic { gamma } => {
                self.initial_pressure() * self.initial_volume.powf(gamma) / volume.powf(gamma)
            }
        }
    }

    /// Work done on the gas, `−∫P dV` from `v_i` to `v_f` (J).
    pub fn work(&self, v_i: f64, v_f: f64) -> Result<f64, EngineError> {
        let volumes = linspace(v_i, v_f, WORK_QUADRATURE_POINTS);
        let pressures: Vec<f64> = volumes.iter().map(|&v| self.pressure_at(v)).collect();
        Ok(-trapezoid(&pressures, &volumes)?)
    }

    /// Closed-form counterpart of [`IdealGas::work`] starting at the initial volume.
    pub fn analytic_work(&self, v_f: f64) -> f64 {
        let v_i = self.initial_volume;
        match self.process {
            Process::Isothermal => {
                -self.moles * GAS_CONSTANT * self.initial_temperature * (v_f / v_i).ln()
            }
            Process::Adiabatic { gamma } => {
                let constant = self.initial_pressure() * v_i.powf(gamma);
                -constant * (v_f.powf(1.0 - gamma) - v_i.powf(1.0 - gamma)) / (1.0 - gamma)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gas(process: Process) -> IdealGas {
        IdealGas::new(1.0, 300.0, 0.1, process).unwrap()
    }

    #[test]
    fn isothermal_work_matches_logarithmic_formula() {
        let gas = gas(Process::Isothermal);
        let numeric = gas.work(0.1, 0.3).unwrap();
        let exact = -GAS_CONSTANT * 300.0 * 3f64.ln();
        assert!((numeric - exact).abs() / exact.abs() < 1e-5);
        assert!((gas.analytic_work(0.3) - exact).abs() < 1e-9);
    }

    #[test]
    fn adiabatic_work_matches_closed_form() {
        let gas = gas(Process::Adiabatic { gamma: 1.4 });
        let numeric = gas.work(0.1, 0.3).unwrap();
        let exact = gas.analytic_work(0.3);
        assert!((numeric - exact).abs() / exact.abs() < 1e-5);
    }

    #[test]
    fn expansion_does_less_work_adiabatically() {
        let iso = gas(Process::Isothermal).work(0.1, 0.25).unwrap();
        let adi = gas(Process::Adiabatic { gamma: 1.4 }).work(0.1, 0.25).unwrap();
        assert!(iso < adi && adi < 0.0);
    }

    #[test]
    fn zero_volume_change_does_no_work() {
        let gas = gas(Process::Adiabatic { gamma: 1.4 });
        assert_eq!(gas.work(0.1, 0.1).unwrap(), 0.0);
    }

    #[test]
    fn adiabatic_pressure_starts_at_initial_pressure() {
        let gas = gas(Process::Adiabatic { gamma: 1.4 });
        assert!((gas.pressure_at(0.1) - gas.initial_pressure()).abs() < 1e-9);
        assert!((gas.initial_pressure() - 24_942.0).abs() < 1e-6);
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        assert!(IdealGas::new(0.0, 300.0, 0.1, Process::Isothermal).is_err());
        assert!(IdealGas::new(1.0, 300.0, 0.1, Process::Adiabatic { gamma: 1.0 }).is_err());
    }
}
