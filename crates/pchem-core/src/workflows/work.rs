use std::fmt::Write as _;
use std::path::Path;
use tracing::{debug, instrument};

use super::{Artifacts, WorkflowError};
use crate::core::io::markdown::write_markdown;
use crate::core::io::plot::{LinePlot, Series, render_svg};
use crate::core::io::table::write_columns;
use crate::core::numerics::linspace;
use crate::engine::ideal_gas::{IdealGas, Process};
use crate::engine::progress::ProgressReporter;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkConfig {
    pub moles: f64,
    /// K
    pub temperature: f64,
    /// m³
    pub initial_volume: f64,
    pub gamma: f64,
    /// Largest final volume as a multiple of the initial one.
    pub max_expansion: f64,
    pub points: usize,
}

impl Default for WorkConfig {
    fn default() -> Self {
        Self {
            moles: 1.0,
            temperature: 300.0,
            initial_volume: 0.1,
            gamma: 1.4,
            max_expansion: 3.0,
            points: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkReport {
    pub final_volumes: Vec<f64>,
    pub isothermal: Vec<f64>,
    pub adiabatic: Vec<f64>,
    pub artifacts: Artifacts,
}

#[instrument(skip_all, name = "work_workflow")]
pub fn run(
    config: &WorkConfig,
    output_dir: &Path,
    reporter: &ProgressReporter,
) -> Result<WorkReport, WorkflowError> {
    let mut artifacts = Artifacts::new(output_dir);
    let gas = |process| {
        IdealGas::new(
            config.moles,
            config.temperature,
            config.initial_volume,
            process,
        )
    };
    let isothermal_gas = gas(Process::Isothermal)?;
    let adiabatic_gas = gas(Process::Adiabatic {
        gamma: config.gamma,
    })?;

    let v_i = config.initial_volume;
    let final_volumes = linspace(v_i, config.max_expansion * v_i, config.points);

    let (isothermal, adiabatic) = reporter.phase("Work Integrals", || {
        let task = reporter.task(final_volumes.len() as u64);
        let mut isothermal = Vec::with_capacity(final_volumes.len());
        let mut adiabatic = Vec::with_capacity(final_volumes.len());
        for &v_f in &final_volumes {
            isothermal.push(isothermal_gas.work(v_i, v_f)?);
            adiabatic.push(adiabatic_gas.work(v_i, v_f)?);
            task.tick();
        }
        Ok::<_, WorkflowError>((isothermal, adiabatic))
    })?;
    debug!(
        isothermal = isothermal.last(),
        adiabatic = adiabatic.last(),
        "Work at the largest expansion."
    );

    reporter.phase("Writing Output", || -> Result<(), WorkflowError> {
        write_columns(
            &artifacts.file("work.csv"),
            &["final_volume_m^3", "isothermal_J", "adiabatic_J"],
            &[final_volumes.clone(), isothermal.clone(), adiabatic.clone()],
        )?;
        let plot = LinePlot::new(
            "Work done on an expanding ideal gas",
            "Final volume (m³)",
            "Work (J)",
        )
        .with_series(Series::line("Isothermal", &final_volumes, &isothermal))
        .with_series(Series::line("Adiabatic", &final_volumes, &adiabatic));
        render_svg(&artifacts.file("work.svg"), &plot)?;
        write_markdown(
            &artifacts.file("work_discussion.md"),
            &discussion(config, &final_volumes, &isothermal, &adiabatic),
        )?;
        Ok(())
    })?;

    Ok(WorkReport {
        final_volumes,
        isothermal,
        adiabatic,
        artifacts,
    })
}

fn discussion(config: &WorkConfig, volumes: &[f64], isothermal: &[f64], adiabatic: &[f64]) -> String {
    let mut text = String::from("# Reversible expansion work\n\n");
    let _ = writeln!(
        text,
        "{} mol of ideal gas at {} K expands reversibly from {} m³. Work is the integral \
         −∫P dV, so expansion gives negative work done on the gas.\n",
        config.moles, config.temperature, config.initial_volume
    );
    if let (Some(v), Some(w_t), Some(w_a)) = (volumes.last(), isothermal.last(), adiabatic.last()) {
        let _ = writeln!(
            text,
            "At V_f = {v:.3} m³ the isothermal work is {w_t:.1} J and the adiabatic work (γ = {}) is {w_a:.1} J.\n",
            config.gamma
        );
    }
    text.push_str(
        "The adiabatic curve stays above the isothermal one: with no heat flowing in, the gas cools \
         as it expands, so its pressure falls faster than nRT/V and less work is extracted for the \
         same volume change.\n",
    );
    text
}
