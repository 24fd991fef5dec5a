use std::fmt::Write as _;
use std::path::Path;
use tracing::{info, instrument};

use super::{Artifacts, WorkflowError, first_sign_change};
use crate::core::io::markdown::write_markdown;
use crate::core::io::plot::{LinePlot, Series, render_svg};
use crate::core::io::table::write_columns;
use crate::core::numerics::arange;
use crate::core::potentials::PairPotential;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::virial::{RadialGrid, SecondVirialCoefficient, hard_sphere_b2v};

#[derive(Debug, Clone, PartialEq)]
pub struct VirialConfig {
    /// First temperature of the sweep (K).
    pub t_start: f64,
    /// Exclusive upper bound of the sweep (K).
    pub t_stop: f64,
    pub t_step: f64,
    pub potentials: Vec<PairPotential>,
    pub grid: RadialGrid,
}

impl Default for VirialConfig {
    fn default() -> Self {
        Self {
            t_start: 100.0,
            t_stop: 1500.0,
            t_step: 20.0,
            potentials: vec![
                PairPotential::hard_sphere_argon(),
                PairPotential::square_well_argon(),
                PairPotential::lennard_jones_argon(),
            ],
            grid: RadialGrid::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VirialCurve {
    pub potential: PairPotential,
    pub b2v: Vec<f64>,
    /// Temperature where `B₂V` changes sign, if it does inside the sweep.
    pub boyle_temperature: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VirialReport {
    pub temperatures: Vec<f64>,
    pub curves: Vec<VirialCurve>,
    pub artifacts: Artifacts,
}

#[instrument(skip_all, name = "virial_workflow")]
pub fn run(
    config: &VirialConfig,
    output_dir: &Path,
    reporter: &ProgressReporter,
) -> Result<VirialReport, WorkflowError> {
    let mut artifacts = Artifacts::new(output_dir);
    let temperatures = arange(config.t_start, config.t_stop, config.t_step)?;

    reporter.report(Progress::PhaseStart {
        name: "Virial Coefficients",
    });
    let mut curves = Vec::with_capacity(config.potentials.len());
    for &potential in &config.potentials {
        reporter.message(format!("Integrating {} potential", potential.name()));
        let integrator = SecondVirialCoefficient::with_grid(potential, config.grid)?;
        let b2v: Vec<f64> = integrator
            .tabulate(&temperatures, reporter)?
            .into_iter()
            .map(|p| p.b2v)
            .collect();
        let boyle_temperature = first_sign_change(&temperatures, &b2v);
        info!(
            potential = potential.name(),
            boyle_temperature, "Tabulated second virial coefficient."
        );
        curves.push(VirialCurve {
            potential,
            b2v,
            boyle_temperature,
        });
    }
    reporter.report(Progress::PhaseFinish);

    reporter.phase("Writing Output", || -> Result<(), WorkflowError> {
        let mut headers = vec!["temp"];
        headers.extend(curves.iter().map(|c| c.potential.name()));
        let mut columns = vec![temperatures.clone()];
        columns.extend(curves.iter().map(|c| c.b2v.clone()));
        write_columns(&artifacts.file("B2V_temp.csv"), &headers, &columns)?;

        let mut plot = LinePlot::new(
            "Second virial coefficient of argon",
            "Temperature (K)",
            "B2V (Å³/mol)",
        );
        for curve in &curves {
            plot = plot.with_series(Series::line(curve.potential.name(), &temperatures, &curve.b2v));
        }
        if let (Some(first), Some(last)) = (temperatures.first(), temperatures.last()) {
            plot = plot.with_series(Series::line("B2V = 0", &[*first, *last], &[0.0, 0.0]));
        }
        render_svg(&artifacts.file("B2V_temp.svg"), &plot)?;

        write_markdown(&artifacts.file("discussion.md"), &discussion(&temperatures, &curves))?;
        Ok(())
    })?;

    Ok(VirialReport {
        temperatures,
        curves,
        artifacts,
    })
}

fn discussion(temperatures: &[f64], curves: &[VirialCurve]) -> String {
    let mut text = String::from("# Second virial coefficient of argon\n\n");
    let (Some(t_lo), Some(t_hi)) = (temperatures.first(), temperatures.last()) else {
        text.push_str("The temperature sweep was empty; nothing was computed.\n");
        return text;
    };
    let _ = writeln!(
        text,
        "B2V was integrated on {} temperatures between {t_lo} K and {t_hi} K.\n",
        temperatures.len()
    );
    for curve in curves {
        let (Some(lo), Some(hi)) = (curve.b2v.first(), curve.b2v.last()) else {
            continue;
        };
        let _ = writeln!(
            text,
            "- **{}**: B2V goes from {lo:.4e} Å³/mol at {t_lo} K to {hi:.4e} Å³/mol at {t_hi} K.",
            curve.potential.name()
        );
        match (curve.potential, curve.boyle_temperature) {
            (PairPotential::HardSphere { sigma, .. }, _) => {
                let _ = writeln!(
                    text,
                    "  Purely repulsive, so B2V stays positive and close to the excluded volume 2πN_Aσ³/3 = {:.4e} Å³/mol.",
                    hard_sphere_b2v(sigma)
                );
            }
            (_, Some(boyle)) => {
                let _ = writeln!(
                    text,
                    "  Attraction dominates at low temperature (B2V < 0); B2V crosses zero near {boyle:.1} K, above which repulsion dominates."
                );
            }
            (_, None) if *hi < 0.0 => {
                let _ = writeln!(
                    text,
                    "  B2V stays negative over the whole sweep: attraction dominates throughout."
                );
            }
            (_, None) => {
                let _ = writeln!(text, "  B2V stays positive over the whole sweep.");
            }
        }
    }
    text.push_str(
        "\nThe square well and Lennard-Jones curves both rise with temperature and approach the \
         hard-sphere value from below, because thermal energy makes the attractive well \
         increasingly irrelevant while the repulsive core keeps excluding volume.\n",
    );
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn small_config() -> VirialConfig {
        VirialConfig {
            t_start: 100.0,
            t_stop: 1500.0,
            t_step: 200.0,
            grid: RadialGrid {
                points: 400,
                ..RadialGrid::default()
            },
            ..VirialConfig::default()
        }
    }

    #[test]
    fn writes_table_plot_and_discussion() {
        let dir = tempdir().unwrap();
        let report = run(&small_config(), dir.path(), &ProgressReporter::new()).unwrap();

        for name in ["B2V_temp.csv", "B2V_temp.svg", "discussion.md"] {
            assert!(report.artifacts.contains(name), "{name} missing");
            assert!(dir.path().join(name).exists(), "{name} not written");
        }
        let csv = std::fs::read_to_string(dir.path().join("B2V_temp.csv")).unwrap();
        assert!(csv.starts_with("temp,hard_sphere,square_well,lennard_jones\n"));
        assert_eq!(csv.lines().count(), 1 + report.temperatures.len());

        let svg = std::fs::read_to_string(dir.path().join("B2V_temp.svg")).unwrap();
        assert!(svg.contains("B2V = 0"), "zero line has no legend entry");
    }

    #[test]
    fn lennard_jones_curve_has_a_boyle_temperature() {
        let dir = tempdir().unwrap();
        let report = run(&small_config(), dir.path(), &ProgressReporter::new()).unwrap();
        let lj = report
            .curves
            .iter()
            .find(|c| c.potential.name() == "lennard_jones")
            .unwrap();
        assert!(lj.b2v[0] < 0.0);
        let boyle = lj.boyle_temperature.unwrap();
        assert!(boyle > 100.0 && boyle < 1500.0);

        let hs = report
            .curves
            .iter()
            .find(|c| c.potential.name() == "hard_sphere")
            .unwrap();
        assert!(hs.boyle_temperature.is_none());
        let discussion = std::fs::read_to_string(dir.path().join("discussion.md")).unwrap();
        assert!(discussion.contains("crosses zero"));
    }

    #[test]
    fn invalid_step_is_reported() {
        let dir = tempdir().unwrap();
        let config = VirialConfig {
            t_step: 0.0,
            ..small_config()
        };
        let err = run(&config, dir.path(), &ProgressReporter::new()).unwrap_err();
        assert!(matches!(err, WorkflowError::Numerics(_)));
    }
}
