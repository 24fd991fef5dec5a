use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::AppConfig;
use crate::cli::{
    ArgonArgs, CeriumArgs, CommonArgs, KineticArgs, LjHeatCapacityArgs, OscillatorArgs,
    OverlapArgs, TroutonArgs, VirialArgs, WorkArgs,
};
use crate::error::{CliError, Result};
use pchem::core::optimize::NelderMeadOptions;
use pchem::engine::cluster::ArgonCluster;
use pchem::engine::ensemble::LennardJonesPair;
use pchem::engine::schrodinger::OscillatorGrid;
use pchem::engine::virial::RadialGrid;
use pchem::workflows::{
    argon::ArgonConfig, cerium::CeriumConfig, kinetic::KineticConfig,
    lj_heat_capacity::LjHeatCapacityConfig, oscillator::OscillatorConfig, overlap::OverlapConfig,
    trouton::TroutonConfig, virial::VirialConfig, work::WorkConfig,
};
use std::path::PathBuf;
use std::str::FromStr;

fn load_file_config(common: &CommonArgs) -> Result<FileConfig> {
    let file_config = if let Some(config_path) = &common.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };
    apply_set_values(file_config, &common.set_values)
}

fn resolve_output_dir(common: &CommonArgs, file_val: Option<PathBuf>, default_dir: &str) -> PathBuf {
    common
        .output_dir
        .clone()
        .or(file_val)
        .unwrap_or_else(|| PathBuf::from(default_dir))
}

fn require_non_empty<T>(items: &[T], key: &str) -> Result<()> {
    if items.is_empty() {
        return Err(CliError::Config(format!("`{}` must not be empty", key)));
    }
    Ok(())
}

pub fn build_virial(args: &VirialArgs) -> Result<AppConfig<VirialConfig>> {
    let defaults = DefaultsConfig::default();
    let base = VirialConfig::default();
    let file = load_file_config(&args.common)?.virial.unwrap_or_default();

    let potentials = file.potentials.unwrap_or(base.potentials);
    require_non_empty(&potentials, "virial.potentials")?;

    let workflow = VirialConfig {
        t_start: args.t_start.or(file.t_start).unwrap_or(base.t_start),
        t_stop: args.t_stop.or(file.t_stop).unwrap_or(base.t_stop),
        t_step: args.t_step.or(file.t_step).unwrap_or(base.t_step),
        potentials,
        grid: RadialGrid {
            r_min: file.r_min.unwrap_or(base.grid.r_min),
            cutoff_sigmas: file.cutoff_sigmas.unwrap_or(base.grid.cutoff_sigmas),
            points: file.grid_points.unwrap_or(base.grid.points),
        },
    };
    Ok(AppConfig {
        output_dir: resolve_output_dir(&args.common, file.output_dir, defaults.virial_dir),
        workflow,
    })
}

pub fn build_argon(args: &ArgonArgs) -> Result<AppConfig<ArgonConfig>> {
    let defaults = DefaultsConfig::default();
    let base = ArgonConfig::default();
    let file = load_file_config(&args.common)?.argon.unwrap_or_default();

    let workflow = ArgonConfig {
        cluster: ArgonCluster {
            epsilon: file.epsilon.unwrap_or(base.cluster.epsilon),
            sigma: file.sigma.unwrap_or(base.cluster.sigma),
            options: NelderMeadOptions {
                tol: file.tolerance.unwrap_or(base.cluster.options.tol),
                max_iterations: file.max_iterations.or(base.cluster.options.max_iterations),
            },
        },
        dimer_guess: args
            .dimer_guess
            .or(file.dimer_guess)
            .unwrap_or(base.dimer_guess),
        trimer_guess: file.trimer_guess.unwrap_or(base.trimer_guess),
        curve_start: file.curve_start.unwrap_or(base.curve_start),
        curve_end: file.curve_end.unwrap_or(base.curve_end),
        curve_points: args
            .curve_points
            .or(file.curve_points)
            .unwrap_or(base.curve_points),
    };
    Ok(AppConfig {
        output_dir: resolve_output_dir(&args.common, file.output_dir, defaults.argon_dir),
        workflow,
    })
}

pub fn build_oscillator(args: &OscillatorArgs) -> Result<AppConfig<OscillatorConfig>> {
    let defaults = DefaultsConfig::default();
    let base = OscillatorConfig::default();
    let file = load_file_config(&args.common)?.oscillator.unwrap_or_default();

    let workflow = OscillatorConfig {
        grid: OscillatorGrid {
            length: file.length.unwrap_or(base.grid.length),
            points: args.points.or(file.points).unwrap_or(base.grid.points),
        },
        states: args.states.or(file.states).unwrap_or(base.states),
        morse_depth: args
            .morse_depth
            .or(file.morse_depth)
            .unwrap_or(base.morse_depth),
    };
    Ok(AppConfig {
        output_dir: resolve_output_dir(&args.common, file.output_dir, defaults.oscillator_dir),
        workflow,
    })
}

pub fn build_trouton(args: &TroutonArgs) -> Result<AppConfig<TroutonConfig>> {
    let defaults = DefaultsConfig::default();
    let base = TroutonConfig::default();
    let file = load_file_config(&args.common)?.trouton.unwrap_or_default();

    let confidence_level = args
        .confidence_level
        .or(file.confidence_level)
        .unwrap_or(base.confidence_level);
    if !(confidence_level > 0.0 && confidence_level < 1.0) {
        return Err(CliError::Config(format!(
            "`trouton.confidence-level` must lie strictly between 0 and 1, got {}",
            confidence_level
        )));
    }

    let workflow = TroutonConfig {
        input: args.input.clone().or(file.input).unwrap_or(base.input),
        confidence_level,
        minimization_guess: file.minimization_guess.unwrap_or(base.minimization_guess),
        minimization: NelderMeadOptions {
            tol: file.tolerance.unwrap_or(base.minimization.tol),
            max_iterations: file.max_iterations.or(base.minimization.max_iterations),
        },
    };
    Ok(AppConfig {
        output_dir: resolve_output_dir(&args.common, file.output_dir, defaults.trouton_dir),
        workflow,
    })
}

pub fn build_work(args: &WorkArgs) -> Result<AppConfig<WorkConfig>> {
    let defaults = DefaultsConfig::default();
    let base = WorkConfig::default();
    let file = load_file_config(&args.common)?.work.unwrap_or_default();

    let workflow = WorkConfig {
        moles: args.moles.or(file.moles).unwrap_or(base.moles),
        temperature: args
            .temperature
            .or(file.temperature)
            .unwrap_or(base.temperature),
        initial_volume: file.initial_volume.unwrap_or(base.initial_volume),
        gamma: args.gamma.or(file.gamma).unwrap_or(base.gamma),
        max_expansion: file.max_expansion.unwrap_or(base.max_expansion),
        points: file.points.unwrap_or(base.points),
    };
    Ok(AppConfig {
        output_dir: resolve_output_dir(&args.common, file.output_dir, defaults.work_dir),
        workflow,
    })
}

pub fn build_cerium(args: &CeriumArgs) -> Result<AppConfig<CeriumConfig>> {
    let defaults = DefaultsConfig::default();
    let base = CeriumConfig::default();
    let file = load_file_config(&args.common)?.cerium.unwrap_or_default();

    let models = file.models.unwrap_or(base.models);
    require_non_empty(&models, "cerium.models")?;

    let workflow = CeriumConfig {
        models,
        t_start: args.t_start.or(file.t_start).unwrap_or(base.t_start),
        t_end: args.t_end.or(file.t_end).unwrap_or(base.t_end),
        points: args.points.or(file.points).unwrap_or(base.points),
    };
    Ok(AppConfig {
        output_dir: resolve_output_dir(&args.common, file.output_dir, defaults.cerium_dir),
        workflow,
    })
}

pub fn build_lj_heat_capacity(
    args: &LjHeatCapacityArgs,
) -> Result<AppConfig<LjHeatCapacityConfig>> {
    let defaults = DefaultsConfig::default();
    let base = LjHeatCapacityConfig::default();
    let file = load_file_config(&args.common)?
        .lj_heat_capacity
        .unwrap_or_default();

    let workflow = LjHeatCapacityConfig {
        pair: LennardJonesPair {
            epsilon: file.epsilon.unwrap_or(base.pair.epsilon),
            sigma: file.sigma.unwrap_or(base.pair.sigma),
            box_length: file.box_length.unwrap_or(base.pair.box_length),
            grid_points: args
                .grid_points
                .or(file.grid_points)
                .unwrap_or(base.pair.grid_points),
        },
        t_start: args.t_start.or(file.t_start).unwrap_or(base.t_start),
        t_end: args.t_end.or(file.t_end).unwrap_or(base.t_end),
        points: args.points.or(file.points).unwrap_or(base.points),
    };
    Ok(AppConfig {
        output_dir: resolve_output_dir(
            &args.common,
            file.output_dir,
            defaults.lj_heat_capacity_dir,
        ),
        workflow,
    })
}

pub fn build_overlap(args: &OverlapArgs) -> Result<AppConfig<OverlapConfig>> {
    let defaults = DefaultsConfig::default();
    let base = OverlapConfig::default();
    let file = load_file_config(&args.common)?.overlap.unwrap_or_default();

    let proposals = file.proposals.unwrap_or(base.proposals);
    require_non_empty(&proposals, "overlap.proposals")?;
    let sample_counts = file.sample_counts.unwrap_or(base.sample_counts);
    require_non_empty(&sample_counts, "overlap.sample-counts")?;
    let separations = file.separations.unwrap_or(base.separations);
    require_non_empty(&separations, "overlap.separations")?;

    let workflow = OverlapConfig {
        proposals,
        separation: file.separation.unwrap_or(base.separation),
        sample_counts,
        separations,
        sweep_samples: args
            .sweep_samples
            .or(file.sweep_samples)
            .unwrap_or(base.sweep_samples),
        chunk_size: file.chunk_size.unwrap_or(base.chunk_size),
        seed: args.seed.or(file.seed).unwrap_or(base.seed),
    };
    Ok(AppConfig {
        output_dir: resolve_output_dir(&args.common, file.output_dir, defaults.overlap_dir),
        workflow,
    })
}

pub fn build_kinetic(args: &KineticArgs) -> Result<AppConfig<KineticConfig>> {
    let defaults = DefaultsConfig::default();
    let base = KineticConfig::default();
    let file = load_file_config(&args.common)?.kinetic.unwrap_or_default();

    let proposals = file.proposals.unwrap_or(base.proposals);
    require_non_empty(&proposals, "kinetic.proposals")?;
    if let Some(octant) = proposals.iter().find(|p| p.is_positive_octant()) {
        return Err(CliError::Config(format!(
            "`kinetic.proposals` must cover all of space; the {} proposal only samples the positive octant",
            octant.name()
        )));
    }
    let sample_counts = file.sample_counts.unwrap_or(base.sample_counts);
    require_non_empty(&sample_counts, "kinetic.sample-counts")?;

    let workflow = KineticConfig {
        proposals,
        bond_length: args
            .bond_length
            .or(file.bond_length)
            .unwrap_or(base.bond_length),
        sample_counts,
        chunk_size: file.chunk_size.unwrap_or(base.chunk_size),
        seed: args.seed.or(file.seed).unwrap_or(base.seed),
    };
    Ok(AppConfig {
        output_dir: resolve_output_dir(&args.common, file.output_dir, defaults.kinetic_dir),
        workflow,
    })
}

fn parse_value<T: FromStr>(key: &str, value_str: &str, kind: &str) -> Result<T> {
    value_str
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value_str)))
}

fn float(key: &str, value_str: &str) -> Result<Option<f64>> {
    parse_value(key, value_str, "float").map(Some)
}

fn integer<T: FromStr>(key: &str, value_str: &str) -> Result<Option<T>> {
    parse_value(key, value_str, "integer").map(Some)
}

fn path(value_str: &str) -> Option<PathBuf> {
    Some(PathBuf::from(value_str))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    if set_values.is_empty() {
        return Ok(config);
    }
    for kv_pair in set_values {
        let Some((key, v)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };

        match key {
            "virial.output-dir" => config.virial.get_or_insert_with(Default::default).output_dir = path(v),
            "virial.t-start" => config.virial.get_or_insert_with(Default::default).t_start = float(key, v)?,
            "virial.t-stop" => config.virial.get_or_insert_with(Default::default).t_stop = float(key, v)?,
            "virial.t-step" => config.virial.get_or_insert_with(Default::default).t_step = float(key, v)?,
            "virial.r-min" => config.virial.get_or_insert_with(Default::default).r_min = float(key, v)?,
            "virial.cutoff-sigmas" => {
                config.virial.get_or_insert_with(Default::default).cutoff_sigmas = float(key, v)?
            }
            "virial.grid-points" => {
                config.virial.get_or_insert_with(Default::default).grid_points = integer(key, v)?
            }

            "argon.output-dir" => {
                config.argon.get_or_insert_with(Default::default).output_dir = path(v)
            }
            "argon.epsilon" => {
                config.argon.get_or_insert_with(Default::default).epsilon = float(key, v)?
            }
            "argon.sigma" => config.argon.get_or_insert_with(Default::default).sigma = float(key, v)?,
            "argon.tolerance" => {
                config.argon.get_or_insert_with(Default::default).tolerance = float(key, v)?
            }
            "argon.max-iterations" => {
                config.argon.get_or_insert_with(Default::default).max_iterations = integer(key, v)?
            }
            "argon.dimer-guess" => {
                config.argon.get_or_insert_with(Default::default).dimer_guess = float(key, v)?
            }
            "argon.curve-start" => {
                config.argon.get_or_insert_with(Default::default).curve_start = float(key, v)?
            }
            "argon.curve-end" => {
                config.argon.get_or_insert_with(Default::default).curve_end = float(key, v)?
            }
            "argon.curve-points" => {
                config.argon.get_or_insert_with(Default::default).curve_points = integer(key, v)?
            }

            "oscillator.output-dir" => {
                config.oscillator.get_or_insert_with(Default::default).output_dir = path(v)
            }
            "oscillator.length" => {
                config.oscillator.get_or_insert_with(Default::default).length = float(key, v)?
            }
            "oscillator.points" => {
                config.oscillator.get_or_insert_with(Default::default).points = integer(key, v)?
            }
            "oscillator.states" => {
                config.oscillator.get_or_insert_with(Default::default).states = integer(key, v)?
            }
            "oscillator.morse-depth" => {
                config.oscillator.get_or_insert_with(Default::default).morse_depth = float(key, v)?
            }

            "trouton.output-dir" => {
                config.trouton.get_or_insert_with(Default::default).output_dir = path(v)
            }
            "trouton.input" => config.trouton.get_or_insert_with(Default::default).input = path(v),
            "trouton.confidence-level" => {
                config.trouton.get_or_insert_with(Default::default).confidence_level =
                    float(key, v)?
            }
            "trouton.tolerance" => {
                config.trouton.get_or_insert_with(Default::default).tolerance = float(key, v)?
            }
            "trouton.max-iterations" => {
                config.trouton.get_or_insert_with(Default::default).max_iterations =
                    integer(key, v)?
            }

            "work.output-dir" => config.work.get_or_insert_with(Default::default).output_dir = path(v),
            "work.moles" => config.work.get_or_insert_with(Default::default).moles = float(key, v)?,
            "work.temperature" => {
                config.work.get_or_insert_with(Default::default).temperature = float(key, v)?
            }
            "work.initial-volume" => {
                config.work.get_or_insert_with(Default::default).initial_volume = float(key, v)?
            }
            "work.gamma" => config.work.get_or_insert_with(Default::default).gamma = float(key, v)?,
            "work.max-expansion" => {
                config.work.get_or_insert_with(Default::default).max_expansion = float(key, v)?
            }
            "work.points" => config.work.get_or_insert_with(Default::default).points = integer(key, v)?,

            "cerium.output-dir" => {
                config.cerium.get_or_insert_with(Default::default).output_dir = path(v)
            }
            "cerium.t-start" => {
                config.cerium.get_or_insert_with(Default::default).t_start = float(key, v)?
            }
            "cerium.t-end" => config.cerium.get_or_insert_with(Default::default).t_end = float(key, v)?,
            "cerium.points" => {
                config.cerium.get_or_insert_with(Default::default).points = integer(key, v)?
            }

            "lj-heat-capacity.output-dir" => {
                config.lj_heat_capacity.get_or_insert_with(Default::default).output_dir = path(v)
            }
            "lj-heat-capacity.epsilon" => {
                config.lj_heat_capacity.get_or_insert_with(Default::default).epsilon =
                    float(key, v)?
            }
            "lj-heat-capacity.sigma" => {
                config.lj_heat_capacity.get_or_insert_with(Default::default).sigma = float(key, v)?
            }
            "lj-heat-capacity.box-length" => {
                config.lj_heat_capacity.get_or_insert_with(Default::default).box_length =
                    float(key, v)?
            }
            "lj-heat-capacity.grid-points" => {
                config.lj_heat_capacity.get_or_insert_with(Default::default).grid_points =
                    integer(key, v)?
            }
            "lj-heat-capacity.t-start" => {
                config.lj_heat_capacity.get_or_insert_with(Default::default).t_start =
                    float(key, v)?
            }
            "lj-heat-capacity.t-end" => {
                config.lj_heat_capacity.get_or_insert_with(Default::default).t_end = float(key, v)?
            }
            "lj-heat-capacity.points" => {
                config.lj_heat_capacity.get_or_insert_with(Default::default).points =
                    integer(key, v)?
            }

            "overlap.output-dir" => {
                config.overlap.get_or_insert_with(Default::default).output_dir = path(v)
            }
            "overlap.separation" => {
                config.overlap.get_or_insert_with(Default::default).separation = float(key, v)?
            }
            "overlap.sweep-samples" => {
                config.overlap.get_or_insert_with(Default::default).sweep_samples =
                    integer(key, v)?
            }
            "overlap.chunk-size" => {
                config.overlap.get_or_insert_with(Default::default).chunk_size = integer(key, v)?
            }
            "overlap.seed" => config.overlap.get_or_insert_with(Default::default).seed = integer(key, v)?,

            "kinetic.output-dir" => {
                config.kinetic.get_or_insert_with(Default::default).output_dir = path(v)
            }
            "kinetic.bond-length" => {
                config.kinetic.get_or_insert_with(Default::default).bond_length = float(key, v)?
            }
            "kinetic.chunk-size" => {
                config.kinetic.get_or_insert_with(Default::default).chunk_size = integer(key, v)?
            }
            "kinetic.seed" => config.kinetic.get_or_insert_with(Default::default).seed = integer(key, v)?,

            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pchem::engine::ensemble::CeriumModel;
    use pchem::engine::monte_carlo::ProposalSpec;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn write_config(dir: &Path, toml: &str) -> PathBuf {
        let path = dir.join("pchem.toml");
        fs::write(&path, toml).unwrap();
        path
    }

    #[test]
    fn defaults_apply_when_nothing_is_given() {
        let app = build_virial(&VirialArgs::default()).expect("build ok");
        assert_eq!(app.output_dir, PathBuf::from("homework-2-2"));
        assert_eq!(app.workflow, VirialConfig::default());

        let app = build_kinetic(&KineticArgs::default()).expect("build ok");
        assert_eq!(app.output_dir, PathBuf::from("homework-5-grad"));
        assert_eq!(app.workflow, KineticConfig::default());

        let app = build_trouton(&TroutonArgs::default()).expect("build ok");
        assert_eq!(app.output_dir, PathBuf::from("homework-3-1"));
        assert_eq!(app.workflow.input, PathBuf::from("trouton.csv"));
    }

    #[test]
    fn build_config_reads_file_and_merges() {
        let dir = tempdir().unwrap();
        let cfg_path = write_config(
            dir.path(),
            r#"
            [cerium]
            output-dir = "thermo"
            models = ["crystal-field"]
            t-start = 500.0
            points = 7

            [overlap]
            separation = 3.0
            sample-counts = [100, 1000]

            [[overlap.proposals]]
            type = "uniform"
            low = 0.0
            high = 10.0
            "#,
        );

        let args = CeriumArgs {
            common: CommonArgs {
                config: Some(cfg_path.clone()),
                ..CommonArgs::default()
            },
            ..CeriumArgs::default()
        };
        let app = build_cerium(&args).expect("build ok");
        assert_eq!(app.output_dir, PathBuf::from("thermo"));
        assert_eq!(app.workflow.models, vec![CeriumModel::CrystalField]);
        assert_eq!(app.workflow.t_start, 500.0);
        assert_eq!(app.workflow.t_end, CeriumConfig::default().t_end);
        assert_eq!(app.workflow.points, 7);

        let args = OverlapArgs {
            common: CommonArgs {
                config: Some(cfg_path),
                ..CommonArgs::default()
            },
            ..OverlapArgs::default()
        };
        let app = build_overlap(&args).expect("build ok");
        assert_eq!(app.workflow.separation, 3.0);
        assert_eq!(app.workflow.sample_counts, vec![100, 1000]);
        assert_eq!(
            app.workflow.proposals,
            vec![ProposalSpec::Uniform {
                low: 0.0,
                high: 10.0
            }]
        );
        assert_eq!(app.workflow.seed, OverlapConfig::default().seed);
    }

    #[test]
    fn cli_overrides_file_values() {
        let dir = tempdir().unwrap();
        let cfg_path = write_config(
            dir.path(),
            r#"
            [work]
            output-dir = "from-file"
            moles = 2.0
            gamma = 1.67
            "#,
        );
        let args = WorkArgs {
            common: CommonArgs {
                output_dir: Some(PathBuf::from("from-cli")),
                config: Some(cfg_path),
                set_values: vec![],
            },
            gamma: Some(1.3),
            ..WorkArgs::default()
        };
        let app = build_work(&args).expect("build ok");
        assert_eq!(app.output_dir, PathBuf::from("from-cli"));
        assert_eq!(app.workflow.moles, 2.0);
        assert_eq!(app.workflow.gamma, 1.3);
        assert_eq!(app.workflow.temperature, WorkConfig::default().temperature);
    }

    #[test]
    fn set_values_override() {
        let args = LjHeatCapacityArgs {
            common: CommonArgs {
                set_values: vec![
                    "lj-heat-capacity.grid-points=9".to_string(),
                    "lj-heat-capacity.box-length=12.5".to_string(),
                    "lj-heat-capacity.output-dir=lj".to_string(),
                ],
                ..CommonArgs::default()
            },
            ..LjHeatCapacityArgs::default()
        };
        let app = build_lj_heat_capacity(&args).expect("build ok");
        assert_eq!(app.workflow.pair.grid_points, 9);
        assert!((app.workflow.pair.box_length - 12.5).abs() < 1e-12);
        assert_eq!(app.output_dir, PathBuf::from("lj"));
    }

    #[test]
    fn set_values_report_bad_input() {
        let with_set = |values: &[&str]| OscillatorArgs {
            common: CommonArgs {
                set_values: values.iter().map(|s| s.to_string()).collect(),
                ..CommonArgs::default()
            },
            ..OscillatorArgs::default()
        };

        let err = build_oscillator(&with_set(&["oscillator.states"])).unwrap_err();
        assert!(err.to_string().contains("Expected KEY=VALUE"));

        let err = build_oscillator(&with_set(&["oscillator.morse-depth=deep"])).unwrap_err();
        assert!(err.to_string().contains("Invalid float value"));

        let err = build_oscillator(&with_set(&["oscillator.states=-1"])).unwrap_err();
        assert!(err.to_string().contains("Invalid integer value"));

        let err = build_oscillator(&with_set(&["oscillator.colour=blue"])).unwrap_err();
        assert!(err.to_string().contains("Unsupported configuration key"));
    }

    #[test]
    fn kinetic_rejects_octant_proposals() {
        let dir = tempdir().unwrap();
        let cfg_path = write_config(
            dir.path(),
            r#"
            [[kinetic.proposals]]
            type = "exponential"
            scale = 1.0
            "#,
        );
        let args = KineticArgs {
            common: CommonArgs {
                config: Some(cfg_path),
                ..CommonArgs::default()
            },
            ..KineticArgs::default()
        };
        assert!(matches!(build_kinetic(&args), Err(CliError::Config(_))));
    }

    #[test]
    fn confidence_level_must_be_a_probability() {
        let args = TroutonArgs {
            confidence_level: Some(1.5),
            ..TroutonArgs::default()
        };
        assert!(matches!(build_trouton(&args), Err(CliError::Config(_))));
    }
}
