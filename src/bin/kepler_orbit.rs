use std::io::Write;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::Parser;
use kepler_lessons::config::{
    OrbitSceneConfig, PresentationConfig, Scene, SweepConfig, find_scene, load_presentation,
    load_scenes,
};
use kepler_lessons::export::samples as export_samples;
use kepler_lessons::orbits;
use kepler_lessons::primitives::{constants, units};
use kepler_lessons::scene;

/// Export the orbit path, time-correct frames, and swept areas of a Kepler orbit (CSV).
#[derive(Parser, Debug)]
#[command(author, version, about = "Kepler orbit sample exporter")]
struct Cli {
    /// Scene manifest file or directory of TOML scenes
    #[arg(long)]
    scenes: Option<PathBuf>,

    /// Scene name (case-insensitive; defaults to the first orbit scene)
    #[arg(long)]
    scene: Option<String>,

    /// Eccentricity override (0 <= e < 1)
    #[arg(long)]
    eccentricity: Option<f64>,

    /// Semi-major axis override
    #[arg(long)]
    semi_major_axis: Option<f64>,

    /// Animation frame count override
    #[arg(long)]
    frames: Option<usize>,

    /// Add two equal-duration sweeps (periapsis and apoapsis) of this period fraction
    #[arg(long)]
    sweep_duration: Option<f64>,

    /// Output CSV file (use '-' for stdout)
    #[arg(long, default_value = "artifacts/orbit.csv")]
    output: PathBuf,

    /// Optional JSON sidecar for the notebook player
    #[arg(long)]
    sidecar: Option<PathBuf>,

    /// Theme / animation settings (TOML or YAML)
    #[arg(long)]
    presentation: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    kepler_lessons::init_logging();
    let cli = Cli::parse();

    let mut config = match &cli.scenes {
        Some(path) => select_orbit_scene(&load_scenes(path)?, cli.scene.as_deref())?,
        None => OrbitSceneConfig {
            name: cli.scene.clone().unwrap_or_else(|| "kepler-orbit".to_string()),
            eccentricity: 0.5,
            semi_major_axis: 1.0,
            ellipse_points: 200,
            frames: 100,
            sweeps: Vec::new(),
        },
    };
    if let Some(e) = cli.eccentricity {
        config.eccentricity = e;
    }
    if let Some(a) = cli.semi_major_axis {
        config.semi_major_axis = a;
    }
    if let Some(frames) = cli.frames {
        config.frames = frames;
    }
    if let Some(duration) = cli.sweep_duration {
        config.sweeps = [0.0, 0.5]
            .iter()
            .map(|&centre| SweepConfig {
                start_fraction: centre - 0.5 * duration,
                duration_fraction: duration,
                arc_points: 50,
            })
            .collect();
    }
    config.validate()?;

    let data = scene::orbit_scene(&config)?;

    let mut writer = export_samples::writer_for_path(&cli.output)?;
    let rows = scene::write_csv(&data, writer.as_mut())?;
    writer.flush()?;
    tracing::info!(rows, output = %cli.output.display(), "samples written");

    if let Some(sidecar) = &cli.sidecar {
        let presentation = match &cli.presentation {
            Some(path) => load_presentation(path)?,
            None => PresentationConfig::default(),
        };
        let generated = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
        scene::write_sidecar(sidecar, &data, &presentation, &generated)?;
    }

    if cli.output != PathBuf::from("-") {
        let e = config.eccentricity;
        let a = config.semi_major_axis;
        // Read `a` as AU around the Sun for the period.
        let period_s = orbits::orbital_period(a * constants::AU_KM, constants::MU_SUN_KM3_S2)?;
        println!(
            "{}: e = {:.3}, periapsis = {:.4}, apoapsis = {:.4}, period = {:.1} days, \
             {} frames -> {}",
            config.name,
            e,
            orbits::periapsis(e, a),
            orbits::apoapsis(e, a),
            units::seconds_to_days(period_s),
            config.frames,
            cli.output.display()
        );
    }

    Ok(())
}

fn select_orbit_scene(scenes: &[Scene], name: Option<&str>) -> anyhow::Result<OrbitSceneConfig> {
    let chosen = match name {
        Some(name) => {
            find_scene(scenes, name).ok_or_else(|| anyhow!("Scene '{}' not found", name))?
        }
        None => scenes
            .iter()
            .find(|s| matches!(s, Scene::Orbit(_)))
            .ok_or_else(|| anyhow!("No orbit scene in the manifest"))?,
    };
    match chosen {
        Scene::Orbit(config) => Ok(config.clone()),
        Scene::Cannon(_) => Err(anyhow!(
            "Scene '{}' is a cannon scene; use newton_cannon",
            chosen.name()
        )),
    }
}
