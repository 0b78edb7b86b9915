use std::io::Write;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::Parser;
use kepler_lessons::config::{
    CannonSceneConfig, PresentationConfig, Scene, find_scene, load_presentation, load_scenes,
};
use kepler_lessons::export::samples as export_samples;
use kepler_lessons::orbits::CannonLaunch;
use kepler_lessons::orbits::cannon::DEFAULT_SAMPLES;
use kepler_lessons::primitives::constants;
use kepler_lessons::scene;

/// Export Newton's cannon trajectories for a set of launch speeds (CSV).
#[derive(Parser, Debug)]
#[command(author, version, about = "Newton's cannon trajectory exporter")]
struct Cli {
    /// Launch speed in m/s (repeatable)
    #[arg(long = "speed")]
    speeds: Vec<f64>,

    /// Scene manifest file or directory of TOML scenes
    #[arg(long)]
    scenes: Option<PathBuf>,

    /// Scene name (case-insensitive; defaults to the first cannon scene)
    #[arg(long)]
    scene: Option<String>,

    /// Surface gravity override (m/s^2, default 9.8)
    #[arg(long)]
    gravity: Option<f64>,

    /// Planet radius override (m, default 6.371e6)
    #[arg(long)]
    radius: Option<f64>,

    /// Launch altitude (m); defaults to the mountain height
    #[arg(long)]
    altitude: Option<f64>,

    /// Samples per trajectory override (default 500)
    #[arg(long)]
    samples: Option<usize>,

    /// Output CSV file (use '-' for stdout)
    #[arg(long, default_value = "artifacts/cannon.csv")]
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
        Some(path) => select_cannon_scene(&load_scenes(path)?, cli.scene.as_deref())?,
        None => CannonSceneConfig {
            name: cli.scene.clone().unwrap_or_else(|| "newton-cannon".to_string()),
            speeds_m_s: Vec::new(),
            gravity_m_s2: constants::SURFACE_GRAVITY,
            planet_radius_m: constants::EARTH_RADIUS_M,
            launch_altitude_m: None,
            samples: DEFAULT_SAMPLES,
        },
    };
    if let Some(g) = cli.gravity {
        config.gravity_m_s2 = g;
    }
    if let Some(radius) = cli.radius {
        config.planet_radius_m = radius;
    }
    if let Some(altitude) = cli.altitude {
        config.launch_altitude_m = Some(altitude);
    }
    if let Some(samples) = cli.samples {
        config.samples = samples;
    }
    if !cli.speeds.is_empty() {
        config.speeds_m_s = cli.speeds.clone();
    }
    if config.speeds_m_s.is_empty() {
        let circular = CannonLaunch::new(0.0)
            .gravity(config.gravity_m_s2)
            .planet_radius(config.planet_radius_m)
            .circular_speed();
        config.speeds_m_s = [0.4, 0.7, 0.9, 1.0, 1.2, 1.5]
            .iter()
            .map(|fraction| fraction * circular)
            .collect();
    }
    config.validate()?;

    let data = scene::cannon_scene(&config);

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

    Ok(())
}

fn select_cannon_scene(scenes: &[Scene], name: Option<&str>) -> anyhow::Result<CannonSceneConfig> {
    let chosen = match name {
        Some(name) => {
            find_scene(scenes, name).ok_or_else(|| anyhow!("Scene '{}' not found", name))?
        }
        None => scenes
            .iter()
            .find(|s| matches!(s, Scene::Cannon(_)))
            .ok_or_else(|| anyhow!("No cannon scene in the manifest"))?,
    };
    match chosen {
        Scene::Cannon(config) => Ok(config.clone()),
        Scene::Orbit(_) => Err(anyhow!(
            "Scene '{}' is an orbit scene; use kepler_orbit",
            chosen.name()
        )),
    }
}
