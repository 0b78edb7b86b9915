//! Scene assembly: turn scene manifests into named sample series.
//!
//! Series names double as their role when a scene is read back from CSV:
//! `ellipse` is the static path, `orbit` the time-correct frames, `sweep_N`
//! a swept-area wedge, and `cannon_N` a cannon trajectory.

use std::io::{self, Write};
use std::path::Path;

use kepler_config::{CannonSceneConfig, OrbitSceneConfig, PresentationConfig, Scene};
use kepler_export::{samples, sidecar};
use kepler_orbits::{
    CannonLaunch, OrbitError, ellipse_from_eccentricity, equal_time_sweep, kepler_orbit,
};
use tracing::info;

/// How the renderer should draw a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesRole {
    /// Static orbit outline.
    Path,
    /// Animation frames, one body position per sample.
    Frames,
    /// Closed swept-area wedge.
    Sweep,
    /// Open cannonball trajectory.
    Trajectory,
}

impl SeriesRole {
    pub fn label(&self) -> &'static str {
        match self {
            SeriesRole::Path => "path",
            SeriesRole::Frames => "frames",
            SeriesRole::Sweep => "sweep",
            SeriesRole::Trajectory => "trajectory",
        }
    }

    /// Role implied by a series name; unknown names draw as paths.
    pub fn from_series_name(name: &str) -> Self {
        if name == "orbit" {
            SeriesRole::Frames
        } else if name.starts_with("sweep") {
            SeriesRole::Sweep
        } else if name.starts_with("cannon") {
            SeriesRole::Trajectory
        } else {
            SeriesRole::Path
        }
    }
}

/// One named array of samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub role: SeriesRole,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub t: Option<Vec<f64>>,
}

impl Series {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

/// Central body drawn behind the series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backdrop {
    /// Point-like sun at the focus.
    Sun,
    /// Unit-radius planet disc.
    Planet,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneData {
    pub name: String,
    pub backdrop: Backdrop,
    pub eccentricity: Option<f64>,
    pub semi_major_axis: Option<f64>,
    pub series: Vec<Series>,
}

impl SceneData {
    /// Rebuild a scene from loose series, choosing the backdrop from their roles.
    pub fn from_series(name: impl Into<String>, series: Vec<Series>) -> Self {
        let backdrop = if series.iter().any(|s| s.role == SeriesRole::Trajectory) {
            Backdrop::Planet
        } else {
            Backdrop::Sun
        };
        Self {
            name: name.into(),
            backdrop,
            eccentricity: None,
            semi_major_axis: None,
            series,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self.backdrop {
            Backdrop::Sun => "orbit",
            Backdrop::Planet => "cannon",
        }
    }

    /// Number of animation frames (length of the `orbit` series, or 1).
    pub fn frame_count(&self) -> usize {
        self.series
            .iter()
            .find(|s| s.role == SeriesRole::Frames)
            .map(|s| s.len().max(1))
            .unwrap_or(1)
    }
}

/// Orbit path, time-correct frames, and one wedge per configured sweep.
pub fn orbit_scene(config: &OrbitSceneConfig) -> Result<SceneData, OrbitError> {
    let e = config.eccentricity;
    let a = config.semi_major_axis;

    let ellipse = ellipse_from_eccentricity(e, a, config.ellipse_points)?;
    let frames = kepler_orbit(e, a, config.frames)?;

    let mut series = vec![
        Series {
            name: "ellipse".to_string(),
            role: SeriesRole::Path,
            x: ellipse.x,
            y: ellipse.y,
            t: None,
        },
        Series {
            name: "orbit".to_string(),
            role: SeriesRole::Frames,
            x: frames.x,
            y: frames.y,
            t: Some(frames.t),
        },
    ];
    for (index, sweep) in config.sweeps.iter().enumerate() {
        let wedge = equal_time_sweep(
            e,
            a,
            sweep.start_fraction,
            sweep.duration_fraction,
            sweep.arc_points,
        )?;
        series.push(Series {
            name: format!("sweep_{index}"),
            role: SeriesRole::Sweep,
            x: wedge.x,
            y: wedge.y,
            t: None,
        });
    }

    info!(scene = %config.name, eccentricity = e, series = series.len(), "orbit scene assembled");
    Ok(SceneData {
        name: config.name.clone(),
        backdrop: Backdrop::Sun,
        eccentricity: Some(e),
        semi_major_axis: Some(a),
        series,
    })
}

/// One trajectory per launch speed, in launch order.
pub fn cannon_scene(config: &CannonSceneConfig) -> SceneData {
    let series = config
        .speeds_m_s
        .iter()
        .enumerate()
        .map(|(index, &speed)| {
            let mut launch = CannonLaunch::new(speed)
                .gravity(config.gravity_m_s2)
                .planet_radius(config.planet_radius_m)
                .samples(config.samples);
            if let Some(altitude) = config.launch_altitude_m {
                launch = launch.launch_altitude(altitude);
            }
            let shot = launch.fire();
            info!(
                speed_m_s = speed,
                regime = shot.regime.label(),
                eccentricity = shot.eccentricity,
                samples = shot.len(),
                "cannon shot"
            );
            Series {
                name: format!("cannon_{index}"),
                role: SeriesRole::Trajectory,
                x: shot.x,
                y: shot.y,
                t: None,
            }
        })
        .collect();

    SceneData {
        name: config.name.clone(),
        backdrop: Backdrop::Planet,
        eccentricity: None,
        semi_major_axis: None,
        series,
    }
}

pub fn build(scene: &Scene) -> Result<SceneData, OrbitError> {
    match scene {
        Scene::Orbit(config) => orbit_scene(config),
        Scene::Cannon(config) => Ok(cannon_scene(config)),
    }
}

/// Write every series as CSV rows, header included. Returns the row count.
pub fn write_csv(scene: &SceneData, writer: &mut dyn Write) -> io::Result<usize> {
    samples::write_header(writer)?;
    let mut rows = 0;
    for series in &scene.series {
        rows += samples::write_series(
            writer,
            &series.name,
            &series.x,
            &series.y,
            series.t.as_deref(),
        )?;
    }
    Ok(rows)
}

/// Write the JSON sidecar consumed by the notebook player.
pub fn write_sidecar(
    output: &Path,
    scene: &SceneData,
    presentation: &PresentationConfig,
    generated_utc: &str,
) -> io::Result<()> {
    let animation = &presentation.animation;
    let meta = sidecar::Metadata {
        scene: &scene.name,
        kind: scene.kind(),
        generated_utc,
        theme: &presentation.theme.name,
        eccentricity: scene.eccentricity,
        semi_major_axis: scene.semi_major_axis,
    };
    let playback = sidecar::Playback {
        frame_duration_ms: animation.frame_duration_ms,
        transition_duration_ms: animation.transition_duration_ms,
        loop_playback: animation.loop_playback,
        play_label: &animation.play_label,
        pause_label: &animation.pause_label,
        slider_prefix: &animation.slider_prefix,
    };
    let series: Vec<sidecar::SeriesData<'_>> = scene
        .series
        .iter()
        .map(|s| sidecar::SeriesData {
            name: &s.name,
            role: s.role.label(),
            x: &s.x,
            y: &s.y,
            t: s.t.as_deref(),
        })
        .collect();
    sidecar::write_sidecar(output, &meta, &playback, &series)?;
    info!(path = %output.display(), "sidecar written");
    Ok(())
}
