//! Configuration models and loaders for the Kepler lessons.
//!
//! Themes, animation settings, and scene manifests are read-only values
//! deserialised from TOML or YAML. Nothing here is mutated after loading.

use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid colour `{0}` (expected #rrggbb)")]
    Color(String),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// 24-bit colour written as `#rrggbb` in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Rgb(pub u8, pub u8, pub u8);

impl FromStr for Rgb {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .filter(|h| h.len() == 6 && h.is_ascii())
            .ok_or_else(|| ConfigError::Color(s.to_string()))?;
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ConfigError::Color(s.to_string()))
        };
        Ok(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Colours and typography used by the renderer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub name: String,
    pub background: Rgb,
    pub foreground: Rgb,
    pub grid: Rgb,
    pub sun: Rgb,
    pub planet: Rgb,
    pub orbit_path: Rgb,
    pub body: Rgb,
    /// Fill colours cycled across swept-area wedges.
    pub sweep_fills: Vec<Rgb>,
    /// Line colours cycled across cannon trajectories.
    pub trajectory_palette: Vec<Rgb>,
    pub fill_opacity: f64,
    pub font_family: String,
    pub caption_size: f64,
    pub label_size: f64,
    pub line_width: u32,
    pub marker_size: u32,
}

impl Theme {
    /// Dark presentation palette.
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            background: Rgb(0x0d, 0x11, 0x17),
            foreground: Rgb(0xe6, 0xed, 0xf3),
            grid: Rgb(0x30, 0x36, 0x3d),
            sun: Rgb(0xff, 0xc1, 0x07),
            planet: Rgb(0x2e, 0x86, 0xde),
            orbit_path: Rgb(0x8b, 0x94, 0x9e),
            body: Rgb(0x58, 0xa6, 0xff),
            sweep_fills: vec![Rgb(0xff, 0x6b, 0x6b), Rgb(0x4e, 0xcd, 0xc4)],
            trajectory_palette: vec![
                Rgb(0xff, 0x6b, 0x6b),
                Rgb(0xff, 0xa9, 0x4d),
                Rgb(0xff, 0xe0, 0x66),
                Rgb(0x69, 0xdb, 0x7c),
                Rgb(0x4d, 0xab, 0xf7),
                Rgb(0xda, 0x77, 0xf2),
            ],
            fill_opacity: 0.35,
            font_family: "DejaVu Sans".to_string(),
            caption_size: 24.0,
            label_size: 16.0,
            line_width: 2,
            marker_size: 6,
        }
    }

    /// Fill colour for the `index`-th sweep.
    pub fn sweep_fill(&self, index: usize) -> Rgb {
        cycle(&self.sweep_fills, index, self.body)
    }

    /// Line colour for the `index`-th trajectory.
    pub fn trajectory_color(&self, index: usize) -> Rgb {
        cycle(&self.trajectory_palette, index, self.foreground)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.fill_opacity) {
            return Err(ConfigError::Invalid(format!(
                "theme `{}`: fill_opacity must be within [0, 1]",
                self.name
            )));
        }
        if self.caption_size <= 0.0 || self.label_size <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "theme `{}`: font sizes must be positive",
                self.name
            )));
        }
        Ok(())
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

fn cycle(palette: &[Rgb], index: usize, fallback: Rgb) -> Rgb {
    if palette.is_empty() {
        fallback
    } else {
        palette[index % palette.len()]
    }
}

/// Playback settings handed to the notebook player alongside the frames.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub frame_duration_ms: u32,
    pub transition_duration_ms: u32,
    pub loop_playback: bool,
    pub play_label: String,
    pub pause_label: String,
    pub slider_prefix: String,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frame_duration_ms: 50,
            transition_duration_ms: 0,
            loop_playback: true,
            play_label: "Play".to_string(),
            pause_label: "Pause".to_string(),
            slider_prefix: "t / T = ".to_string(),
        }
    }
}

/// One swept-area wedge, as a time window in fractions of the period.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SweepConfig {
    pub start_fraction: f64,
    pub duration_fraction: f64,
    #[serde(default = "default_arc_points")]
    pub arc_points: usize,
}

fn default_arc_points() -> usize {
    50
}

/// Kepler's first/second law scene: orbit path, animated body, sweeps.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrbitSceneConfig {
    pub name: String,
    pub eccentricity: f64,
    #[serde(default = "default_semi_major_axis")]
    pub semi_major_axis: f64,
    #[serde(default = "default_ellipse_points")]
    pub ellipse_points: usize,
    #[serde(default = "default_frames")]
    pub frames: usize,
    #[serde(default)]
    pub sweeps: Vec<SweepConfig>,
}

fn default_semi_major_axis() -> f64 {
    1.0
}

fn default_ellipse_points() -> usize {
    200
}

fn default_frames() -> usize {
    100
}

impl OrbitSceneConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| {
            Err(ConfigError::Invalid(format!(
                "scene `{}`: {msg}",
                self.name
            )))
        };
        if !(0.0..1.0).contains(&self.eccentricity) {
            return invalid("eccentricity must be within [0, 1)");
        }
        if !(self.semi_major_axis.is_finite() && self.semi_major_axis > 0.0) {
            return invalid("semi_major_axis must be positive");
        }
        if self.ellipse_points == 0 || self.frames == 0 {
            return invalid("ellipse_points and frames must be at least 1");
        }
        for sweep in &self.sweeps {
            if !(0.0..=1.0).contains(&sweep.duration_fraction) || !sweep.start_fraction.is_finite()
            {
                return invalid("sweep windows need a finite start and a duration within [0, 1]");
            }
            if sweep.arc_points == 0 {
                return invalid("sweep arc_points must be at least 1");
            }
        }
        Ok(())
    }
}

/// Newton's cannon scene: one trajectory per launch speed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CannonSceneConfig {
    pub name: String,
    pub speeds_m_s: Vec<f64>,
    #[serde(default = "default_gravity")]
    pub gravity_m_s2: f64,
    #[serde(default = "default_planet_radius")]
    pub planet_radius_m: f64,
    #[serde(default)]
    pub launch_altitude_m: Option<f64>,
    #[serde(default = "default_samples")]
    pub samples: usize,
}

fn default_gravity() -> f64 {
    9.8
}

fn default_planet_radius() -> f64 {
    6.371e6
}

fn default_samples() -> usize {
    500
}

impl CannonSceneConfig {
    /// Only the speed list is checked; the cannon clamps everything else.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.speeds_m_s.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "scene `{}`: at least one launch speed is required",
                self.name
            )));
        }
        Ok(())
    }
}

/// Scene manifest, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum Scene {
    #[serde(rename = "orbit")]
    Orbit(OrbitSceneConfig),
    #[serde(rename = "cannon")]
    Cannon(CannonSceneConfig),
}

impl Scene {
    pub fn name(&self) -> &str {
        match self {
            Scene::Orbit(scene) => &scene.name,
            Scene::Cannon(scene) => &scene.name,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Scene::Orbit(scene) => scene.validate(),
            Scene::Cannon(scene) => scene.validate(),
        }
    }
}

/// Theme file layout: palette plus optional animation block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PresentationConfig {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub animation: AnimationConfig,
}

/// Load a theme and animation settings from a single TOML or YAML file.
pub fn load_presentation<P: AsRef<Path>>(path: P) -> Result<PresentationConfig, ConfigError> {
    let config: PresentationConfig = load_single(path.as_ref())?;
    config.theme.validate()?;
    Ok(config)
}

/// Load scene manifests from a file (YAML list or single TOML scene) or a
/// directory of TOML scenes.
pub fn load_scenes<P: AsRef<Path>>(path: P) -> Result<Vec<Scene>, ConfigError> {
    let scenes: Vec<Scene> = load_records(path)?;
    for scene in &scenes {
        scene.validate()?;
    }
    Ok(scenes)
}

/// Find a scene by name, ignoring case.
pub fn find_scene<'a>(scenes: &'a [Scene], name: &str) -> Option<&'a Scene> {
    scenes.iter().find(|s| s.name().eq_ignore_ascii_case(name))
}

fn is_toml(path: &Path) -> bool {
    path.extension().map(|ext| ext == "toml").unwrap_or(false)
}

fn load_single<T>(path: &Path) -> Result<T, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    if is_toml(path) {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if is_toml(path) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| is_toml(path))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colours_round_trip_through_display() {
        let color: Rgb = "#0d1117".parse().unwrap();
        assert_eq!(color, Rgb(0x0d, 0x11, 0x17));
        assert_eq!(color.to_string(), "#0d1117");
        assert!("0d1117".parse::<Rgb>().is_err());
        assert!("#0d11".parse::<Rgb>().is_err());
        assert!("#zz1117".parse::<Rgb>().is_err());
    }

    #[test]
    fn partial_theme_falls_back_to_dark_palette() {
        let config: PresentationConfig = toml::from_str(
            r##"
            [theme]
            name = "custom"
            sun = "#ffffff"

            [animation]
            frame_duration_ms = 80
            "##,
        )
        .unwrap();
        assert_eq!(config.theme.name, "custom");
        assert_eq!(config.theme.sun, Rgb(255, 255, 255));
        assert_eq!(config.theme.background, Theme::dark().background);
        assert_eq!(config.animation.frame_duration_ms, 80);
        assert_eq!(config.animation.play_label, "Play");
    }

    #[test]
    fn scene_manifest_is_tagged_by_type() {
        let scenes: Vec<Scene> = serde_yaml::from_str(
            r#"
- type: orbit
  name: second-law
  eccentricity: 0.6
  sweeps:
    - { start_fraction: 0.0, duration_fraction: 0.1 }
- type: cannon
  name: cannon
  speeds_m_s: [3000.0, 7900.0]
"#,
        )
        .unwrap();
        assert_eq!(scenes.len(), 2);
        match &scenes[0] {
            Scene::Orbit(orbit) => {
                assert_eq!(orbit.frames, 100);
                assert_eq!(orbit.sweeps[0].arc_points, 50);
            }
            other => panic!("expected orbit scene, got {other:?}"),
        }
        match &scenes[1] {
            Scene::Cannon(cannon) => assert_eq!(cannon.samples, 500),
            other => panic!("expected cannon scene, got {other:?}"),
        }
        assert!(find_scene(&scenes, "SECOND-LAW").is_some());
    }

    #[test]
    fn unbound_eccentricity_is_rejected() {
        let scene = OrbitSceneConfig {
            name: "bad".to_string(),
            eccentricity: 1.2,
            semi_major_axis: 1.0,
            ellipse_points: 200,
            frames: 100,
            sweeps: Vec::new(),
        };
        assert!(matches!(scene.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn palettes_cycle_and_fall_back() {
        let mut theme = Theme::dark();
        assert_eq!(theme.sweep_fill(2), theme.sweep_fill(0));
        theme.trajectory_palette.clear();
        assert_eq!(theme.trajectory_color(3), theme.foreground);
    }
}
