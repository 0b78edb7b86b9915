use std::fs;
use std::path::PathBuf;

use kepler_lessons::config::{
    AnimationConfig, ConfigError, Scene, Theme, find_scene, load_presentation, load_scenes,
};
use kepler_lessons::scene;

fn configs_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("configs")
}

#[test]
fn shipped_presentation_matches_builtin_defaults() {
    let presentation = load_presentation(configs_dir().join("presentation.toml"))
        .expect("presentation.toml should load");
    assert_eq!(presentation.theme, Theme::dark());
    assert_eq!(presentation.animation, AnimationConfig::default());
}

#[test]
fn scene_directory_loads_in_file_order() {
    let scenes = load_scenes(configs_dir().join("scenes")).expect("scene directory");
    let names: Vec<&str> = scenes.iter().map(Scene::name).collect();
    assert_eq!(
        names,
        ["kepler-first-law", "kepler-second-law", "newton-cannon"]
    );

    let Some(Scene::Orbit(second_law)) = find_scene(&scenes, "KEPLER-SECOND-LAW") else {
        panic!("second-law scene should be an orbit scene");
    };
    assert_eq!(second_law.eccentricity, 0.7);
    assert_eq!(second_law.semi_major_axis, 1.0);
    assert_eq!(second_law.ellipse_points, 200);
    assert_eq!(second_law.frames, 120);
    assert_eq!(second_law.sweeps.len(), 2);
    assert_eq!(second_law.sweeps[0].arc_points, 50);
    assert_eq!(second_law.sweeps[1].arc_points, 80);

    let Some(Scene::Cannon(cannon)) = find_scene(&scenes, "newton-cannon") else {
        panic!("cannon scene missing");
    };
    assert_eq!(cannon.speeds_m_s.len(), 6);
    assert_eq!(cannon.launch_altitude_m, None);
}

#[test]
fn yaml_manifest_holds_several_scenes() {
    let scenes = load_scenes(configs_dir().join("scenes.yaml")).expect("yaml manifest");
    assert_eq!(scenes.len(), 2);
    match &scenes[1] {
        Scene::Cannon(moon) => {
            assert_eq!(moon.gravity_m_s2, 1.62);
            assert_eq!(moon.launch_altitude_m, Some(20_000.0));
            assert_eq!(moon.samples, 500);
        }
        other => panic!("expected cannon scene, got {other:?}"),
    }
}

#[test]
fn every_shipped_scene_builds() {
    let mut scenes = load_scenes(configs_dir().join("scenes")).unwrap();
    scenes.extend(load_scenes(configs_dir().join("scenes.yaml")).unwrap());
    for manifest in &scenes {
        let data = scene::build(manifest)
            .unwrap_or_else(|err| panic!("scene `{}` failed: {err}", manifest.name()));
        assert!(!data.series.is_empty(), "scene `{}` is empty", manifest.name());
        assert!(data.series.iter().all(|s| !s.is_empty()));
    }
}

#[test]
fn out_of_range_scene_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("parabola.toml");
    fs::write(
        &path,
        "type = \"orbit\"\nname = \"parabola\"\neccentricity = 1.0\n",
    )
    .unwrap();

    match load_scenes(&path) {
        Err(ConfigError::Invalid(msg)) => assert!(msg.contains("parabola"), "{msg}"),
        other => panic!("expected invalid scene, got {other:?}"),
    }
}

#[test]
fn unknown_scene_type_is_a_parse_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("scenes.yaml");
    fs::write(&path, "- type: comet\n  name: x\n").unwrap();
    assert!(matches!(load_scenes(&path), Err(ConfigError::Parse(_))));
}

#[test]
fn malformed_colour_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[theme]\nbackground = \"navy\"\n").unwrap();
    let err = load_presentation(&path).unwrap_err();
    assert!(err.to_string().contains("navy"), "{err}");
}
