use kepler_lessons::config::Theme;
use kepler_lessons::render::{PlotOptions, RenderError, render_frames, render_scene};
use kepler_lessons::scene::{SceneData, Series, SeriesRole};
use std::fs;

fn plain() -> PlotOptions {
    PlotOptions {
        width: 200,
        height: 160,
        plain: true,
        caption: None,
    }
}

fn series(name: &str, x: Vec<f64>, y: Vec<f64>) -> Series {
    Series {
        name: name.to_string(),
        role: SeriesRole::from_series_name(name),
        x,
        y,
        t: None,
    }
}

#[test]
fn scene_without_samples_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = dir.path().join("empty.png");

    let empty = SceneData::from_series("empty", vec![series("ellipse", vec![], vec![])]);
    let err = render_scene(&output, &empty, &Theme::dark(), &plain(), None).unwrap_err();
    assert!(matches!(err, RenderError::EmptyScene(ref name) if name == "empty"));

    let non_finite = SceneData::from_series(
        "nan",
        vec![series("ellipse", vec![f64::NAN, 1.0], vec![0.0, f64::INFINITY])],
    );
    assert!(matches!(
        render_scene(&output, &non_finite, &Theme::dark(), &plain(), None),
        Err(RenderError::EmptyScene(_))
    ));
    assert!(!output.exists());
}

#[test]
fn single_point_scene_still_renders() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = dir.path().join("nested").join("point.png");

    let scene = SceneData::from_series("point", vec![series("cannon_0", vec![0.0], vec![1.01])]);
    render_scene(&output, &scene, &Theme::dark(), &plain(), None).expect("render");
    assert!(fs::metadata(&output).expect("png metadata").len() > 0);
}

#[test]
fn frames_follow_the_orbit_series() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut orbit = series("orbit", vec![0.5, 0.0, -1.5], vec![0.0, 0.9, 0.0]);
    orbit.t = Some(vec![0.0, 1.0 / 3.0, 2.0 / 3.0]);
    let scene = SceneData::from_series("frames", vec![orbit]);

    let written = render_frames(dir.path(), &scene, &Theme::dark(), &plain()).expect("frames");
    assert_eq!(written.len(), 3);
    assert!(written.iter().all(|path| path.exists()));
}
