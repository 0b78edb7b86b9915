//! Bitmap rendering of scenes with `plotters`.

use std::fs;
use std::path::{Path, PathBuf};

use kepler_config::{Rgb, Theme};
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use thiserror::Error;
use tracing::info;

use crate::scene::{Backdrop, SceneData, SeriesRole};

const PADDING_FRACTION: f64 = 0.08;
const PLANET_OUTLINE_POINTS: usize = 180;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("scene `{0}` has no samples to draw")]
    EmptyScene(String),
    #[error("failed to draw: {0}")]
    Drawing(String),
    #[error("filesystem error: {0}")]
    Io(#[from] std::io::Error),
}

/// Output size and decoration switches.
#[derive(Debug, Clone)]
pub struct PlotOptions {
    pub width: u32,
    pub height: u32,
    /// Skip captions, axis labels, and the legend (no font needed).
    pub plain: bool,
    pub caption: Option<String>,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            width: 900,
            height: 900,
            plain: false,
            caption: None,
        }
    }
}

fn color(rgb: Rgb) -> RGBColor {
    RGBColor(rgb.0, rgb.1, rgb.2)
}

fn drawing_error(err: impl std::fmt::Display) -> RenderError {
    RenderError::Drawing(err.to_string())
}

type Bounds = ((f64, f64), (f64, f64));

/// Padded data bounds stretched to the pixel aspect ratio, so circles stay round.
fn scene_bounds(scene: &SceneData, width: u32, height: u32) -> Option<Bounds> {
    let samples: Vec<(f64, f64)> = scene
        .series
        .iter()
        .flat_map(|series| series.points())
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect();
    if samples.is_empty() {
        return None;
    }
    let backdrop: &[(f64, f64)] = match scene.backdrop {
        Backdrop::Sun => &[(0.0, 0.0)],
        Backdrop::Planet => &[(-1.0, -1.0), (1.0, 1.0)],
    };
    let (x_min, x_max, y_min, y_max) = samples.iter().chain(backdrop).fold(
        (
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::INFINITY,
            f64::NEG_INFINITY,
        ),
        |(x0, x1, y0, y1), &(x, y)| (x0.min(x), x1.max(x), y0.min(y), y1.max(y)),
    );

    let span_x = (x_max - x_min).max(1e-9) * (1.0 + 2.0 * PADDING_FRACTION);
    let span_y = (y_max - y_min).max(1e-9) * (1.0 + 2.0 * PADDING_FRACTION);
    let aspect = width as f64 / height.max(1) as f64;
    let (span_x, span_y) = if span_x / span_y < aspect {
        (span_y * aspect, span_y)
    } else {
        (span_x, span_x / aspect)
    };
    let cx = 0.5 * (x_min + x_max);
    let cy = 0.5 * (y_min + y_max);
    Some((
        (cx - 0.5 * span_x, cx + 0.5 * span_x),
        (cy - 0.5 * span_y, cy + 0.5 * span_y),
    ))
}

/// Render the whole scene, or the scene at one animation frame, to a PNG.
pub fn render_scene(
    output: &Path,
    scene: &SceneData,
    theme: &Theme,
    options: &PlotOptions,
    frame: Option<usize>,
) -> Result<(), RenderError> {
    let ((x0, x1), (y0, y1)) = scene_bounds(scene, options.width, options.height)
        .ok_or_else(|| RenderError::EmptyScene(scene.name.clone()))?;
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let root = BitMapBackend::new(output, (options.width, options.height)).into_drawing_area();
    root.fill(&color(theme.background)).map_err(drawing_error)?;

    let foreground = color(theme.foreground);
    let font_family = theme.font_family.as_str();
    let caption_font = FontDesc::new(
        FontFamily::Name(font_family),
        theme.caption_size,
        FontStyle::Bold,
    )
    .color(&foreground);
    let label_font = FontDesc::new(
        FontFamily::Name(font_family),
        theme.label_size,
        FontStyle::Normal,
    )
    .color(&foreground);

    let mut builder = ChartBuilder::on(&root);
    builder.margin(20);
    if !options.plain {
        let caption = options.caption.clone().unwrap_or_else(|| scene.name.clone());
        builder
            .caption(caption, caption_font)
            .x_label_area_size(40)
            .y_label_area_size(60);
    }
    let mut chart = builder
        .build_cartesian_2d(x0..x1, y0..y1)
        .map_err(drawing_error)?;

    if !options.plain {
        chart
            .configure_mesh()
            .axis_style(color(theme.grid))
            .bold_line_style(color(theme.grid).mix(0.4))
            .light_line_style(color(theme.grid).mix(0.15))
            .label_style(label_font.clone())
            .x_labels(6)
            .y_labels(6)
            .draw()
            .map_err(drawing_error)?;
    }

    draw_backdrop(&mut chart, scene.backdrop, theme).map_err(drawing_error)?;
    draw_series(&mut chart, scene, theme, frame, !options.plain).map_err(drawing_error)?;

    if !options.plain {
        chart
            .configure_series_labels()
            .background_style(color(theme.background).mix(0.8))
            .border_style(color(theme.grid))
            .label_font(label_font)
            .draw()
            .map_err(drawing_error)?;
    }

    root.present().map_err(drawing_error)?;
    Ok(())
}

/// Render one PNG per animation frame into `dir` (`frame_0000.png`, ...).
pub fn render_frames(
    dir: &Path,
    scene: &SceneData,
    theme: &Theme,
    options: &PlotOptions,
) -> Result<Vec<PathBuf>, RenderError> {
    fs::create_dir_all(dir)?;
    let frames = scene.frame_count();
    let mut written = Vec::with_capacity(frames);
    for frame in 0..frames {
        let path = dir.join(format!("frame_{frame:04}.png"));
        render_scene(&path, scene, theme, options, Some(frame))?;
        written.push(path);
    }
    info!(frames, dir = %dir.display(), "animation frames rendered");
    Ok(written)
}

fn draw_backdrop<DB: DrawingBackend>(
    chart: &mut ChartContext<DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    backdrop: Backdrop,
    theme: &Theme,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    match backdrop {
        Backdrop::Sun => {
            chart.draw_series(std::iter::once(Circle::new(
                (0.0, 0.0),
                theme.marker_size * 2,
                color(theme.sun).filled(),
            )))?;
        }
        Backdrop::Planet => {
            let outline: Vec<(f64, f64)> = (0..PLANET_OUTLINE_POINTS)
                .map(|i| {
                    let theta = std::f64::consts::TAU * i as f64 / PLANET_OUTLINE_POINTS as f64;
                    (theta.cos(), theta.sin())
                })
                .collect();
            chart.draw_series(std::iter::once(Polygon::new(
                outline,
                color(theme.planet).filled(),
            )))?;
        }
    }
    Ok(())
}

fn draw_series<DB: DrawingBackend>(
    chart: &mut ChartContext<DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    scene: &SceneData,
    theme: &Theme,
    frame: Option<usize>,
    with_legend: bool,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let stroke = theme.line_width;
    let mut sweep_index = 0;
    let mut trajectory_index = 0;

    for series in &scene.series {
        let points: Vec<(f64, f64)> = series.points().collect();
        if points.is_empty() {
            continue;
        }
        match series.role {
            SeriesRole::Path => {
                let line = color(theme.orbit_path);
                let anno = chart.draw_series(LineSeries::new(
                    points,
                    ShapeStyle::from(&line).stroke_width(stroke),
                ))?;
                if with_legend {
                    anno.label(series.name.clone()).legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 16, y)], line.stroke_width(stroke))
                    });
                }
            }
            SeriesRole::Sweep => {
                let fill = color(theme.sweep_fill(sweep_index));
                sweep_index += 1;
                chart.draw_series(std::iter::once(Polygon::new(
                    points.clone(),
                    fill.mix(theme.fill_opacity).filled(),
                )))?;
                let anno = chart.draw_series(LineSeries::new(points, ShapeStyle::from(&fill)))?;
                if with_legend {
                    anno.label(series.name.clone()).legend(move |(x, y)| {
                        Rectangle::new([(x, y - 5), (x + 16, y + 5)], fill.filled())
                    });
                }
            }
            SeriesRole::Frames => {
                let body = color(theme.body);
                // Every frame position as a faint dot: the spacing shows the timing.
                let anno = chart.draw_series(
                    points
                        .iter()
                        .map(|&p| Circle::new(p, 2, body.mix(0.45).filled())),
                )?;
                if with_legend {
                    anno.label(series.name.clone()).legend(move |(x, y)| {
                        Circle::new((x + 8, y), 3, body.filled())
                    });
                }
                if let Some(frame) = frame {
                    let current = points[frame.min(points.len() - 1)];
                    chart.draw_series(std::iter::once(PathElement::new(
                        vec![(0.0, 0.0), current],
                        ShapeStyle::from(&body.mix(0.6)).stroke_width(1),
                    )))?;
                    chart.draw_series(std::iter::once(Circle::new(
                        current,
                        theme.marker_size,
                        body.filled(),
                    )))?;
                }
            }
            SeriesRole::Trajectory => {
                let line = color(theme.trajectory_color(trajectory_index));
                trajectory_index += 1;
                let anno = chart.draw_series(LineSeries::new(
                    points,
                    ShapeStyle::from(&line).stroke_width(stroke),
                ))?;
                if with_legend {
                    anno.label(series.name.clone()).legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 16, y)], line.stroke_width(stroke))
                    });
                }
            }
        }
    }
    Ok(())
}
