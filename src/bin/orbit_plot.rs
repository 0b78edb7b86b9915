use std::path::PathBuf;

use clap::Parser;
use csv::ReaderBuilder;
use kepler_lessons::config::{PresentationConfig, load_presentation};
use kepler_lessons::render::{self, PlotOptions};
use kepler_lessons::scene::{SceneData, Series, SeriesRole};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Render exported orbit or cannon samples (CSV) to PNG"
)]
struct Cli {
    #[arg(long)]
    input: String,
    #[arg(long, default_value = "artifacts/orbit.png")]
    output: PathBuf,
    /// Theme / animation settings (TOML or YAML)
    #[arg(long)]
    presentation: Option<PathBuf>,
    #[arg(long, default_value_t = 900)]
    width: u32,
    #[arg(long, default_value_t = 900)]
    height: u32,
    /// Skip captions, axis labels, and legend
    #[arg(long, default_value_t = false)]
    plain: bool,
    #[arg(long)]
    caption: Option<String>,
    /// Also render one PNG per animation frame into this directory
    #[arg(long)]
    frames_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    kepler_lessons::init_logging();
    let cli = Cli::parse();

    let presentation = match &cli.presentation {
        Some(path) => load_presentation(path)?,
        None => PresentationConfig::default(),
    };
    let series = read_series(&cli.input)?;
    if series.is_empty() {
        return Err(anyhow::anyhow!("No samples in the provided CSV"));
    }

    let name = PathBuf::from(&cli.input)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("scene")
        .to_string();
    let scene = SceneData::from_series(name, series);
    let options = PlotOptions {
        width: cli.width,
        height: cli.height,
        plain: cli.plain,
        caption: cli.caption.clone(),
    };

    render::render_scene(&cli.output, &scene, &presentation.theme, &options, None)?;
    println!("[rendered] {}", cli.output.display());

    if let Some(dir) = &cli.frames_dir {
        let frames = render::render_frames(dir, &scene, &presentation.theme, &options)?;
        println!("[rendered] {} frames in {}", frames.len(), dir.display());
    }

    Ok(())
}

fn read_series(path: &str) -> anyhow::Result<Vec<Series>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let headers = rdr.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| anyhow::anyhow!("CSV missing '{}' column", name))
    };
    let series_idx = column("series")?;
    let t_idx = column("t")?;
    let x_idx = column("x")?;
    let y_idx = column("y")?;

    let mut series: Vec<Series> = Vec::new();
    for rec in rdr.records() {
        let r = rec?;
        let name = r.get(series_idx).unwrap_or("").trim();
        let x: f64 = r.get(x_idx).unwrap_or("").parse().unwrap_or(f64::NAN);
        let y: f64 = r.get(y_idx).unwrap_or("").parse().unwrap_or(f64::NAN);
        if name.is_empty() || !x.is_finite() || !y.is_finite() {
            continue;
        }
        let t: Option<f64> = r.get(t_idx).and_then(|v| v.trim().parse().ok());

        let slot = match series.iter().position(|s| s.name == name) {
            Some(idx) => idx,
            None => {
                series.push(Series {
                    name: name.to_string(),
                    role: SeriesRole::from_series_name(name),
                    x: Vec::new(),
                    y: Vec::new(),
                    t: None,
                });
                series.len() - 1
            }
        };
        let entry = &mut series[slot];
        entry.x.push(x);
        entry.y.push(y);
        if let Some(t) = t {
            entry.t.get_or_insert_with(Vec::new).push(t);
        }
    }
    Ok(series)
}
