// File: crates/pulse-dashboard/src/main.rs
// Summary: Loads per-project daily metrics from CSV and writes the downloads, growth and project charts.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use pulse_core::{theme, write_svg, BarChart, ChartView, HoverState, LineChart, RenderOptions, Scene, Visibility};
use pulse_dashboard::{data, Dashboard, Metric};
use pulse_render_skia::SkiaRenderer;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MetricArg {
    Downloads,
    Views,
}

impl From<MetricArg> for Metric {
    fn from(m: MetricArg) -> Self {
        match m {
            MetricArg::Downloads => Metric::Downloads,
            MetricArg::Views => Metric::Views,
        }
    }
}

#[derive(Parser)]
#[command(
    name = "pulse-dashboard",
    version,
    about = "Render per-project analytics charts from a CSV of daily metrics",
    after_help = "Examples:
  pulse-dashboard stats.csv                          SVGs into target/out
  pulse-dashboard stats.csv --png --theme light      Also write PNGs
  pulse-dashboard stats.csv --hide overall,mod-a     Start with series hidden
  pulse-dashboard stats.csv --hover 3                Freeze hover on bucket 3"
)]
struct Args {
    /// CSV with columns date,project,downloads[,views]
    input: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = "target/out", value_name = "DIR")]
    out: PathBuf,

    /// Theme preset (dark, light, high-contrast-dark)
    #[arg(short, long, default_value = "dark")]
    theme: String,

    /// Series or project ids to hide
    #[arg(long, value_delimiter = ',', value_name = "ID,...")]
    hide: Vec<String>,

    #[arg(long, default_value_t = pulse_core::types::WIDTH)]
    width: i32,

    #[arg(long, default_value_t = pulse_core::types::HEIGHT)]
    height: i32,

    /// Render line charts as if the pointer were over this bucket
    #[arg(long, value_name = "INDEX")]
    hover: Option<usize>,

    /// Column to chart
    #[arg(short, long, value_enum, default_value = "downloads")]
    metric: MetricArg,

    /// Also write PNGs
    #[arg(long)]
    png: bool,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn write_outputs(scene: &Scene, dir: &Path, stem: &str, renderer: Option<&SkiaRenderer>) -> Result<()> {
    let svg_path = dir.join(format!("{stem}.svg"));
    write_svg(scene, &svg_path)?;
    info!("Wrote {}", svg_path.display());
    if let Some(r) = renderer {
        let png_path = svg_path.with_extension("png");
        r.render_to_png(scene, &png_path)?;
        info!("Wrote {}", png_path.display());
    }
    Ok(())
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let rows = data::load_rows(&args.input).with_context(|| format!("failed to load CSV '{}'", args.input.display()))?;
    if rows.is_empty() {
        anyhow::bail!("no rows loaded from {}; check headers", args.input.display());
    }
    let dash = Dashboard::aggregate(&rows, args.metric.into());
    info!(rows = rows.len(), dates = dash.dates.len(), projects = dash.projects.len(), "loaded");

    let visibility = Visibility::hiding(args.hide.iter().map(|s| s.trim()).filter(|s| !s.is_empty()));
    let opts = RenderOptions::default()
        .with_size(args.width, args.height)
        .with_theme(theme::find(&args.theme));
    let hover = args.hover.map(HoverState::Index).unwrap_or_default();

    std::fs::create_dir_all(&args.out).with_context(|| format!("create {}", args.out.display()))?;
    let renderer = args.png.then(SkiaRenderer::new);

    let mut downloads = dash.downloads_series()?;
    visibility.apply_to_series(&mut downloads);
    let chart = LineChart::new(&downloads).with_options(opts.clone());
    write_outputs(&chart.render(&hover), &args.out, "downloads", renderer.as_ref())?;

    let mut growth = dash.growth_series()?;
    visibility.apply_to_series(&mut growth);
    let chart = LineChart::new(&growth).with_options(opts.clone());
    write_outputs(&chart.render(&hover), &args.out, "growth", renderer.as_ref())?;

    let mut totals = dash.project_totals()?;
    visibility.apply_to_categories(&mut totals);
    let chart = BarChart::new(&totals).with_options(opts);
    write_outputs(&chart.render(&HoverState::None), &args.out, "projects", renderer.as_ref())?;

    if visibility.hidden_count() > 0 {
        info!(hidden = visibility.hidden_count(), "some series were hidden");
    }
    Ok(())
}
