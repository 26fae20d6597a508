//! Metrics driver: reads a height-normalized point file, resolves a metric
//! configuration, routes points into raster cells or field plots, and
//! writes the evaluated metric table as JSON.
//!
//! Point file format: whitespace-separated `x y height [return_number]`
//! per line, `#` starts a comment. Coordinates and heights in metres.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use canopy_core::{
    create_set, GridIndex, MetricEngine, PlotRecord, PointRecord,
};
use clap::Parser;

// ── CLI ──────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "gridmetrics",
    about = "Compute per-cell canopy height metrics from a point file"
)]
struct Args {
    /// Point file (`x y height [return_number]` lines).
    #[arg(short, long)]
    points: PathBuf,

    /// Raster cell size in metres; the grid covers the data's bounding
    /// box. Grid mode and plot mode are mutually exclusive.
    #[arg(short, long, conflicts_with = "plots")]
    resolution: Option<f64>,

    /// JSON table of circular plots `[{"id", "east", "north", "radius"}]`.
    #[arg(long)]
    plots: Option<PathBuf>,

    /// Metric token or preset name; repeatable.
    #[arg(short, long = "metric", default_value = "basic-linear")]
    metrics: Vec<String>,

    /// Nilsson level in metres, substituted into `{}` placeholders.
    #[arg(long, default_value = "2.0")]
    nilsson: f64,

    /// Evaluate bins on all cores.
    #[arg(long)]
    parallel: bool,

    /// Output JSON path (stdout when omitted).
    #[arg(short, long)]
    output: Option<PathBuf>,
}

// ── Input parsing ────────────────────────────────────────────────────────────

fn read_points(path: &Path) -> Result<Vec<PointRecord>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;

    let mut points = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let loc = || format!("{}:{}", path.display(), idx + 1);
        let mut fields = line.split_whitespace();
        let (Some(x), Some(y), Some(h)) =
            (fields.next(), fields.next(), fields.next())
        else {
            bail!("{}: expected `x y height [return_number]`", loc());
        };
        let x: f64 =
            x.parse().with_context(|| format!("{}: bad x `{x}`", loc()))?;
        let y: f64 =
            y.parse().with_context(|| format!("{}: bad y `{y}`", loc()))?;
        let h: f32 = h
            .parse()
            .with_context(|| format!("{}: bad height `{h}`", loc()))?;
        let rn = fields
            .next()
            .map(str::parse::<u8>)
            .transpose()
            .with_context(|| format!("{}: bad return number", loc()))?;
        points.push(PointRecord::new(x, y, h, rn));
    }
    Ok(points)
}

fn read_plots(path: &Path) -> Result<Vec<PlotRecord>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let plots: Vec<PlotRecord> = serde_json::from_str(&text)
        .with_context(|| format!("parsing {}", path.display()))?;
    if plots.is_empty() {
        bail!("{}: plot table is empty", path.display());
    }
    Ok(plots)
}

fn data_bounds(points: &[PointRecord]) -> (f64, f64, f64, f64) {
    let mut bounds =
        (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY);
    for p in points {
        bounds.0 = bounds.0.min(p.x);
        bounds.1 = bounds.1.max(p.x);
        bounds.2 = bounds.2.min(p.y);
        bounds.3 = bounds.3.max(p.y);
    }
    bounds
}

// ── main ─────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();

    let set = create_set(&args.metrics, args.nilsson)
        .context("resolving metric configuration")?;
    eprintln!(
        "Resolved {} metric column(s) from {} token(s).",
        set.len(),
        args.metrics.len()
    );

    let points = read_points(&args.points)?;
    if points.is_empty() {
        bail!("{}: no points", args.points.display());
    }
    eprintln!("Read {} points from {}.", points.len(), args.points.display());

    let mut engine = match (&args.plots, args.resolution) {
        (Some(path), _) => {
            let plots = read_plots(path)?;
            eprintln!("Plot mode: {} plots.", plots.len());
            MetricEngine::plots(plots)
        }
        (None, Some(resolution)) => {
            if resolution <= 0.0 {
                bail!("--resolution must be positive, got {resolution}");
            }
            let (minx, maxx, miny, maxy) = data_bounds(&points);
            let index =
                GridIndex::from_bounds(minx, maxx, miny, maxy, resolution);
            eprintln!(
                "Grid mode: {} x {} cells at {} m over ({}, {}) .. ({}, {}).",
                index.rows, index.cols, index.resolution,
                index.minx, index.miny, index.maxx, index.maxy
            );
            MetricEngine::grid(index)
        }
        (None, None) => bail!("pass either --resolution or --plots"),
    };

    engine
        .extend(&points)
        .context("routing points into bins")?;
    if engine.skipped() > 0 {
        eprintln!(
            "Warning: {} point(s) skipped (non-finite height).",
            engine.skipped()
        );
    }

    eprintln!(
        "Evaluating {} column(s) over {} bin(s){} ...",
        set.len(),
        engine.n_bins(),
        if args.parallel { " in parallel" } else { "" }
    );
    let table = if args.parallel {
        engine.evaluate_par(&set)
    } else {
        engine.evaluate(&set)
    };

    let json = serde_json::to_string_pretty(&table)?;
    match &args.output {
        Some(path) => {
            fs::write(path, json)
                .with_context(|| format!("writing {}", path.display()))?;
            eprintln!("Wrote {}.", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
