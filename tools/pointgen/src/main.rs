//! Synthetic point-cloud generator for exercising the metrics pipeline.
//!
//! Produces a height-normalized two-layer cloud: ground echoes near zero
//! and a canopy layer up to the stand height, with plausible return
//! numbers. Output is the text format gridmetrics consumes.

use std::fs;
use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Parser, Debug)]
#[command(
    name = "pointgen",
    about = "Generate a synthetic height-normalized canopy point cloud"
)]
struct Args {
    /// Square extent in metres.
    #[arg(short, long, default_value = "100.0")]
    extent: f64,

    /// Pulse density in points per square metre.
    #[arg(short, long, default_value = "2.0")]
    density: f64,

    /// Top height of the canopy layer in metres.
    #[arg(long, default_value = "22.0")]
    canopy_height: f64,

    /// Fraction of pulses hitting the canopy rather than the ground.
    #[arg(long, default_value = "0.7")]
    cover: f64,

    /// RNG seed for reproducible clouds.
    #[arg(long, default_value = "1")]
    seed: u64,

    /// Output path.
    #[arg(short, long, default_value = "points.txt")]
    output: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = StdRng::seed_from_u64(args.seed);

    let n = (args.extent * args.extent * args.density).round() as usize;
    let mut out = String::with_capacity(n * 24);
    writeln!(
        out,
        "# synthetic cloud: {} pts, extent {} m, cover {}",
        n, args.extent, args.cover
    )?;

    let mut canopy_hits = 0usize;
    for _ in 0..n {
        let x = rng.gen_range(0.0..args.extent);
        let y = rng.gen_range(0.0..args.extent);
        let (height, rn) = if rng.gen_bool(args.cover) {
            canopy_hits += 1;
            // Crowns thin out towards the top; squaring the draw biases
            // echoes towards the upper canopy.
            let u: f64 = rng.gen_range(0.0f64..1.0);
            let h = args.canopy_height * (0.25 + 0.75 * u.sqrt());
            let rn = if rng.gen_bool(0.8) { 1 } else { 2 };
            (h, rn)
        } else {
            // Ground and low vegetation, often later returns.
            let h = rng.gen_range(0.0..0.4);
            let rn = rng.gen_range(1..=3);
            (h, rn)
        };
        writeln!(out, "{x:.2} {y:.2} {height:.2} {rn}")?;
    }

    fs::write(&args.output, out)
        .with_context(|| format!("writing {}", args.output.display()))?;
    eprintln!(
        "Wrote {} points ({} canopy, {} ground) to {}.",
        n,
        canopy_hits,
        n - canopy_hits,
        args.output.display()
    );
    Ok(())
}
