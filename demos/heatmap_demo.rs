// demos/heatmap_demo.rs

//! Sweeps call and put prices over spot and volatility and writes each matrix as
//! CSV and as an SVG heatmap.
//!
//! Usage:
//!     cargo run --example heatmap_demo -- [scenario.toml] [output_dir]
//!
//! Without a scenario file the built-in one below is used. Set `RUST_LOG=debug`
//! to see the sweep logs.

use std::env;
use std::fs::{self, File};
use std::path::PathBuf;

use anyhow::{Context, Result};
use bs_surface::{render_heatmap_svg, write_csv, OutputField, Scenario, SweepConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_SCENARIO: &str = r#"
[inputs]
time_to_maturity = 1.0
strike = 100.0
current_price = 100.0
volatility = 0.2
interest_rate = 0.05

[sweep]
resolution = 10
spot_range = [0.8, 1.2]
volatility_range = [0.5, 1.5]
"#;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    let scenario = match args.get(1) {
        Some(path) => Scenario::from_path(path)?,
        None => Scenario::from_toml_str(DEFAULT_SCENARIO)?,
    };
    let out_dir = PathBuf::from(args.get(2).map(String::as_str).unwrap_or("heatmaps"));
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    for output in [OutputField::CallPrice, OutputField::PutPrice] {
        let config = SweepConfig {
            output,
            ..scenario.sweep.clone()
        };
        let matrix = config.run(scenario.inputs)?;
        let (rows, cols) = matrix.shape();

        let csv_path = out_dir.join(format!("{}.csv", output));
        write_csv(&matrix, File::create(&csv_path)?)?;

        let svg_path = out_dir.join(format!("{}.svg", output));
        fs::write(&svg_path, render_heatmap_svg(&matrix, &config.heatmap)?)?;

        info!(%output, rows, cols, min = matrix.min(), max = matrix.max(), "wrote heatmap");
        println!(
            "{:<10} {}x{}  range [{:.4}, {:.4}]  -> {}, {}",
            output.name(),
            rows,
            cols,
            matrix.min(),
            matrix.max(),
            csv_path.display(),
            svg_path.display()
        );
    }

    Ok(())
}
