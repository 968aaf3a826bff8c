//! `reward-curve` binary: parse the training log and draw its reward curve.
//!
//! Log verbosity follows `RUST_LOG` (default `warn`).

use std::path::Path;

use anyhow::Context;
use reward_curve::config::RenderConfig;
use reward_curve::render::{output_base, render};
use reward_curve::{parser, Error};
use tracing_subscriber::EnvFilter;

/// Training log to plot
const LOG_PATH: &str = "new_2c_vs_64zg.txt";

/// Printed when nothing can be plotted
const NO_DATA: &str = "no data available for plotting";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let log_path = Path::new(LOG_PATH);
    let dataset = parser::parse(log_path)
        .with_context(|| format!("failed to read {}", log_path.display()))?;

    if dataset.is_empty() {
        println!("{NO_DATA}");
        return Ok(());
    }

    println!("Parsed {} data points", dataset.len());
    println!("Columns: {:?}", dataset.columns());
    println!("First rows:\n{dataset}");

    let base = output_base(log_path);
    match render(&dataset, &base, &RenderConfig::default()) {
        Ok(chart) => {
            println!("Chart written: {} / {}", chart.png.display(), chart.pdf.display());
            Ok(())
        }
        Err(Error::EmptyDataset) => {
            tracing::warn!("every record is above the step cap");
            println!("{NO_DATA}");
            Ok(())
        }
        Err(e) => Err(e).context("failed to render chart"),
    }
}
