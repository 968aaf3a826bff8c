//! # reward-curve: training log to reward chart
//!
//! Extracts the environment step counter (`total_envstep_count`) and the
//! mean reward (`reward_mean`) from a block-structured training log, then
//! draws the smoothed reward curve as PNG and PDF.
//!
//! ## Pipeline
//!
//! - [`parser`]: one pass over the log, one record per complete block
//! - [`series`]: drop steps above the cap, sort by step, Gaussian-smooth
//! - [`render`]: draw the series with `plotters`
//! - [`pdf`]: `plotters` backend writing single-page PDF documents
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use reward_curve::config::RenderConfig;
//! use reward_curve::{parser, render};
//!
//! let dataset = parser::parse("train.log")?;
//! println!("{} records", dataset.len());
//!
//! let chart = render::render(&dataset, "train", &RenderConfig::default())?;
//! println!("wrote {} and {}", chart.png.display(), chart.pdf.display());
//! # Ok::<(), reward_curve::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod config;
pub mod dataset;
pub mod error;
pub mod parser;
pub mod pdf;
pub mod render;
pub mod series;
pub mod smooth;

pub use error::{Error, Result};
