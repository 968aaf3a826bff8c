//! Plot-ready series: filter, sort, smooth
//!
//! This is the data half of rendering and has no drawing dependencies,
//! so every step can be tested without producing files.

use serde::Serialize;
use tracing::debug;

use crate::config::RenderConfig;
use crate::dataset::{Dataset, LogRecord};
use crate::smooth::gaussian_smooth;
use crate::{Error, Result};

/// Ordered (step, reward) points ready for plotting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    steps: Vec<f64>,
    raw: Vec<f64>,
    smoothed: Vec<f64>,
}

impl Series {
    /// Build a series from a dataset.
    ///
    /// Records above `config.max_step_count` (and NaN step counts) are
    /// dropped, the rest sorted by step count, and rewards smoothed with
    /// `config.sigma`.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptyDataset` if no record survives the filter
    pub fn prepare(dataset: &Dataset, config: &RenderConfig) -> Result<Self> {
        let mut records = filter_steps(dataset.records(), config.max_step_count);
        if records.is_empty() {
            return Err(Error::EmptyDataset);
        }
        debug!(
            kept = records.len(),
            dropped = dataset.len() - records.len(),
            max_step_count = config.max_step_count,
            "filtered records"
        );
        sort_by_step(&mut records);

        let steps = records.iter().map(LogRecord::step_count).collect();
        let raw: Vec<f64> = records.iter().map(LogRecord::reward_mean).collect();
        let smoothed = gaussian_smooth(&raw, config.sigma, config.truncate);

        Ok(Self {
            steps,
            raw,
            smoothed,
        })
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the series has no points; [`Series::prepare`] never returns one.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step counts, ascending.
    #[must_use]
    pub fn steps(&self) -> &[f64] {
        &self.steps
    }

    /// Rewards before smoothing, aligned with `steps`.
    #[must_use]
    pub fn raw(&self) -> &[f64] {
        &self.raw
    }

    /// Smoothed rewards, aligned with `steps`.
    #[must_use]
    pub fn smoothed(&self) -> &[f64] {
        &self.smoothed
    }

    /// Plotted points, `(step, smoothed reward)`.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.steps.iter().copied().zip(self.smoothed.iter().copied())
    }

    /// Step range, widened when all steps are equal.
    #[must_use]
    pub fn step_range(&self) -> (f64, f64) {
        padded_range(&self.steps)
    }

    /// Smoothed reward range with a small margin.
    #[must_use]
    pub fn reward_range(&self) -> (f64, f64) {
        let (lo, hi) = padded_range(&self.smoothed);
        let margin = (hi - lo) * 0.05;
        (lo - margin, hi + margin)
    }
}

/// Keep records with `step_count <= max`, in their original order.
#[must_use]
pub fn filter_steps(records: &[LogRecord], max: f64) -> Vec<LogRecord> {
    records
        .iter()
        .filter(|r| r.step_count() <= max)
        .copied()
        .collect()
}

/// Sort ascending by step count. Ties keep no particular order.
pub fn sort_by_step(records: &mut [LogRecord]) {
    records.sort_unstable_by(|a, b| a.step_count().total_cmp(&b.step_count()));
}

fn padded_range(values: &[f64]) -> (f64, f64) {
    let (lo, hi) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if lo > hi {
        (0.0, 1.0)
    } else if (hi - lo).abs() < f64::EPSILON {
        let pad = if lo == 0.0 { 1.0 } else { lo.abs() * 0.5 };
        (lo - pad, hi + pad)
    } else {
        (lo, hi)
    }
}
