//! Parser and renderer configuration
//!
//! Defaults reproduce the training-log layout and chart appearance this
//! tool was written for. Every field can be overridden from JSON; missing
//! fields fall back to their defaults.
//!
//! ```rust
//! use reward_curve::config::RenderConfig;
//!
//! let config = RenderConfig::from_json_str(r#"{ "sigma": 2.0 }"#)?;
//! assert!((config.sigma - 2.0).abs() < f64::EPSILON);
//! assert!((config.max_step_count - 1_000_000.0).abs() < f64::EPSILON);
//! # Ok::<(), reward_curve::Error>(())
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dataset::{REWARD_MEAN, STEP_COUNT};
use crate::{Error, Result};

/// Upper bound on plotted step counts
pub const DEFAULT_MAX_STEP_COUNT: f64 = 1_000_000.0;

/// Gaussian smoothing standard deviation, in samples
pub const DEFAULT_SIGMA: f64 = 1.0;

/// Kernel half-width in standard deviations
pub const DEFAULT_TRUNCATE: f64 = 4.0;

/// Tokens recognized by the log parser.
///
/// Matching is case-sensitive substring containment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// A block-start line begins with this prefix
    pub block_prefix: String,
    /// ... and contains this tag
    pub block_tag: String,
    /// Token identifying a step-count line
    pub step_token: String,
    /// Token identifying a reward line
    pub reward_token: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            block_prefix: "[".to_string(),
            block_tag: "collect end:".to_string(),
            step_token: STEP_COUNT.to_string(),
            reward_token: REWARD_MEAN.to_string(),
        }
    }
}

impl ParserConfig {
    /// Set the block tag
    #[must_use]
    pub fn block_tag(mut self, tag: impl Into<String>) -> Self {
        self.block_tag = tag.into();
        self
    }

    /// Set the step-count token
    #[must_use]
    pub fn step_token(mut self, token: impl Into<String>) -> Self {
        self.step_token = token.into();
        self
    }

    /// Set the reward token
    #[must_use]
    pub fn reward_token(mut self, token: impl Into<String>) -> Self {
        self.reward_token = token.into();
        self
    }
}

/// Series preparation and chart settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Records with a larger step count are not plotted
    pub max_step_count: f64,
    /// Gaussian kernel standard deviation; `0.0` disables smoothing
    pub sigma: f64,
    /// Kernel radius is `truncate * sigma` samples (rounded)
    pub truncate: f64,
    /// Figure width in inches
    pub width_in: f64,
    /// Figure height in inches
    pub height_in: f64,
    /// Raster resolution
    pub dpi: u32,
    /// Line width in points
    pub line_width: f64,
    /// Line color as `#rrggbb`
    pub line_color: String,
    /// Chart title; the output base name when unset
    pub title: Option<String>,
    /// X axis description
    pub x_label: String,
    /// Y axis description
    pub y_label: String,
    /// Draw title, axis descriptions and tick labels.
    ///
    /// Text rendering needs a system font; turn this off on hosts without one.
    pub annotate: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_step_count: DEFAULT_MAX_STEP_COUNT,
            sigma: DEFAULT_SIGMA,
            truncate: DEFAULT_TRUNCATE,
            width_in: 10.0,
            height_in: 6.5,
            dpi: 300,
            line_width: 3.0,
            line_color: "#1f77b4".to_string(),
            title: None,
            x_label: "Total Environment Steps".to_string(),
            y_label: "Reward Mean".to_string(),
            annotate: true,
        }
    }
}

impl RenderConfig {
    /// Decode a (possibly partial) JSON document and validate it.
    ///
    /// # Errors
    ///
    /// Returns error if the JSON is malformed or a value is out of range
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and decode a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or decoded
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Set the step-count cap
    #[must_use]
    pub const fn max_step_count(mut self, max: f64) -> Self {
        self.max_step_count = max;
        self
    }

    /// Set the smoothing sigma
    #[must_use]
    pub const fn sigma(mut self, sigma: f64) -> Self {
        self.sigma = sigma;
        self
    }

    /// Set the chart title
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Enable or disable text on the chart
    #[must_use]
    pub const fn annotate(mut self, annotate: bool) -> Self {
        self.annotate = annotate;
        self
    }

    /// Check every value is usable.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` naming the first bad field
    pub fn validate(&self) -> Result<()> {
        if self.max_step_count.is_nan() {
            return Err(Error::InvalidConfig("max_step_count must not be NaN".into()));
        }
        if !self.sigma.is_finite() || self.sigma < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "sigma must be finite and >= 0, got {}",
                self.sigma
            )));
        }
        if !self.truncate.is_finite() || self.truncate < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "truncate must be finite and >= 0, got {}",
                self.truncate
            )));
        }
        if self.dpi == 0 {
            return Err(Error::InvalidConfig("dpi must be > 0".into()));
        }
        if !(self.width_in > 0.0 && self.height_in > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "figure size must be positive, got {}x{}",
                self.width_in, self.height_in
            )));
        }
        self.rgb()?;
        Ok(())
    }

    /// Raster size in pixels at the configured DPI.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn pixel_size(&self) -> (u32, u32) {
        let dpi = f64::from(self.dpi);
        (
            (self.width_in * dpi).round() as u32,
            (self.height_in * dpi).round() as u32,
        )
    }

    /// Vector size in points (1/72 inch).
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn point_size(&self) -> (u32, u32) {
        (
            (self.width_in * 72.0).round() as u32,
            (self.height_in * 72.0).round() as u32,
        )
    }

    /// Line color as an RGB triple.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` unless the color is `#rrggbb`
    pub fn rgb(&self) -> Result<(u8, u8, u8)> {
        let invalid = || {
            Error::InvalidConfig(format!(
                "line_color must be #rrggbb, got {}",
                self.line_color
            ))
        };
        let hex = self.line_color.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok((channel(0)?, channel(2)?, channel(4)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_defaults() {
        let config = RenderConfig::default();
        assert!((config.max_step_count - 1_000_000.0).abs() < f64::EPSILON);
        assert!((config.sigma - 1.0).abs() < f64::EPSILON);
        assert_eq!(config.dpi, 300);
        assert_eq!(config.pixel_size(), (3000, 1950));
        assert_eq!(config.point_size(), (720, 468));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parser_defaults() {
        let config = ParserConfig::default();
        assert_eq!(config.block_prefix, "[");
        assert_eq!(config.block_tag, "collect end:");
        assert_eq!(config.step_token, "total_envstep_count");
        assert_eq!(config.reward_token, "reward_mean");
    }

    #[test]
    fn test_rgb() {
        assert_eq!(RenderConfig::default().rgb().unwrap(), (0x1f, 0x77, 0xb4));
        let mut config = RenderConfig::default();
        config.line_color = "blue".into();
        assert!(config.rgb().is_err());
        config.line_color = "#12345".into();
        assert!(config.rgb().is_err());
        config.line_color = "#gg0000".into();
        assert!(config.rgb().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_sigma() {
        assert!(RenderConfig::default().sigma(-1.0).validate().is_err());
        assert!(RenderConfig::default().sigma(f64::NAN).validate().is_err());
        assert!(RenderConfig::default().sigma(0.0).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_dpi() {
        let mut config = RenderConfig::default();
        config.dpi = 0;
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_partial_json() {
        let config = RenderConfig::from_json_str(r#"{"max_step_count": 500.0, "annotate": false}"#)
            .unwrap();
        assert!((config.max_step_count - 500.0).abs() < f64::EPSILON);
        assert!(!config.annotate);
        assert_eq!(config.line_color, "#1f77b4");
    }
}
