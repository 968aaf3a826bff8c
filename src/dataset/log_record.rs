//! Log Record - one aligned (step count, reward mean) point

use serde::{Deserialize, Serialize};

/// Column name of the environment step counter.
pub const STEP_COUNT: &str = "total_envstep_count";

/// Column name of the mean reward metric.
pub const REWARD_MEAN: &str = "reward_mean";

/// A single data point extracted from one log block.
///
/// Both fields are always present; incomplete blocks never become a
/// `LogRecord` (see [`LogRecordBuilder::build`]).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LogRecord {
    #[serde(rename = "total_envstep_count")]
    step_count: f64,
    reward_mean: f64,
}

impl LogRecord {
    /// Create a new record.
    ///
    /// # Arguments
    ///
    /// * `step_count` - Total environment steps at the end of the block
    /// * `reward_mean` - Mean episode reward reported in the block
    #[must_use]
    pub const fn new(step_count: f64, reward_mean: f64) -> Self {
        Self {
            step_count,
            reward_mean,
        }
    }

    /// Get the environment step count.
    #[must_use]
    pub const fn step_count(&self) -> f64 {
        self.step_count
    }

    /// Get the mean reward.
    #[must_use]
    pub const fn reward_mean(&self) -> f64 {
        self.reward_mean
    }
}

/// Accumulates the fields of the block currently being read.
///
/// Setters overwrite, so the last value seen in a block wins.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LogRecordBuilder {
    step_count: Option<f64>,
    reward_mean: Option<f64>,
}

impl LogRecordBuilder {
    /// Create an empty builder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            step_count: None,
            reward_mean: None,
        }
    }

    /// Set (or overwrite) the step count.
    pub fn set_step_count(&mut self, step_count: f64) {
        self.step_count = Some(step_count);
    }

    /// Set (or overwrite) the mean reward.
    pub fn set_reward_mean(&mut self, reward_mean: f64) {
        self.reward_mean = Some(reward_mean);
    }

    /// True when neither field has been observed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.step_count.is_none() && self.reward_mean.is_none()
    }

    /// Build the record if both fields are set.
    #[must_use]
    pub fn build(&self) -> Option<LogRecord> {
        Some(LogRecord::new(self.step_count?, self.reward_mean?))
    }

    /// Clear both fields.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_record_new() {
        let record = LogRecord::new(100.0, 0.5);
        assert!((record.step_count() - 100.0).abs() < f64::EPSILON);
        assert!((record.reward_mean() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_builder_requires_both_fields() {
        let mut builder = LogRecordBuilder::new();
        assert!(builder.is_empty());
        assert!(builder.build().is_none());

        builder.set_reward_mean(0.9);
        assert!(!builder.is_empty());
        assert!(builder.build().is_none());

        builder.set_step_count(10.0);
        assert_eq!(builder.build(), Some(LogRecord::new(10.0, 0.9)));
    }

    #[test]
    fn test_builder_last_value_wins() {
        let mut builder = LogRecordBuilder::new();
        builder.set_step_count(1.0);
        builder.set_reward_mean(0.1);
        builder.set_reward_mean(0.2);
        assert_eq!(builder.build(), Some(LogRecord::new(1.0, 0.2)));
    }

    #[test]
    fn test_builder_reset() {
        let mut builder = LogRecordBuilder::new();
        builder.set_step_count(1.0);
        builder.set_reward_mean(0.1);
        builder.reset();
        assert!(builder.is_empty());
        assert!(builder.build().is_none());
    }

    #[test]
    fn test_serialized_column_names() {
        let json = serde_json::to_value(LogRecord::new(5.0, 1.5)).unwrap();
        assert_eq!(json[STEP_COUNT], 5.0);
        assert_eq!(json[REWARD_MEAN], 1.5);
    }
}
