//! Parsed training data
//!
//! ## Schema Overview
//!
//! ```text
//! Dataset (1) ──< LogRecord (N) [file order]
//!                    ├── step_count   (f64)
//!                    └── reward_mean  (f64)
//! ```
//!
//! A `LogRecord` only exists once both fields are known, so a `Dataset`
//! can never hold a partial row. Partially observed blocks live in a
//! `LogRecordBuilder` until they are either completed or discarded.
//!
//! ## Usage
//!
//! ```rust
//! use reward_curve::dataset::{Dataset, LogRecord, LogRecordBuilder};
//!
//! let mut builder = LogRecordBuilder::new();
//! builder.set_step_count(100.0);
//! assert!(builder.build().is_none());
//!
//! builder.set_reward_mean(0.5);
//! let record = builder.build().expect("both fields set");
//!
//! let dataset = Dataset::from(vec![record]);
//! assert_eq!(dataset.len(), 1);
//! assert_eq!(dataset.records()[0], LogRecord::new(100.0, 0.5));
//! ```

mod log_record;
mod table;

pub use log_record::{LogRecord, LogRecordBuilder, REWARD_MEAN, STEP_COUNT};
pub use table::Dataset;
