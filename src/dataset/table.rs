//! Dataset - ordered collection of parsed records

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{LogRecord, REWARD_MEAN, STEP_COUNT};

/// Ordered sequence of records in file-appearance order.
///
/// Built once by a single parse pass and read-only afterwards. Sorting and
/// filtering happen on copies inside the renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    records: Vec<LogRecord>,
}

impl Dataset {
    /// Create an empty dataset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if no block produced a complete record.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, in file order.
    #[must_use]
    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    /// Iterate over records in file order.
    pub fn iter(&self) -> std::slice::Iter<'_, LogRecord> {
        self.records.iter()
    }

    /// Column names, in display order.
    #[must_use]
    pub const fn columns(&self) -> [&'static str; 2] {
        [STEP_COUNT, REWARD_MEAN]
    }

    /// The first `n` records (fewer if the dataset is shorter).
    #[must_use]
    pub fn head(&self, n: usize) -> &[LogRecord] {
        &self.records[..n.min(self.records.len())]
    }

    pub(crate) fn push(&mut self, record: LogRecord) {
        self.records.push(record);
    }
}

impl From<Vec<LogRecord>> for Dataset {
    fn from(records: Vec<LogRecord>) -> Self {
        Self { records }
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a LogRecord;
    type IntoIter = std::slice::Iter<'a, LogRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Renders the first five rows as an indexed table.
impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>5}  {:>20}  {:>12}", "", STEP_COUNT, REWARD_MEAN)?;
        for (i, record) in self.head(5).iter().enumerate() {
            writeln!(
                f,
                "{i:>5}  {:>20.1}  {:>12.6}",
                record.step_count(),
                record.reward_mean()
            )?;
        }
        Ok(())
    }
}
