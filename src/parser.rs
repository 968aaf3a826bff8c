//! Line-oriented training log parser
//!
//! A log is a sequence of blocks. Each block starts at a marker line
//! (`[... collect end: ...]`) and carries any number of `label: value`
//! lines. The parser keeps one in-progress record per block:
//!
//! ```text
//! ACCUMULATING --(field line)---> ACCUMULATING   set / overwrite field
//! ACCUMULATING --(block marker)-> ACCUMULATING   flush if complete, reset
//! end of input ------------------> flush if complete
//! ```
//!
//! Unparseable values and incomplete blocks are dropped without a
//! diagnostic; both are normal in real logs.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info};

use crate::config::ParserConfig;
use crate::dataset::{Dataset, LogRecordBuilder};
use crate::Result;

/// Classification of a single trimmed log line.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Line {
    /// Start of a new block
    BlockStart,
    /// Step-count line; `None` when the value did not parse
    StepCount(Option<f64>),
    /// Reward line; `None` when the value did not parse
    RewardMean(Option<f64>),
    /// Anything else
    Other,
}

/// Training log parser.
#[derive(Debug, Clone, Default)]
pub struct LogParser {
    config: ParserConfig,
}

impl LogParser {
    /// Create a parser with the default tokens.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom tokens.
    #[must_use]
    pub const fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a log file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be opened or read
    pub fn parse<P: AsRef<Path>>(&self, path: P) -> Result<Dataset> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let dataset = self.parse_reader(BufReader::new(file))?;
        info!(path = %path.display(), records = dataset.len(), "parsed log");
        Ok(dataset)
    }

    /// Parse log text from any buffered reader.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` on read failure (including invalid UTF-8)
    pub fn parse_reader<R: BufRead>(&self, reader: R) -> Result<Dataset> {
        let mut blocks = Blocks::default();
        for line in reader.lines() {
            blocks.feed(self.classify(line?.trim()));
        }
        Ok(blocks.finish())
    }

    /// Parse log text held in memory.
    #[must_use]
    pub fn parse_str(&self, text: &str) -> Dataset {
        let mut blocks = Blocks::default();
        for line in text.lines() {
            blocks.feed(self.classify(line.trim()));
        }
        blocks.finish()
    }

    /// Block markers take precedence over field tokens, and the step token
    /// over the reward token.
    fn classify(&self, line: &str) -> Line {
        let config = &self.config;
        if line.starts_with(config.block_prefix.as_str()) && line.contains(config.block_tag.as_str())
        {
            Line::BlockStart
        } else if line.contains(config.step_token.as_str()) {
            Line::StepCount(field_value(line))
        } else if line.contains(config.reward_token.as_str()) {
            Line::RewardMean(field_value(line))
        } else {
            Line::Other
        }
    }
}

/// Parse a log file with the default tokens.
///
/// # Errors
///
/// Returns `Error::Io` if the file cannot be opened or read
pub fn parse<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    LogParser::new().parse(path)
}

/// Value between the first and second colon, if it is a float.
fn field_value(line: &str) -> Option<f64> {
    let value = line.split(':').nth(1)?;
    value.trim().parse().ok()
}

/// Parser state: the records so far plus the block being read.
#[derive(Debug, Default)]
struct Blocks {
    dataset: Dataset,
    current: LogRecordBuilder,
}

impl Blocks {
    fn feed(&mut self, line: Line) {
        match line {
            Line::BlockStart => {
                self.flush();
                self.current.reset();
            }
            Line::StepCount(Some(value)) => self.current.set_step_count(value),
            Line::RewardMean(Some(value)) => self.current.set_reward_mean(value),
            Line::StepCount(None) | Line::RewardMean(None) | Line::Other => {}
        }
    }

    fn flush(&mut self) {
        match self.current.build() {
            Some(record) => self.dataset.push(record),
            None if !self.current.is_empty() => {
                debug!(current = ?self.current, "dropping incomplete block");
            }
            None => {}
        }
    }

    fn finish(mut self) -> Dataset {
        self.flush();
        self.dataset
    }
}
