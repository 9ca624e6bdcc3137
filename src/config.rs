//! Watch configuration built once at start-up.

use crate::error::{Error, Result};
use std::time::Duration;

/// Smallest poll interval; non-positive second counts are mapped to this.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Line terminator written after each emitted row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineBreak {
    /// `\n`
    Lf,
    /// `\r\n`
    CrLf,
}

impl LineBreak {
    /// The terminator used by the host OS.
    pub fn native() -> Self {
        if cfg!(windows) { Self::CrLf } else { Self::Lf }
    }

    /// The terminator as raw bytes.
    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            Self::Lf => b"\n",
            Self::CrLf => b"\r\n",
        }
    }
}

impl Default for LineBreak {
    fn default() -> Self {
        Self::native()
    }
}

/// Immutable settings for one watch session.
///
/// Selected columns are always strictly ascending with no duplicates; the
/// column selector walks them with a single forward pointer per row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchConfig {
    columns: Vec<usize>,
    delimiter: u8,
    line_break: LineBreak,
    poll_interval: Duration,
}

impl WatchConfig {
    /// Start building a config from CLI-style values.
    pub fn builder() -> WatchConfigBuilder {
        WatchConfigBuilder::default()
    }

    /// Selected column indices, strictly ascending.
    pub fn columns(&self) -> &[usize] {
        &self.columns
    }

    /// Field delimiter byte.
    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Terminator written after each emitted row.
    pub fn line_break(&self) -> LineBreak {
        self.line_break
    }

    /// Time between polls, never zero.
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// True when no column filter is configured and input is echoed as-is.
    pub fn is_passthrough(&self) -> bool {
        self.columns.is_empty()
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            delimiter: b',',
            line_break: LineBreak::native(),
            poll_interval: Duration::from_secs(1),
        }
    }
}

/// Builder that normalizes raw CLI-style input into a [`WatchConfig`].
#[derive(Debug, Clone)]
pub struct WatchConfigBuilder {
    columns: Vec<usize>,
    delimiter: String,
    line_break: LineBreak,
    seconds: i64,
}

impl Default for WatchConfigBuilder {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            delimiter: ",".to_string(),
            line_break: LineBreak::native(),
            seconds: 1,
        }
    }
}

impl WatchConfigBuilder {
    /// Columns to print; may be unsorted and contain duplicates.
    pub fn columns(mut self, columns: impl IntoIterator<Item = usize>) -> Self {
        self.columns = columns.into_iter().collect();
        self
    }

    /// Field delimiter; must be a single ASCII character.
    pub fn delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Terminator for emitted rows.
    pub fn line_break(mut self, line_break: LineBreak) -> Self {
        self.line_break = line_break;
        self
    }

    /// Poll interval in whole seconds. Zero or negative means "as fast as practical".
    pub fn seconds(mut self, seconds: i64) -> Self {
        self.seconds = seconds;
        self
    }

    /// Normalize and validate the collected values.
    pub fn build(self) -> Result<WatchConfig> {
        Ok(WatchConfig {
            columns: unique_sorted(self.columns),
            delimiter: parse_delimiter(&self.delimiter)?,
            line_break: self.line_break,
            poll_interval: poll_interval_from_seconds(self.seconds),
        })
    }
}

/// Deduplicate and sort column indices ascending.
pub fn unique_sorted(mut columns: Vec<usize>) -> Vec<usize> {
    columns.sort_unstable();
    columns.dedup();
    columns
}

/// Map a whole-second count to a poll interval, clamping to [`MIN_POLL_INTERVAL`].
pub fn poll_interval_from_seconds(seconds: i64) -> Duration {
    match u64::try_from(seconds) {
        Ok(secs) if secs > 0 => Duration::from_secs(secs),
        _ => MIN_POLL_INTERVAL,
    }
}

fn parse_delimiter(delimiter: &str) -> Result<u8> {
    match delimiter.as_bytes() {
        [b'\n'] | [b'\r'] => Err(Error::configuration(format!(
            "delimiter {:?} collides with the line terminator",
            delimiter
        ))),
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => Err(Error::configuration(format!(
            "delimiter must be a single ASCII character, got {:?}",
            delimiter
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_sorted() {
        assert_eq!(unique_sorted(vec![3, 1, 2, 2, 3, 4, 1]), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_unique_sorted_empty() {
        assert_eq!(unique_sorted(Vec::new()), Vec::<usize>::new());
    }

    #[test]
    fn test_unique_sorted_is_strictly_ascending() {
        let result = unique_sorted(vec![9, 0, 9, 5, 0, 7, 5, 5]);
        assert!(result.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(result, vec![0, 5, 7, 9]);
    }

    #[test]
    fn test_poll_interval_from_seconds() {
        assert_eq!(poll_interval_from_seconds(1), Duration::from_secs(1));
        assert_eq!(poll_interval_from_seconds(30), Duration::from_secs(30));
        assert_eq!(poll_interval_from_seconds(0), MIN_POLL_INTERVAL);
        assert_eq!(poll_interval_from_seconds(-5), MIN_POLL_INTERVAL);
        assert_eq!(poll_interval_from_seconds(i64::MIN), MIN_POLL_INTERVAL);
    }

    #[test]
    fn test_builder_defaults() {
        let config = WatchConfig::builder().build().unwrap();

        assert!(config.is_passthrough());
        assert_eq!(config.delimiter(), b',');
        assert_eq!(config.line_break(), LineBreak::native());
        assert_eq!(config.poll_interval(), Duration::from_secs(1));
        assert_eq!(config, WatchConfig::default());
    }

    #[test]
    fn test_builder_normalizes_columns() {
        let config = WatchConfig::builder()
            .columns([4, 2, 4, 0])
            .delimiter("\t")
            .seconds(0)
            .build()
            .unwrap();

        assert_eq!(config.columns(), &[0, 2, 4]);
        assert_eq!(config.delimiter(), b'\t');
        assert_eq!(config.poll_interval(), MIN_POLL_INTERVAL);
        assert!(!config.is_passthrough());
    }

    #[test]
    fn test_delimiter_validation() {
        for bad in ["", ";;", "é", "\n", "\r"] {
            let result = WatchConfig::builder().delimiter(bad).build();
            match result {
                Err(Error::Configuration { .. }) => {}
                other => panic!("Expected configuration error for {:?}, got {:?}", bad, other),
            }
        }

        for good in [",", ";", "|", " ", "\t"] {
            assert!(WatchConfig::builder().delimiter(good).build().is_ok());
        }
    }

    #[test]
    fn test_line_break_bytes() {
        assert_eq!(LineBreak::Lf.as_bytes(), b"\n");
        assert_eq!(LineBreak::CrLf.as_bytes(), b"\r\n");
    }
}
