//! Follow a growing CSV file and print either everything appended to it or
//! only selected columns of each newly completed row.
//!
//! Rows can be appended in pieces, and a poll may fire before a row's
//! terminator has been written. The column selector keeps its position
//! between polls, so the output never depends on where a read happened to
//! stop.
//!
//! # Example
//!
//! ```rust,no_run
//! use csv_tail::{WatchConfig, open_at_end, watch};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = WatchConfig::builder().columns([0, 2]).seconds(1).build()?;
//!     let file = open_at_end("data.csv").await?;
//!
//!     watch(file, &config, &mut tokio::io::stdout()).await?;
//!     Ok(())
//! }
//! ```

mod config;
mod emitter;
mod error;
mod reader;
mod selector;
mod stream;
mod tokenizer;
mod watcher;

#[cfg(test)]
mod test_helpers;

pub use config::{LineBreak, MIN_POLL_INTERVAL, WatchConfig, WatchConfigBuilder, unique_sorted};
pub use emitter::Emitter;
pub use error::{Error, Result};
pub use reader::{TailFile, exists, open_at_end};
pub use selector::{ColumnSelector, RowCursor};
pub use stream::CsvStream;
pub use tokenizer::{Boundary, Token, tokenize};
pub use watcher::{Poller, watch};

use std::path::Path;
use tokio_stream::Stream;

/// Creates a stream of output produced by appends to a csv file.
///
/// Content already in the file is skipped; each item is the output of one
/// poll tick that completed at least one selected column or, in passthrough
/// mode, read any bytes at all.
///
/// # Example
///
/// ```rust,no_run
/// use csv_tail::{WatchConfig, watch_csv};
/// use tokio_stream::StreamExt;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = WatchConfig::builder().columns([1]).build()?;
///     let mut stream = watch_csv("data.csv", config).await?;
///
///     while let Some(output) = stream.next().await {
///         print!("{}", String::from_utf8_lossy(&output?));
///     }
///
///     Ok(())
/// }
/// ```
pub async fn watch_csv<P: AsRef<Path>>(
    path: P,
    config: WatchConfig,
) -> Result<impl Stream<Item = Result<Vec<u8>>>> {
    CsvStream::new(path, config).await
}
