//! Error types for the csv tail library.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for csv tail operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The watch could not be configured (missing file, bad delimiter).
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// The path does not exist or is not a regular file.
    #[error("File does not exist: {}", path.display())]
    NotFound { path: PathBuf },

    /// The file exists but could not be opened.
    #[error("Could not open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Seeking to the end of the file failed.
    #[error("Could not seek to end of {}: {source}", path.display())]
    Seek {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading appended bytes failed during the poll loop.
    #[error("Read error on {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O errors when writing emitted output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stream has been closed or dropped.
    #[error("Stream closed")]
    StreamClosed,
}

impl Error {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }
}

/// A convenient Result type for csv tail operations.
pub type Result<T> = std::result::Result<T, Error>;
