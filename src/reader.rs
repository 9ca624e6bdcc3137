//! File access for the poll loop: existence check, open, seek and drain.

use crate::error::{Error, Result};
use std::io::{ErrorKind, SeekFrom};
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tracing::debug;

/// Check whether `path` names a regular file that can be watched.
///
/// A stat failure other than "not found" counts as existing so that
/// [`TailFile::open`] reports the real cause.
pub async fn exists<P: AsRef<Path>>(path: P) -> bool {
    match tokio::fs::metadata(path.as_ref()).await {
        Ok(metadata) => metadata.is_file(),
        Err(e) => e.kind() != ErrorKind::NotFound,
    }
}

/// An open file being followed from a known position.
#[derive(Debug)]
pub struct TailFile {
    file: File,
    path: PathBuf,
    position: u64,
}

impl TailFile {
    /// Open `path` for reading, positioned at its start.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).await.map_err(|source| Error::Open {
            path: path.clone(),
            source,
        })?;

        Ok(Self {
            file,
            path,
            position: 0,
        })
    }

    /// Skip everything already in the file; only later appends are read.
    pub async fn seek_to_end(&mut self) -> Result<()> {
        self.position = self
            .file
            .seek(SeekFrom::End(0))
            .await
            .map_err(|source| Error::Seek {
                path: self.path.clone(),
                source,
            })?;
        debug!(path = %self.path.display(), position = self.position, "seeked to end");
        Ok(())
    }

    /// Read every byte appended since the previous call.
    ///
    /// Returns an empty buffer when nothing new has been written; that is the
    /// normal state between appends, not an error.
    pub async fn read_appended(&mut self) -> Result<Vec<u8>> {
        let mut chunk = Vec::new();
        let read = self
            .file
            .read_to_end(&mut chunk)
            .await
            .map_err(|source| Error::Read {
                path: self.path.clone(),
                source,
            })?;

        self.position += read as u64;
        if read > 0 {
            debug!(bytes = read, position = self.position, "read appended bytes");
        }
        Ok(chunk)
    }

    /// Path the file was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Byte offset of the next read.
    pub fn position(&self) -> u64 {
        self.position
    }
}

/// Check, open and seek to the end of `path`, ready for [`crate::watch`].
pub async fn open_at_end<P: AsRef<Path>>(path: P) -> Result<TailFile> {
    let path = path.as_ref();
    if !exists(path).await {
        return Err(Error::NotFound {
            path: path.to_path_buf(),
        });
    }

    let mut file = TailFile::open(path).await?;
    file.seek_to_end().await?;
    Ok(file)
}
