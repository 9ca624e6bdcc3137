//! Fixed-interval poll loop that drains appended bytes into an emitter.

use crate::config::WatchConfig;
use crate::emitter::Emitter;
use crate::error::Result;
use crate::reader::TailFile;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, trace};

/// One watch session: the open file plus the emitter state that follows it.
#[derive(Debug)]
pub struct Poller {
    file: TailFile,
    emitter: Emitter,
}

impl Poller {
    /// Start a session over `file` with a fresh emitter for `config`.
    pub fn new(file: TailFile, config: &WatchConfig) -> Self {
        Self {
            file,
            emitter: Emitter::new(config),
        }
    }

    /// Drain everything appended since the last tick.
    ///
    /// Returns `None` when the file had no new bytes, so the emitter is not
    /// invoked. Otherwise returns the emitter's output, which may be empty
    /// if the chunk only extended a pending column.
    pub async fn drain(&mut self) -> Result<Option<Vec<u8>>> {
        let chunk = self.file.read_appended().await?;
        if chunk.is_empty() {
            trace!("no new data");
            return Ok(None);
        }

        let output = self.emitter.emit(&chunk);
        debug!(read = chunk.len(), emitted = output.len(), "processed chunk");
        Ok(Some(output))
    }

    /// The file being followed.
    pub fn file(&self) -> &TailFile {
        &self.file
    }
}

/// Follow `file`, writing emitted output to `out` after each tick.
///
/// Runs until reading the file or writing the output fails.
pub async fn watch<W>(file: TailFile, config: &WatchConfig, out: &mut W) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    info!(
        path = %file.path().display(),
        columns = ?config.columns(),
        interval = ?config.poll_interval(),
        "watching file"
    );

    let mut poller = Poller::new(file, config);
    let mut ticker = time::interval(config.poll_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        if let Some(output) = poller.drain().await? {
            if !output.is_empty() {
                out.write_all(&output).await?;
                out.flush().await?;
            }
        }
    }
}
