//! Stream implementation yielding emitted output from a followed csv file.

use crate::config::WatchConfig;
use crate::error::{Error, Result};
use crate::reader::{TailFile, open_at_end};
use crate::watcher::Poller;
use futures::Stream;
use std::path::Path;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, error};

/// A stream of output batches, one per poll tick that produced output.
pub struct CsvStream {
    receiver: mpsc::UnboundedReceiver<Result<Vec<u8>>>,
    _shutdown_tx: broadcast::Sender<()>,
    _task_handle: JoinHandle<()>,
}

impl CsvStream {
    /// Opens `path` at its end and starts polling it in the background.
    pub async fn new<P: AsRef<Path>>(path: P, config: WatchConfig) -> Result<Self> {
        let file = open_at_end(path).await?;
        Ok(Self::from_file(file, config))
    }

    /// Starts polling an already opened file from its current position.
    pub fn from_file(file: TailFile, config: WatchConfig) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

        let task_handle = tokio::spawn(async move {
            if let Err(e) = poll_task(file, config, tx, shutdown_rx).await {
                error!(error = %e, "csv poll task stopped");
            }
        });

        CsvStream {
            receiver: rx,
            _shutdown_tx: shutdown_tx,
            _task_handle: task_handle,
        }
    }

    #[cfg(test)]
    pub fn is_closed(&self) -> bool {
        self.receiver.is_closed()
    }
}

impl Drop for CsvStream {
    fn drop(&mut self) {
        let _ = self._shutdown_tx.send(());
    }
}

/// Background task: tick, drain, forward non-empty output.
async fn poll_task(
    file: TailFile,
    config: WatchConfig,
    tx: mpsc::UnboundedSender<Result<Vec<u8>>>,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> Result<()> {
    let mut poller = Poller::new(file, &config);
    let mut ticker = time::interval(config.poll_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = shutdown_rx.recv() => {
                debug!("csv stream dropped, stopping poll task");
                break;
            }

            _ = ticker.tick() => {
                match poller.drain().await {
                    Ok(Some(output)) if !output.is_empty() => {
                        if tx.send(Ok(output)).is_err() {
                            return Err(Error::StreamClosed);
                        }
                    }
                    Ok(_) => {}
                    Err(e) => {
                        let _ = tx.send(Err(e));
                        break;
                    }
                }
            }
        }
    }

    Ok(())
}

impl Stream for CsvStream {
    type Item = Result<Vec<u8>>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.receiver).poll_recv(cx)
    }
}
