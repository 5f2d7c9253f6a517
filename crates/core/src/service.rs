//! Single-writer history service
//!
//! The launch history is owned by one worker. Launch notifications and
//! queries from any task or thread go through a [`HistoryHandle`], which
//! forwards them over a channel. The worker persists the history when it is
//! shut down or when every handle has been dropped.

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::error::{Error, Result};
use crate::history::{HistoryFile, LaunchHistory};
use crate::models::{ConfigRef, HistoryEntry, LaunchEvent, LaunchMode};
use crate::storage::ConfigurationStore;

/// Pending commands before senders wait
const COMMAND_BUFFER: usize = 64;

enum Command {
    Record(LaunchEvent, oneshot::Sender<bool>),
    RemoveEntry(HistoryEntry),
    ConfigurationRemoved(ConfigRef),
    History(LaunchMode, oneshot::Sender<Vec<HistoryEntry>>),
    MostRecent(oneshot::Sender<Option<HistoryEntry>>),
    Shutdown(oneshot::Sender<Result<()>>),
}

/// Cloneable handle to the history worker
#[derive(Clone)]
pub struct HistoryHandle {
    cmd_tx: mpsc::Sender<Command>,
}

/// Owner of a [`LaunchHistory`] and the store it consults
pub struct HistoryService<S> {
    history: LaunchHistory,
    store: S,
    file: HistoryFile,
}

impl<S> HistoryService<S>
where
    S: ConfigurationStore + Send + 'static,
{
    pub fn new(history: LaunchHistory, store: S, file: HistoryFile) -> Self {
        Self {
            history,
            store,
            file,
        }
    }

    /// Restore from `file` (empty if absent or unreadable) and drop entries
    /// whose configuration is gone
    pub fn restore(store: S, file: HistoryFile) -> Self {
        let mut history = file.load_or_default();
        history.prune_missing(&store);
        Self::new(history, store, file)
    }

    /// Start the worker on the blocking pool.
    ///
    /// The join handle completes after the history has been persisted.
    pub fn spawn(self) -> (HistoryHandle, JoinHandle<()>) {
        let (cmd_tx, cmd_rx) = mpsc::channel(COMMAND_BUFFER);
        let worker = tokio::task::spawn_blocking(move || self.run(cmd_rx));
        (HistoryHandle { cmd_tx }, worker)
    }

    fn run(mut self, mut cmd_rx: mpsc::Receiver<Command>) {
        info!(path = %self.file.path().display(), "History service started");

        while let Some(cmd) = cmd_rx.blocking_recv() {
            match cmd {
                Command::Record(event, reply) => {
                    let recorded = self.history.record(&self.store, &event);
                    let _ = reply.send(recorded);
                }
                Command::RemoveEntry(entry) => self.history.remove_entry(&entry),
                Command::ConfigurationRemoved(reference) => {
                    self.history.remove_configuration(&reference);
                }
                Command::History(mode, reply) => {
                    let _ = reply.send(self.history.history(mode).to_vec());
                }
                Command::MostRecent(reply) => {
                    let _ = reply.send(self.history.most_recent().cloned());
                }
                Command::Shutdown(reply) => {
                    let result = self.file.save(&self.history);
                    if let Err(e) = &result {
                        error!(error = %e, "Failed to persist launch history");
                    }
                    let _ = reply.send(result);
                    info!("History service stopped");
                    return;
                }
            }
        }

        debug!("All history handles dropped");
        if let Err(e) = self.file.save(&self.history) {
            error!(error = %e, "Failed to persist launch history");
        }
    }
}

impl HistoryHandle {
    async fn send(&self, cmd: Command) -> Result<()> {
        self.cmd_tx
            .send(cmd)
            .await
            .map_err(|_| Error::ServiceStopped)
    }

    /// Record a launch, returning whether it entered the history
    pub async fn record(&self, event: LaunchEvent) -> Result<bool> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Record(event, tx)).await?;
        rx.await.map_err(|_| Error::ServiceStopped)
    }

    pub async fn remove_entry(&self, entry: HistoryEntry) -> Result<()> {
        self.send(Command::RemoveEntry(entry)).await
    }

    /// Notify the history that a configuration was deleted from the store
    pub async fn configuration_removed(&self, reference: ConfigRef) -> Result<()> {
        self.send(Command::ConfigurationRemoved(reference)).await
    }

    /// Snapshot of one mode's history, most recent first
    pub async fn history(&self, mode: LaunchMode) -> Result<Vec<HistoryEntry>> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::History(mode, tx)).await?;
        rx.await.map_err(|_| Error::ServiceStopped)
    }

    pub async fn most_recent(&self) -> Result<Option<HistoryEntry>> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::MostRecent(tx)).await?;
        rx.await.map_err(|_| Error::ServiceStopped)
    }

    /// Persist the history and stop the worker
    pub async fn shutdown(self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Shutdown(tx)).await?;
        rx.await.map_err(|_| Error::ServiceStopped)?
    }
}
