//! Single-writer persistence queue.
//!
//! Snapshots are applied in the order they were queued. Producers never
//! wait for a write to complete.

use crate::store::KeyValueStore;
use log::{debug, error};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

enum WriterCommand {
    Save(String),
    Flush(oneshot::Sender<()>),
}

pub(crate) struct SnapshotWriter {
    commands: mpsc::UnboundedSender<WriterCommand>,
    task: JoinHandle<()>,
}

impl SnapshotWriter {
    /// Spawns the writer task on the current tokio runtime.
    pub(crate) fn spawn(store: Arc<dyn KeyValueStore>, key: String) -> Self {
        let (commands, receiver) = mpsc::unbounded_channel();
        let task = tokio::spawn(run_writer(store, key, receiver));
        Self { commands, task }
    }

    /// Queues one snapshot write. Returns `false` if the writer is gone.
    pub(crate) fn enqueue(&self, snapshot: String) -> bool {
        self.commands.send(WriterCommand::Save(snapshot)).is_ok()
    }

    /// Waits until every previously queued snapshot has been attempted.
    pub(crate) async fn flush(&self) {
        let (ack, done) = oneshot::channel();
        if self.commands.send(WriterCommand::Flush(ack)).is_err() {
            return;
        }
        let _ = done.await;
    }

    /// Closes the queue and waits for the pending writes to drain.
    pub(crate) async fn shutdown(self) {
        drop(self.commands);
        if let Err(err) = self.task.await {
            error!("event=pets_writer_stop module=repo status=error error={err}");
        }
    }
}

async fn run_writer(
    store: Arc<dyn KeyValueStore>,
    key: String,
    mut receiver: mpsc::UnboundedReceiver<WriterCommand>,
) {
    while let Some(command) = receiver.recv().await {
        match command {
            WriterCommand::Save(snapshot) => {
                let started_at = Instant::now();
                match store.set(&key, &snapshot).await {
                    Ok(()) => debug!(
                        "event=pets_save module=repo status=ok key={key} bytes={} duration_ms={}",
                        snapshot.len(),
                        started_at.elapsed().as_millis()
                    ),
                    Err(err) => error!(
                        "event=pets_save module=repo status=error key={key} duration_ms={} error={err}",
                        started_at.elapsed().as_millis()
                    ),
                }
            }
            WriterCommand::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }
    debug!("event=pets_writer_stop module=repo status=ok key={key}");
}
