// src/engine/handle.rs

//! Caller-facing command and read API.

use anyhow::anyhow;
use tokio::sync::{mpsc, oneshot};

use crate::errors::{Result, WorkpoolError};
use crate::scheduler::{Snapshot, TickStep};
use crate::types::{TaskId, WorkerId};

use super::runtime::Request;
use super::{CoreReply, RuntimeEvent};

/// Cloneable handle to a running [`super::Runtime`].
///
/// Every call is a round trip through the runtime's channel, so it is
/// ordered with respect to ticks and to calls from other handles.
#[derive(Debug, Clone)]
pub struct PoolHandle {
    tx: mpsc::Sender<Request>,
}

impl PoolHandle {
    /// Create a handle plus the receiver to pass to `Runtime::new`.
    pub fn channel(buffer: usize) -> (Self, mpsc::Receiver<Request>) {
        let (tx, rx) = mpsc::channel(buffer);
        (Self { tx }, rx)
    }

    /// Add an idle worker. Fails with `WorkpoolError::Capacity` at the cap.
    pub async fn add_worker(&self) -> Result<WorkerId> {
        match self.request(RuntimeEvent::AddWorker).await? {
            CoreReply::WorkerAdded(result) => Ok(result?),
            other => Err(unexpected(other)),
        }
    }

    /// Remove the most recently added idle worker, if any.
    pub async fn remove_worker(&self) -> Result<Option<WorkerId>> {
        match self.request(RuntimeEvent::RemoveWorker).await? {
            CoreReply::WorkerRemoved(removed) => Ok(removed),
            other => Err(unexpected(other)),
        }
    }

    /// Enqueue `count` tasks; counts below 1 enqueue nothing.
    pub async fn enqueue_tasks(&self, count: i64) -> Result<Vec<TaskId>> {
        match self.request(RuntimeEvent::EnqueueTasks { count }).await? {
            CoreReply::TasksEnqueued(ids) => Ok(ids),
            other => Err(unexpected(other)),
        }
    }

    pub async fn snapshot(&self) -> Result<Snapshot> {
        match self.request(RuntimeEvent::Snapshot).await? {
            CoreReply::Snapshot(snapshot) => Ok(snapshot),
            other => Err(unexpected(other)),
        }
    }

    /// Run a tick now, in addition to the periodic ones.
    pub async fn tick(&self) -> Result<TickStep> {
        match self.request(RuntimeEvent::Tick).await? {
            CoreReply::Ticked(step) => Ok(step),
            other => Err(unexpected(other)),
        }
    }

    /// Ask the runtime to stop. Does not wait for it to finish.
    pub async fn shutdown(&self) -> Result<()> {
        self.tx
            .send(Request {
                event: RuntimeEvent::ShutdownRequested,
                reply: None,
            })
            .await
            .map_err(|_| WorkpoolError::RuntimeStopped)
    }

    async fn request(&self, event: RuntimeEvent) -> Result<CoreReply> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(Request {
                event,
                reply: Some(reply_tx),
            })
            .await
            .map_err(|_| WorkpoolError::RuntimeStopped)?;

        reply_rx.await.map_err(|_| WorkpoolError::RuntimeStopped)
    }
}

fn unexpected(reply: CoreReply) -> WorkpoolError {
    WorkpoolError::Other(anyhow!("unexpected reply from core: {reply:?}"))
}
