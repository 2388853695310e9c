// src/engine/mod.rs

//! Orchestration engine for workpool.
//!
//! The worker pool and task queue have exactly one owner: the runtime task.
//! Everything else talks to it through a [`PoolHandle`]. The runtime loop
//! reacts to:
//!   - commands from collaborators (add/remove worker, enqueue, snapshot)
//!   - its own periodic tick
//!   - shutdown requests
//!
//! and handles them one at a time, so a tick never overlaps a command or
//! another tick.
//!
//! The pure core state machine lives in [`core`]; the async/IO shell is
//! implemented in [`runtime`]; [`handle`] is the caller-facing API.

use std::time::Duration;

use crate::errors::CapacityError;
use crate::scheduler::{Snapshot, TickStep};
use crate::types::{TaskId, WorkerId};

/// Runtime options used by both the core and the async shell.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeOptions {
    /// Period of the scheduling tick.
    pub tick_interval: Duration,
    /// If true, stop the runtime after the first tick that finds no tasks
    /// left (used for `--once`).
    pub exit_when_idle: bool,
}

/// Events flowing into the core.
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    AddWorker,
    RemoveWorker,
    EnqueueTasks { count: i64 },
    Snapshot,
    /// Run one scheduling tick.
    Tick,
    /// Graceful shutdown requested (e.g. Ctrl-C).
    ShutdownRequested,
}

/// Answer produced by the core for a single event.
#[derive(Debug, Clone)]
pub enum CoreReply {
    WorkerAdded(Result<WorkerId, CapacityError>),
    WorkerRemoved(Option<WorkerId>),
    TasksEnqueued(Vec<TaskId>),
    Snapshot(Snapshot),
    Ticked(TickStep),
    ShuttingDown,
}

/// Decision returned by the core after handling a single `RuntimeEvent`.
#[derive(Debug, Clone)]
pub struct CoreStep {
    pub reply: CoreReply,
    /// Whether the outer runtime loop should keep running.
    pub keep_running: bool,
}

pub mod core;
pub mod handle;
pub mod runtime;

pub use self::core::CoreRuntime;
pub use handle::PoolHandle;
pub use runtime::{Request, Runtime};
