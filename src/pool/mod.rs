// src/pool/mod.rs

//! Worker and task collections.
//!
//! - [`model`] holds the `Worker` and `Task` records and their states.
//! - [`worker_pool`] is the bounded, creation-ordered set of workers.
//! - [`task_queue`] is the arrival-ordered set of tasks.
//!
//! Neither collection knows about the other; pairing them is the
//! scheduler's job.

pub mod model;
pub mod task_queue;
pub mod worker_pool;

pub use model::{Task, TaskState, Worker, WorkerState};
pub use task_queue::{MAX_ENQUEUE_BATCH, TaskQueue};
pub use worker_pool::WorkerPool;
