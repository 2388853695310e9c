// src/scheduler/mod.rs

//! Tick-driven pairing of workers and tasks.
//!
//! - [`scheduler`] owns the pool and queue and runs the tick.
//! - [`tick_step`] describes what a single tick changed.
//! - [`snapshot`] is the read model for display.

pub mod scheduler;
pub mod snapshot;
pub mod tick_step;

pub use scheduler::Scheduler;
pub use snapshot::{format_elapsed, Snapshot, TaskView, WorkerView, IDLE_DISPLAY_TEXT};
pub use tick_step::{Assignment, Completion, TickStep};
