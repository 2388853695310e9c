// src/scheduler/tick_step.rs

//! Result types for a single scheduler tick.

use std::time::Duration;

use crate::clock::Instant;
use crate::types::{TaskId, WorkerId};

/// A worker/task pair made during the assignment pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    pub worker: WorkerId,
    pub task: TaskId,
}

/// A task removed during the completion pass, and the worker it freed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub worker: WorkerId,
    pub task: TaskId,
    pub elapsed: Duration,
}

/// Structured result of one tick.
///
/// Useful for tests that step the scheduler manually and make assertions
/// about what changed.
#[derive(Debug, Clone)]
pub struct TickStep {
    /// 1-based tick number.
    pub tick: u64,
    /// Clock reading the whole tick was evaluated at.
    pub at: Instant,
    /// Pairs made by the assignment pass, in pairing order.
    pub assigned: Vec<Assignment>,
    /// Tasks removed by the completion pass, in worker creation order.
    pub completed: Vec<Completion>,
}

impl TickStep {
    /// Whether the tick changed any worker or task.
    pub fn changed_anything(&self) -> bool {
        !self.assigned.is_empty() || !self.completed.is_empty()
    }
}
