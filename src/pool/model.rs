// src/pool/model.rs

//! Worker and task records.

use std::time::Duration;

use crate::clock::Instant;
use crate::types::{TaskId, TaskStatus, WorkerId, WorkerStatus};

/// Internal worker state. A busy worker always names the task it owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Idle,
    Busy { task: TaskId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Worker {
    pub id: WorkerId,
    pub name: String,
    pub state: WorkerState,
}

impl Worker {
    pub(crate) fn new(name: String) -> Self {
        Self {
            id: WorkerId::new(),
            name,
            state: WorkerState::Idle,
        }
    }

    pub fn status(&self) -> WorkerStatus {
        match self.state {
            WorkerState::Idle => WorkerStatus::Idle,
            WorkerState::Busy { .. } => WorkerStatus::Busy,
        }
    }

    pub fn assigned_task(&self) -> Option<TaskId> {
        match self.state {
            WorkerState::Idle => None,
            WorkerState::Busy { task } => Some(task),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, WorkerState::Idle)
    }
}

/// Internal task state. Only running tasks carry a start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Waiting,
    Running { started_at: Instant },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    /// Sequence number from the queue's counter; never reused.
    pub seq: u64,
    pub name: String,
    pub state: TaskState,
}

impl Task {
    pub(crate) fn new(seq: u64) -> Self {
        Self {
            id: TaskId::new(),
            seq,
            name: format!("Task {seq}"),
            state: TaskState::Waiting,
        }
    }

    pub fn status(&self) -> TaskStatus {
        match self.state {
            TaskState::Waiting => TaskStatus::Waiting,
            TaskState::Running { .. } => TaskStatus::Running,
        }
    }

    pub fn start_time(&self) -> Option<Instant> {
        match self.state {
            TaskState::Waiting => None,
            TaskState::Running { started_at } => Some(started_at),
        }
    }

    pub fn is_waiting(&self) -> bool {
        matches!(self.state, TaskState::Waiting)
    }

    /// Time spent running as of `now`; `None` while still waiting.
    pub fn elapsed_at(&self, now: Instant) -> Option<Duration> {
        self.start_time()
            .map(|started_at| now.saturating_duration_since(started_at))
    }
}
