// src/pool/task_queue.rs

//! Arrival-ordered collection of tasks.

use std::time::Duration;

use tracing::debug;

use crate::clock::Instant;
use crate::pool::model::{Task, TaskState};
use crate::types::TaskId;

/// Largest number of tasks a single enqueue request may add.
pub const MAX_ENQUEUE_BATCH: i64 = 10_000;

#[derive(Debug)]
pub struct TaskQueue {
    /// Arrival order. Waiting tasks are picked up front to back.
    tasks: Vec<Task>,
    /// Sequence number of the next task to be created.
    next_seq: u64,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_seq: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn next_seq(&self) -> u64 {
        self.next_seq
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Append `count` waiting tasks.
    ///
    /// Counts below 1 or above [`MAX_ENQUEUE_BATCH`] add nothing.
    pub fn enqueue(&mut self, count: i64) -> Vec<TaskId> {
        if count < 1 {
            debug!(count, "enqueue ignored; count must be >= 1");
            return Vec::new();
        }
        if count > MAX_ENQUEUE_BATCH {
            debug!(count, max = MAX_ENQUEUE_BATCH, "enqueue ignored; batch too large");
            return Vec::new();
        }
        let Ok(batch) = usize::try_from(count) else {
            return Vec::new();
        };

        let mut ids = Vec::with_capacity(batch);
        for _ in 0..batch {
            let task = Task::new(self.next_seq);
            self.next_seq += 1;
            ids.push(task.id);
            self.tasks.push(task);
        }

        debug!(count, next_seq = self.next_seq, "tasks enqueued");
        ids
    }

    pub fn list_waiting(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| t.is_waiting())
    }

    pub fn list_running(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| !t.is_waiting())
    }

    /// Move a waiting task to running, stamping its start time.
    ///
    /// Returns `false` if the task is gone or not waiting.
    pub fn mark_running(&mut self, id: TaskId, now: Instant) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) if task.is_waiting() => {
                task.state = TaskState::Running { started_at: now };
                true
            }
            Some(task) => {
                debug!(task = %task.name, "mark_running ignored; task already running");
                false
            }
            None => {
                debug!(%id, "mark_running ignored; task no longer queued");
                false
            }
        }
    }

    /// Delete a task regardless of its status.
    pub fn remove(&mut self, id: TaskId) -> Option<Task> {
        let idx = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(idx))
    }

    /// Running time of `task` as of `now`; `None` for a waiting task.
    pub fn elapsed_since(task: &Task, now: Instant) -> Option<Duration> {
        task.elapsed_at(now)
    }
}

impl Default for TaskQueue {
    fn default() -> Self {
        Self::new()
    }
}
