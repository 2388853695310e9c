// src/scheduler/snapshot.rs

//! Read model handed to display collaborators.

use std::time::Duration;

use crate::types::{TaskId, TaskStatus, WorkerId, WorkerStatus};

/// Text shown for a worker without a task.
pub const IDLE_DISPLAY_TEXT: &str = "waiting...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerView {
    pub id: WorkerId,
    pub name: String,
    pub status: WorkerStatus,
    pub task: Option<TaskId>,
    /// Running time of the assigned task as of the last tick.
    pub elapsed: Option<Duration>,
    pub display_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskView {
    pub id: TaskId,
    pub name: String,
    pub status: TaskStatus,
}

/// Point-in-time copy of the pool, workers in creation order and tasks in
/// arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Number of ticks completed when the snapshot was taken.
    pub tick: u64,
    pub workers: Vec<WorkerView>,
    pub tasks: Vec<TaskView>,
}

impl Snapshot {
    pub fn busy_workers(&self) -> usize {
        self.workers
            .iter()
            .filter(|w| w.status == WorkerStatus::Busy)
            .count()
    }

    pub fn idle_workers(&self) -> usize {
        self.workers.len() - self.busy_workers()
    }

    pub fn running_tasks(&self) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Running)
            .count()
    }

    pub fn waiting_tasks(&self) -> usize {
        self.tasks.len() - self.running_tasks()
    }

    pub fn task(&self, id: TaskId) -> Option<&TaskView> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn worker(&self, id: WorkerId) -> Option<&WorkerView> {
        self.workers.iter().find(|w| w.id == id)
    }
}

/// Format a running time as `00:SS`, seconds truncated and zero-padded.
pub fn format_elapsed(elapsed: Duration) -> String {
    format!("00:{:02}", elapsed.as_secs())
}
