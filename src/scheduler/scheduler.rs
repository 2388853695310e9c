use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::clock::{Clock, Instant};
use crate::config::SchedulerSettings;
use crate::errors::CapacityError;
use crate::pool::{Task, TaskQueue, Worker, WorkerPool};
use crate::scheduler::snapshot::{format_elapsed, Snapshot, TaskView, WorkerView, IDLE_DISPLAY_TEXT};
use crate::scheduler::tick_step::{Assignment, Completion, TickStep};
use crate::types::{TaskId, WorkerId};

/// Scheduler owns the worker pool and task queue and advances them tick by
/// tick.
///
/// It is responsible for:
/// - applying add/remove worker and enqueue commands
/// - pairing idle workers with waiting tasks in arrival order
/// - completing tasks whose running time reached the threshold
/// - producing snapshots for display
///
/// It performs no IO and never blocks; the engine serialises access to it.
#[derive(Debug)]
pub struct Scheduler {
    workers: WorkerPool,
    tasks: TaskQueue,
    clock: Arc<dyn Clock>,
    completion_threshold: Duration,
    /// Number of completed ticks.
    tick_counter: u64,
    /// Clock reading of the most recent tick; display elapsed is measured
    /// against it.
    last_tick_at: Option<Instant>,
}

impl Scheduler {
    pub fn new(settings: SchedulerSettings, clock: Arc<dyn Clock>) -> Self {
        Self {
            workers: WorkerPool::new(settings.max_workers),
            tasks: TaskQueue::new(),
            clock,
            completion_threshold: settings.completion_threshold,
            tick_counter: 0,
            last_tick_at: None,
        }
    }

    pub fn workers(&self) -> &WorkerPool {
        &self.workers
    }

    pub fn tasks(&self) -> &TaskQueue {
        &self.tasks
    }

    pub fn completion_threshold(&self) -> Duration {
        self.completion_threshold
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_counter
    }

    /// `true` once there are no tasks left, waiting or running.
    pub fn is_drained(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn add_worker(&mut self) -> Result<WorkerId, CapacityError> {
        match self.workers.add_worker() {
            Ok(id) => {
                info!(%id, workers = self.workers.len(), "worker added to pool");
                Ok(id)
            }
            Err(e) => {
                warn!(max_workers = e.max_workers, "add worker rejected; pool is full");
                Err(e)
            }
        }
    }

    pub fn remove_idle_worker(&mut self) -> Option<WorkerId> {
        let removed = self.workers.remove_idle_worker();
        match removed {
            Some(id) => info!(%id, workers = self.workers.len(), "idle worker removed from pool"),
            None => debug!("remove worker ignored; no idle worker"),
        }
        removed
    }

    pub fn enqueue_tasks(&mut self, count: i64) -> Vec<TaskId> {
        let ids = self.tasks.enqueue(count);
        if !ids.is_empty() {
            info!(added = ids.len(), queued = self.tasks.len(), "tasks enqueued");
        }
        ids
    }

    /// Run one tick: assignment pass, then completion pass, both evaluated
    /// at a single clock reading.
    ///
    /// Workers freed by the completion pass stay idle until the next tick.
    pub fn tick(&mut self) -> TickStep {
        let now = self.clock.now();
        self.tick_counter += 1;

        let assigned = self.assignment_pass(now);
        let completed = self.completion_pass(now);
        self.last_tick_at = Some(now);

        let step = TickStep {
            tick: self.tick_counter,
            at: now,
            assigned,
            completed,
        };

        if step.changed_anything() {
            debug!(
                tick = step.tick,
                assigned = step.assigned.len(),
                completed = step.completed.len(),
                "tick changed pool state"
            );
        }

        step
    }

    /// Pair the i-th idle worker with the i-th waiting task.
    fn assignment_pass(&mut self, now: Instant) -> Vec<Assignment> {
        let pairs: Vec<Assignment> = self
            .workers
            .list_idle()
            .zip(self.tasks.list_waiting())
            .map(|(worker, task)| Assignment {
                worker: worker.id,
                task: task.id,
            })
            .collect();

        for pair in &pairs {
            self.workers.assign(pair.worker, pair.task);
            self.tasks.mark_running(pair.task, now);
            debug!(worker = %pair.worker, task = %pair.task, "task assigned");
        }

        pairs
    }

    /// Remove every running task that reached the threshold and free its
    /// worker.
    fn completion_pass(&mut self, now: Instant) -> Vec<Completion> {
        let mut finished = Vec::new();
        let mut orphaned = Vec::new();

        for worker in self.workers.list_busy() {
            let Some(task_id) = worker.assigned_task() else {
                continue;
            };

            match self.tasks.get(task_id).and_then(|t| TaskQueue::elapsed_since(t, now)) {
                Some(elapsed) if elapsed >= self.completion_threshold => {
                    finished.push(Completion {
                        worker: worker.id,
                        task: task_id,
                        elapsed,
                    });
                }
                Some(_) => {}
                None => orphaned.push(worker.id),
            }
        }

        for worker in orphaned {
            warn!(%worker, "busy worker has no running task; releasing");
            self.workers.release(worker);
        }

        for done in &finished {
            if let Some(task) = self.tasks.remove(done.task) {
                info!(
                    task = %task.name,
                    worker = %done.worker,
                    elapsed_ms = done.elapsed.as_millis() as u64,
                    "task completed"
                );
            }
            self.workers.release(done.worker);
        }

        finished
    }

    /// Read-only view of the pool as of the last tick plus any commands
    /// applied since.
    pub fn snapshot(&self) -> Snapshot {
        let workers = self
            .workers
            .iter()
            .map(|w| self.worker_view(w))
            .collect();

        let tasks = self.tasks.iter().map(task_view).collect();

        Snapshot {
            tick: self.tick_counter,
            workers,
            tasks,
        }
    }

    fn worker_view(&self, worker: &Worker) -> WorkerView {
        let elapsed = worker
            .assigned_task()
            .and_then(|id| self.tasks.get(id))
            .zip(self.last_tick_at)
            .and_then(|(task, at)| task.elapsed_at(at));

        let display_text = match elapsed {
            Some(elapsed) => format_elapsed(elapsed),
            None => IDLE_DISPLAY_TEXT.to_string(),
        };

        WorkerView {
            id: worker.id,
            name: worker.name.clone(),
            status: worker.status(),
            task: worker.assigned_task(),
            elapsed,
            display_text,
        }
    }
}

fn task_view(task: &Task) -> TaskView {
    TaskView {
        id: task.id,
        name: task.name.clone(),
        status: task.status(),
    }
}
