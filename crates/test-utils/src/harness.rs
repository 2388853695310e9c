use std::sync::Arc;
use std::time::Duration;

use workpool::clock::mock::ManualClock;
use workpool::config::ConfigFile;
use workpool::scheduler::{Scheduler, TickStep};
use workpool::types::WorkerId;

/// A scheduler wired to a [`ManualClock`] so tests decide when time moves.
pub struct SchedulerHarness {
    pub scheduler: Scheduler,
    pub clock: ManualClock,
}

impl SchedulerHarness {
    /// Default settings: cap 10, threshold 20s.
    pub fn new() -> Self {
        Self::from_config(&ConfigFile::default())
    }

    pub fn from_config(cfg: &ConfigFile) -> Self {
        let clock = ManualClock::new();
        let scheduler = Scheduler::new(cfg.scheduler, Arc::new(clock.clone()));
        Self { scheduler, clock }
    }

    /// Add `n` workers, panicking if the pool refuses.
    pub fn with_workers(mut self, n: usize) -> Self {
        for _ in 0..n {
            self.scheduler.add_worker().expect("worker within capacity");
        }
        self
    }

    pub fn with_tasks(mut self, n: i64) -> Self {
        self.scheduler.enqueue_tasks(n);
        self
    }

    pub fn worker_ids(&self) -> Vec<WorkerId> {
        self.scheduler.workers().iter().map(|w| w.id).collect()
    }

    pub fn tick(&mut self) -> TickStep {
        self.scheduler.tick()
    }

    /// Advance the clock by `by`, then tick.
    pub fn advance_and_tick(&mut self, by: Duration) -> TickStep {
        self.clock.advance(by);
        self.scheduler.tick()
    }

    /// Assert the worker/task invariants hold right now.
    pub fn assert_invariants(&self) {
        assert_invariants(&self.scheduler);
    }
}

impl Default for SchedulerHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Check every cross-collection invariant of the pool:
///
/// - worker count within capacity
/// - a busy worker's task exists and is running
/// - no task is owned by two workers
/// - every running task is owned by exactly one worker
/// - task sequence numbers strictly increase in arrival order
pub fn assert_invariants(scheduler: &Scheduler) {
    use std::collections::HashSet;
    use workpool::types::TaskStatus;

    let workers = scheduler.workers();
    let tasks = scheduler.tasks();

    assert!(workers.len() <= workers.capacity(), "pool exceeds capacity");

    let mut owned = HashSet::new();
    for worker in workers.iter() {
        if let Some(task_id) = worker.assigned_task() {
            let task = tasks
                .get(task_id)
                .unwrap_or_else(|| panic!("{} owns a task that is not queued", worker.name));
            assert_eq!(task.status(), TaskStatus::Running, "{} owns a non-running task", worker.name);
            assert!(owned.insert(task_id), "task {} owned by two workers", task.name);
        }
    }

    for task in tasks.iter() {
        let is_owned = owned.contains(&task.id);
        assert_eq!(
            task.status() == TaskStatus::Running,
            is_owned,
            "{} running state disagrees with ownership",
            task.name
        );
    }

    let seqs: Vec<u64> = tasks.iter().map(|t| t.seq).collect();
    assert!(seqs.windows(2).all(|w| w[0] < w[1]), "task sequence not increasing: {seqs:?}");
}
