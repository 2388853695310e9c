// tests/scheduler_tick.rs

mod common;
use crate::common::builders::ConfigFileBuilder;
use crate::common::{init_tracing, SchedulerHarness};

use std::time::Duration;

use workpool::types::{TaskStatus, WorkerStatus};

const THRESHOLD: Duration = Duration::from_secs(20);
const TICK: Duration = Duration::from_millis(100);

#[test]
fn two_idle_workers_pick_up_first_two_tasks() {
    init_tracing();

    let mut h = SchedulerHarness::new().with_workers(2).with_tasks(3);
    let task_ids: Vec<_> = h.scheduler.tasks().iter().map(|t| t.id).collect();
    let worker_ids = h.worker_ids();

    let step = h.tick();

    assert_eq!(step.tick, 1);
    assert_eq!(step.assigned.len(), 2);
    assert_eq!((step.assigned[0].worker, step.assigned[0].task), (worker_ids[0], task_ids[0]));
    assert_eq!((step.assigned[1].worker, step.assigned[1].task), (worker_ids[1], task_ids[1]));
    assert!(step.completed.is_empty());

    let workers = h.scheduler.workers();
    assert!(workers.iter().all(|w| w.status() == WorkerStatus::Busy));

    let statuses: Vec<_> = h.scheduler.tasks().iter().map(|t| t.status()).collect();
    assert_eq!(
        statuses,
        vec![TaskStatus::Running, TaskStatus::Running, TaskStatus::Waiting]
    );
    h.assert_invariants();
}

#[test]
fn running_tasks_get_the_tick_timestamp() {
    let mut h = SchedulerHarness::new().with_workers(1).with_tasks(1);
    let step = h.tick();
    let task = h.scheduler.tasks().get(step.assigned[0].task).unwrap();
    assert_eq!(task.start_time(), Some(step.at));
}

#[test]
fn more_workers_than_tasks_leaves_extra_workers_idle() {
    let mut h = SchedulerHarness::new().with_workers(3).with_tasks(1);
    let step = h.tick();

    assert_eq!(step.assigned.len(), 1);
    assert_eq!(h.scheduler.workers().list_idle().count(), 2);
    h.assert_invariants();
}

#[test]
fn tick_with_nothing_to_do_changes_nothing() {
    let mut h = SchedulerHarness::new().with_workers(2);
    let step = h.tick();
    assert!(!step.changed_anything());

    let mut h = SchedulerHarness::new().with_tasks(2);
    let step = h.tick();
    assert!(!step.changed_anything());
    assert_eq!(h.scheduler.tasks().list_waiting().count(), 2);
}

#[test]
fn task_below_threshold_keeps_its_worker() {
    let mut h = SchedulerHarness::new().with_workers(1).with_tasks(1);
    let assigned = h.tick().assigned[0];

    let step = h.advance_and_tick(THRESHOLD - Duration::from_millis(1));

    assert!(step.completed.is_empty());
    let worker = h.scheduler.workers().get(assigned.worker).unwrap();
    assert_eq!(worker.status(), WorkerStatus::Busy);
    assert_eq!(worker.assigned_task(), Some(assigned.task));
    assert!(h.scheduler.tasks().get(assigned.task).is_some());
}

#[test]
fn task_at_threshold_completes_and_frees_worker() {
    let mut h = SchedulerHarness::new().with_workers(1).with_tasks(1);
    let assigned = h.tick().assigned[0];

    let step = h.advance_and_tick(THRESHOLD);

    assert_eq!(step.completed.len(), 1);
    assert_eq!(step.completed[0].task, assigned.task);
    assert_eq!(step.completed[0].worker, assigned.worker);
    assert_eq!(step.completed[0].elapsed, THRESHOLD);

    let worker = h.scheduler.workers().get(assigned.worker).unwrap();
    assert_eq!(worker.status(), WorkerStatus::Idle);
    assert!(h.scheduler.tasks().get(assigned.task).is_none());
    assert!(h.scheduler.is_drained());
    h.assert_invariants();
}

#[test]
fn completion_only_affects_tasks_past_threshold() {
    let mut h = SchedulerHarness::new().with_workers(2).with_tasks(1);
    let early = h.tick().assigned[0];

    h.clock.advance(Duration::from_secs(5));
    h.scheduler.enqueue_tasks(1);
    let late = h.tick().assigned[0];
    assert_ne!(early.worker, late.worker);

    let step = h.advance_and_tick(Duration::from_secs(15));
    assert_eq!(step.completed.len(), 1);
    assert_eq!(step.completed[0].task, early.task);

    let late_worker = h.scheduler.workers().get(late.worker).unwrap();
    assert_eq!(late_worker.assigned_task(), Some(late.task));
    h.assert_invariants();
}

#[test]
fn freed_worker_is_not_repaired_in_the_same_tick() {
    let mut h = SchedulerHarness::new().with_workers(1).with_tasks(2);
    let first = h.tick().assigned[0];

    let step = h.advance_and_tick(THRESHOLD);
    assert_eq!(step.completed.len(), 1);
    assert!(step.assigned.is_empty());
    assert_eq!(h.scheduler.workers().list_idle().count(), 1);
    assert_eq!(h.scheduler.tasks().list_waiting().count(), 1);

    let step = h.advance_and_tick(TICK);
    assert_eq!(step.assigned.len(), 1);
    assert_eq!(step.assigned[0].worker, first.worker);
    h.assert_invariants();
}

#[test]
fn queue_drains_in_arrival_order() {
    let mut h = SchedulerHarness::new().with_workers(2).with_tasks(5);
    let arrival: Vec<_> = h.scheduler.tasks().iter().map(|t| t.id).collect();
    let mut completed = Vec::new();

    for _ in 0..2_000 {
        let step = h.advance_and_tick(TICK);
        completed.extend(step.completed.iter().map(|done| done.task));
        h.assert_invariants();
        if h.scheduler.is_drained() {
            break;
        }
    }

    assert!(h.scheduler.is_drained());
    assert_eq!(completed, arrival);
}

#[test]
fn zero_threshold_completes_on_assignment_tick() {
    let cfg = ConfigFileBuilder::new().completion_threshold("0s").build();
    let mut h = SchedulerHarness::from_config(&cfg).with_workers(1).with_tasks(1);

    let step = h.tick();
    assert_eq!(step.assigned.len(), 1);
    assert_eq!(step.completed.len(), 1);
    assert!(h.scheduler.is_drained());
    assert_eq!(h.scheduler.workers().list_idle().count(), 1);
}

#[test]
fn custom_cap_is_enforced_by_scheduler() {
    let cfg = ConfigFileBuilder::new().max_workers(2).build();
    let mut h = SchedulerHarness::from_config(&cfg).with_workers(2);

    let err = h.scheduler.add_worker().unwrap_err();
    assert_eq!(err.max_workers, 2);
    assert_eq!(h.scheduler.workers().len(), 2);
}

#[test]
fn removing_idle_worker_never_touches_running_tasks() {
    let mut h = SchedulerHarness::new().with_workers(3).with_tasks(2);
    h.tick();

    let removed = h.scheduler.remove_idle_worker().expect("one worker idle");
    assert!(h.scheduler.workers().get(removed).is_none());
    assert_eq!(h.scheduler.tasks().list_running().count(), 2);
    assert_eq!(h.scheduler.remove_idle_worker(), None);
    h.assert_invariants();
}

#[test]
fn jumping_the_clock_to_the_threshold_completes_the_task() {
    let mut h = SchedulerHarness::new().with_workers(1).with_tasks(1);
    let started = h.tick().at;

    h.clock.set(started + THRESHOLD - Duration::from_millis(1));
    assert!(h.tick().completed.is_empty());

    h.clock.set(started + THRESHOLD);
    let step = h.tick();
    assert_eq!(step.completed.len(), 1);
    assert_eq!(step.completed[0].elapsed, THRESHOLD);
    assert!(h.scheduler.tasks().is_empty());
    h.assert_invariants();
}
