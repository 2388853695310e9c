use std::collections::HashSet;
use std::time::Duration;

use proptest::prelude::*;
use workpool::types::{TaskStatus, WorkerStatus};
use workpool_test_utils::harness::{assert_invariants, SchedulerHarness};

/// One step of a random session against the scheduler.
#[derive(Debug, Clone)]
enum Op {
    AddWorker,
    RemoveWorker,
    Enqueue(i64),
    Tick,
    /// Advance the clock by this many milliseconds, then tick.
    AdvanceAndTick(u64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::AddWorker),
        2 => Just(Op::RemoveWorker),
        3 => (-2i64..6).prop_map(Op::Enqueue),
        2 => Just(Op::Tick),
        4 => (0u64..25_000).prop_map(Op::AdvanceAndTick),
    ]
}

proptest! {
    #[test]
    fn invariants_hold_after_any_session(ops in proptest::collection::vec(op_strategy(), 1..200)) {
        let mut h = SchedulerHarness::new();
        let mut max_seq_ever = 0u64;

        for op in ops {
            let workers_before = h.scheduler.workers().len();

            match op {
                Op::AddWorker => {
                    let result = h.scheduler.add_worker();
                    if workers_before == h.scheduler.workers().capacity() {
                        prop_assert!(result.is_err());
                        prop_assert_eq!(h.scheduler.workers().len(), workers_before);
                    } else {
                        prop_assert!(result.is_ok());
                        prop_assert_eq!(h.scheduler.workers().len(), workers_before + 1);
                    }
                }
                Op::RemoveWorker => {
                    let had_idle = h.scheduler.workers().list_idle().count() > 0;
                    let removed = h.scheduler.remove_idle_worker();
                    prop_assert_eq!(removed.is_some(), had_idle);
                    let expected = if had_idle { workers_before - 1 } else { workers_before };
                    prop_assert_eq!(h.scheduler.workers().len(), expected);
                }
                Op::Enqueue(n) => {
                    let tasks_before = h.scheduler.tasks().len();
                    let ids = h.scheduler.enqueue_tasks(n);
                    prop_assert_eq!(ids.len() as i64, n.max(0));
                    prop_assert_eq!(h.scheduler.tasks().len(), tasks_before + ids.len());
                    for id in ids {
                        let seq = h.scheduler.tasks().get(id).map(|t| t.seq).unwrap_or(0);
                        prop_assert!(seq > max_seq_ever, "sequence number reused or decreased");
                        max_seq_ever = seq;
                    }
                }
                Op::Tick => {
                    h.tick();
                }
                Op::AdvanceAndTick(ms) => {
                    h.advance_and_tick(Duration::from_millis(ms));
                }
            }

            assert_invariants(&h.scheduler);

            // Every worker view agrees with the underlying status.
            let snap = h.scheduler.snapshot();
            let mut seen = HashSet::new();
            for w in &snap.workers {
                prop_assert_eq!(w.status == WorkerStatus::Busy, w.task.is_some());
                if let Some(task) = w.task {
                    prop_assert!(seen.insert(task), "task claimed twice");
                    prop_assert_eq!(snap.task(task).map(|t| t.status), Some(TaskStatus::Running));
                }
            }
        }
    }

    #[test]
    fn no_worker_stays_idle_while_tasks_wait_after_a_tick(
        workers in 1usize..=10,
        tasks in 1i64..30,
    ) {
        let mut h = SchedulerHarness::new().with_workers(workers).with_tasks(tasks);
        h.tick();

        let idle = h.scheduler.workers().list_idle().count();
        let waiting = h.scheduler.tasks().list_waiting().count();
        prop_assert!(idle == 0 || waiting == 0);
        prop_assert_eq!(h.scheduler.tasks().list_running().count(), workers.min(tasks as usize));
    }
}
