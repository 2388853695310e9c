// tests/task_queue.rs

use std::time::Duration;

use workpool::clock::Instant;
use workpool::pool::{MAX_ENQUEUE_BATCH, TaskQueue};
use workpool::types::{TaskId, TaskStatus};

#[test]
fn enqueue_batches_get_strictly_increasing_names() {
    let mut queue = TaskQueue::new();
    assert_eq!(queue.enqueue(3).len(), 3);
    assert_eq!(queue.enqueue(2).len(), 2);

    assert_eq!(queue.len(), 5);
    let names: Vec<_> = queue.iter().map(|t| t.name.clone()).collect();
    assert_eq!(names, vec!["Task 1", "Task 2", "Task 3", "Task 4", "Task 5"]);
    assert!(queue.iter().all(|t| t.status() == TaskStatus::Waiting));
    assert!(queue.iter().all(|t| t.start_time().is_none()));
}

#[test]
fn enqueue_non_positive_count_is_noop() {
    let mut queue = TaskQueue::new();
    assert!(queue.enqueue(0).is_empty());
    assert!(queue.enqueue(-1).is_empty());
    assert!(queue.is_empty());
    assert_eq!(queue.next_seq(), 1);
}

#[test]
fn oversized_batches_are_ignored() {
    let mut queue = TaskQueue::new();
    assert!(queue.enqueue(i64::MAX).is_empty());
    assert!(queue.enqueue(MAX_ENQUEUE_BATCH + 1).is_empty());
    assert!(queue.is_empty());
    assert_eq!(queue.next_seq(), 1);

    assert_eq!(queue.enqueue(MAX_ENQUEUE_BATCH).len(), MAX_ENQUEUE_BATCH as usize);
    assert_eq!(queue.next_seq(), MAX_ENQUEUE_BATCH as u64 + 1);
}

#[test]
fn sequence_numbers_are_never_reused_after_removal() {
    let mut queue = TaskQueue::new();
    let ids = queue.enqueue(3);
    queue.remove(ids[2]);
    queue.remove(ids[0]);

    queue.enqueue(1);
    let names: Vec<_> = queue.iter().map(|t| t.name.clone()).collect();
    assert_eq!(names, vec!["Task 2", "Task 4"]);
}

#[test]
fn list_waiting_is_fifo_and_skips_running() {
    let mut queue = TaskQueue::new();
    let ids = queue.enqueue(4);
    assert!(queue.mark_running(ids[1], Instant::now()));

    let waiting: Vec<_> = queue.list_waiting().map(|t| t.id).collect();
    assert_eq!(waiting, vec![ids[0], ids[2], ids[3]]);
    let running: Vec<_> = queue.list_running().map(|t| t.id).collect();
    assert_eq!(running, vec![ids[1]]);
}

#[test]
fn mark_running_stamps_start_time() {
    let mut queue = TaskQueue::new();
    let id = queue.enqueue(1)[0];
    let now = Instant::now();

    assert!(queue.mark_running(id, now));
    let task = queue.get(id).unwrap();
    assert_eq!(task.status(), TaskStatus::Running);
    assert_eq!(task.start_time(), Some(now));
}

#[test]
fn mark_running_on_missing_task_is_noop() {
    let mut queue = TaskQueue::new();
    queue.enqueue(1);
    assert!(!queue.mark_running(TaskId::new(), Instant::now()));
    assert_eq!(queue.list_waiting().count(), 1);
}

#[test]
fn mark_running_twice_keeps_first_start_time() {
    let mut queue = TaskQueue::new();
    let id = queue.enqueue(1)[0];
    let first = Instant::now();

    queue.mark_running(id, first);
    assert!(!queue.mark_running(id, first + Duration::from_secs(5)));
    assert_eq!(queue.get(id).unwrap().start_time(), Some(first));
}

#[test]
fn remove_deletes_regardless_of_status() {
    let mut queue = TaskQueue::new();
    let ids = queue.enqueue(2);
    queue.mark_running(ids[0], Instant::now());

    assert!(queue.remove(ids[0]).is_some());
    assert!(queue.remove(ids[1]).is_some());
    assert!(queue.remove(ids[1]).is_none());
    assert!(queue.is_empty());
}

#[test]
fn elapsed_is_measured_from_start_time() {
    let mut queue = TaskQueue::new();
    let ids = queue.enqueue(2);
    let start = Instant::now();
    queue.mark_running(ids[0], start);

    let running = queue.get(ids[0]).unwrap();
    assert_eq!(
        TaskQueue::elapsed_since(running, start + Duration::from_millis(7_500)),
        Some(Duration::from_millis(7_500))
    );

    let waiting = queue.get(ids[1]).unwrap();
    assert_eq!(TaskQueue::elapsed_since(waiting, start), None);
}
