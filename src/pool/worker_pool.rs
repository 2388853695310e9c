// src/pool/worker_pool.rs

//! Bounded collection of workers, kept in creation order.

use tracing::debug;

use crate::errors::CapacityError;
use crate::pool::model::{Worker, WorkerState};
use crate::types::{TaskId, WorkerId};

#[derive(Debug)]
pub struct WorkerPool {
    max_workers: usize,
    /// Creation order. Pairing and LIFO removal both rely on it.
    workers: Vec<Worker>,
}

impl WorkerPool {
    pub fn new(max_workers: usize) -> Self {
        Self {
            max_workers,
            workers: Vec::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.max_workers
    }

    pub fn len(&self) -> usize {
        self.workers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Worker> {
        self.workers.iter()
    }

    pub fn get(&self, id: WorkerId) -> Option<&Worker> {
        self.workers.iter().find(|w| w.id == id)
    }

    /// Add a new idle worker, or fail if the pool is at capacity.
    ///
    /// The name is derived from the pool size at creation time, so it may
    /// repeat after removals.
    pub fn add_worker(&mut self) -> Result<WorkerId, CapacityError> {
        if self.workers.len() >= self.max_workers {
            return Err(CapacityError {
                max_workers: self.max_workers,
            });
        }

        let worker = Worker::new(format!("Worker {}", self.workers.len() + 1));
        let id = worker.id;
        debug!(worker = %worker.name, %id, "worker added");
        self.workers.push(worker);
        Ok(id)
    }

    /// Remove the most recently added idle worker.
    ///
    /// Returns `None` when every worker is busy or the pool is empty.
    pub fn remove_idle_worker(&mut self) -> Option<WorkerId> {
        let idx = self.workers.iter().rposition(Worker::is_idle)?;
        let worker = self.workers.remove(idx);
        debug!(worker = %worker.name, id = %worker.id, "idle worker removed");
        Some(worker.id)
    }

    pub fn list_idle(&self) -> impl Iterator<Item = &Worker> {
        self.workers.iter().filter(|w| w.is_idle())
    }

    pub fn list_busy(&self) -> impl Iterator<Item = &Worker> {
        self.workers.iter().filter(|w| !w.is_idle())
    }

    /// Hand `task` to an idle worker.
    ///
    /// Returns `false` (and changes nothing) if the worker is unknown or
    /// already busy.
    pub fn assign(&mut self, worker: WorkerId, task: TaskId) -> bool {
        match self.workers.iter_mut().find(|w| w.id == worker) {
            Some(w) if w.is_idle() => {
                w.state = WorkerState::Busy { task };
                true
            }
            Some(w) => {
                debug!(worker = %w.name, %task, "assign ignored; worker already busy");
                false
            }
            None => {
                debug!(%worker, %task, "assign ignored; unknown worker");
                false
            }
        }
    }

    /// Return a worker to idle. Returns `false` if the worker is unknown.
    pub fn release(&mut self, worker: WorkerId) -> bool {
        match self.workers.iter_mut().find(|w| w.id == worker) {
            Some(w) => {
                w.state = WorkerState::Idle;
                true
            }
            None => false,
        }
    }
}
