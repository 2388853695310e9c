// src/engine/core.rs

//! Pure core runtime state machine.
//!
//! This module contains a synchronous, deterministic "core runtime" that
//! consumes [`RuntimeEvent`]s and produces a [`CoreStep`]: the reply for the
//! caller plus whether the loop should continue.
//!
//! The async shell (`engine::runtime::Runtime`) is responsible for:
//! - reading requests from the channel
//! - driving the tick interval
//! - routing replies back to callers
//!
//! The core can be unit tested without Tokio, channels or real time.

use tracing::info;

use crate::engine::{CoreReply, CoreStep, RuntimeEvent, RuntimeOptions};
use crate::scheduler::Scheduler;

/// Pure core runtime state.
///
/// It has **no** channels, no Tokio types, and does not perform any IO.
#[derive(Debug)]
pub struct CoreRuntime {
    scheduler: Scheduler,
    options: RuntimeOptions,
}

impl CoreRuntime {
    pub fn new(scheduler: Scheduler, options: RuntimeOptions) -> Self {
        Self { scheduler, options }
    }

    pub fn options(&self) -> RuntimeOptions {
        self.options
    }

    /// Expose the scheduler (for tests).
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Handle a single runtime event, updating core state and returning the
    /// reply for the caller.
    pub fn step(&mut self, event: RuntimeEvent) -> CoreStep {
        let reply = match event {
            RuntimeEvent::AddWorker => CoreReply::WorkerAdded(self.scheduler.add_worker()),
            RuntimeEvent::RemoveWorker => {
                CoreReply::WorkerRemoved(self.scheduler.remove_idle_worker())
            }
            RuntimeEvent::EnqueueTasks { count } => {
                CoreReply::TasksEnqueued(self.scheduler.enqueue_tasks(count))
            }
            RuntimeEvent::Snapshot => CoreReply::Snapshot(self.scheduler.snapshot()),
            RuntimeEvent::Tick => return self.handle_tick(),
            RuntimeEvent::ShutdownRequested => {
                return CoreStep {
                    reply: CoreReply::ShuttingDown,
                    keep_running: false,
                };
            }
        };

        CoreStep {
            reply,
            keep_running: true,
        }
    }

    fn handle_tick(&mut self) -> CoreStep {
        let step = self.scheduler.tick();

        // In `--once` mode we stop as soon as a tick finds nothing left to do.
        let keep_running = !(self.options.exit_when_idle && self.scheduler.is_drained());
        if !keep_running {
            info!(tick = step.tick, "all tasks completed; requesting exit");
        }

        CoreStep {
            reply: CoreReply::Ticked(step),
            keep_running,
        }
    }
}
