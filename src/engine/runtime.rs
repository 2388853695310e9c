// src/engine/runtime.rs

use std::fmt;

use tokio::sync::{mpsc, oneshot};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::errors::Result;

use super::core::CoreRuntime;
use super::{CoreReply, RuntimeEvent};

/// A single message to the runtime. `reply` is `None` for fire-and-forget
/// events such as shutdown.
pub struct Request {
    pub event: RuntimeEvent,
    pub reply: Option<oneshot::Sender<CoreReply>>,
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("event", &self.event)
            .field("wants_reply", &self.reply.is_some())
            .finish()
    }
}

/// Owns the core and feeds it requests and ticks, one at a time.
///
/// This is a pure IO shell around `CoreRuntime`, which contains all the
/// pool semantics.
pub struct Runtime {
    core: CoreRuntime,
    request_rx: mpsc::Receiver<Request>,
}

impl fmt::Debug for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("core", &self.core)
            .finish_non_exhaustive()
    }
}

impl Runtime {
    pub fn new(core: CoreRuntime, request_rx: mpsc::Receiver<Request>) -> Self {
        Self { core, request_rx }
    }

    /// Main event loop.
    ///
    /// - Fires a `Tick` every `tick_interval`.
    /// - Consumes requests from `request_rx` between ticks.
    /// - Exits on shutdown, when the core asks to, or when every handle has
    ///   been dropped.
    pub async fn run(mut self) -> Result<()> {
        let options = self.core.options();
        info!(
            tick_interval_ms = options.tick_interval.as_millis() as u64,
            "workpool runtime started"
        );

        let mut interval = tokio::time::interval(options.tick_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            let (event, reply) = tokio::select! {
                biased;
                request = self.request_rx.recv() => match request {
                    Some(Request { event, reply }) => (event, reply),
                    None => {
                        info!("request channel closed; exiting");
                        break;
                    }
                },
                _ = interval.tick() => (RuntimeEvent::Tick, None),
            };

            if !matches!(event, RuntimeEvent::Tick) {
                debug!(?event, "runtime received event");
            }

            let step = self.core.step(event);

            if let Some(reply_tx) = reply {
                if reply_tx.send(step.reply).is_err() {
                    debug!("caller went away before receiving the reply");
                }
            }

            if !step.keep_running {
                info!("core requested exit; stopping runtime");
                break;
            }
        }

        info!("runtime exiting");
        Ok(())
    }
}
