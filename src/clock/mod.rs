// src/clock/mod.rs

//! Monotonic time source used to stamp task start times.
//!
//! Production code uses [`SystemClock`], which reads `tokio::time::Instant`
//! and therefore follows Tokio's paused clock in tests. Purely synchronous
//! tests use [`mock::ManualClock`], which only moves when told to.

use std::fmt::Debug;

pub use tokio::time::Instant;

pub mod mock;

/// Abstract monotonic clock.
pub trait Clock: Send + Sync + Debug {
    fn now(&self) -> Instant;
}

/// Implementation backed by the Tokio clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
