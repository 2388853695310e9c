#![allow(dead_code)]
#![allow(unused_imports)]

pub use workpool_test_utils::builders;
pub use workpool_test_utils::harness::{assert_invariants, SchedulerHarness};
pub use workpool_test_utils::{init_tracing, with_timeout};
