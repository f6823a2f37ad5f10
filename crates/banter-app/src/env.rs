//! Environment abstraction for deterministic testing.
//!
//! Decouples the coordinator's timers from system time. Production code
//! uses [`TokioEnv`]; tests supply a manually-advanced clock so the typing
//! debounce and deferred scroll re-checks can be driven tick by tick.

use std::{
    future::Future,
    ops::{Add, Sub},
    time::Duration,
};

/// Abstract environment providing monotonic time.
///
/// # Invariants
///
/// - `now()` never goes backwards within a single execution context.
pub trait Environment: Clone + Send + Sync + 'static {
    /// The specific instant type used by this environment.
    ///
    /// Production environments use `std::time::Instant`; tests use a
    /// virtual clock built on the same type.
    type Instant: Copy
        + Ord
        + Send
        + Sync
        + Sub<Output = Duration>
        + Add<Duration, Output = Self::Instant>;

    /// Current time (monotonic).
    fn now(&self) -> Self::Instant;

    /// Sleeps for the specified duration.
    ///
    /// Only driver code should await this; coordinator logic is tick-driven
    /// and never sleeps.
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Production environment backed by the tokio clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioEnv;

impl Environment for TokioEnv {
    type Instant = std::time::Instant;

    fn now(&self) -> Self::Instant {
        std::time::Instant::now()
    }

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }
}
