// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::fmt::Debug;
use core::ops::{Add, Sub};
use core::time::Duration;

/// A read-only, monotonic time source.
///
/// Replay windows timestamp values with `now()` and evict a value once the time elapsed since
/// its timestamp reaches the window. Virtual clocks for tests implement the same trait.
pub trait Clock: Clone + Send + Sync + Debug + 'static {
    /// `later - earlier` must not panic for instants returned in order by `now()`.
    type Instant: Copy
        + Debug
        + Ord
        + Send
        + Sync
        + Add<Duration, Output = Self::Instant>
        + Sub<Output = Duration>;

    /// Returns the current instant.
    fn now(&self) -> Self::Instant;
}

/// Wall-clock time via [`std::time::Instant`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    type Instant = std::time::Instant;

    fn now(&self) -> Self::Instant {
        std::time::Instant::now()
    }
}
