// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::ShareReplay;
use core::time::Duration;
use sharecast_core::{Clock, Producer, SystemClock};

/// Immutable configuration of a [`ShareReplay`] operator.
///
/// | Setting | Default | Meaning |
/// |---------|---------|---------|
/// | `buffer_size` | unbounded | how many past values a late subscriber receives |
/// | `window_time` | unbounded | how old a replayed value may be |
/// | `ref_count` | `false` | tear the upstream down when the last subscriber leaves before termination |
/// | `clock` | [`SystemClock`] | time source, read only when `window_time` is finite |
///
/// # Example
///
/// ```
/// use sharecast_replay::ShareReplayConfig;
/// use std::time::Duration;
///
/// let config = ShareReplayConfig::default()
///     .with_buffer_size(2)
///     .with_window_time(Duration::from_secs(5))
///     .with_ref_count(true);
///
/// assert_eq!(config.buffer_size(), Some(2));
/// assert!(config.ref_count());
/// ```
#[derive(Debug, Clone)]
pub struct ShareReplayConfig<C: Clock = SystemClock> {
    buffer_size: Option<usize>,
    window_time: Option<Duration>,
    ref_count: bool,
    clock: C,
}

impl Default for ShareReplayConfig<SystemClock> {
    fn default() -> Self {
        Self {
            buffer_size: None,
            window_time: None,
            ref_count: false,
            clock: SystemClock,
        }
    }
}

impl ShareReplayConfig<SystemClock> {
    /// Unbounded replay, no window, no ref counting.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a buffer of `buffer_size` values and defaults otherwise.
    #[must_use]
    pub fn buffered(buffer_size: usize) -> Self {
        Self::default().with_buffer_size(buffer_size)
    }
}

impl<C: Clock> ShareReplayConfig<C> {
    /// Keeps at most `buffer_size` values; zero is treated as one.
    #[must_use]
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = Some(buffer_size.max(1));
        self
    }

    /// Replays only values recorded within `window_time`.
    #[must_use]
    pub fn with_window_time(mut self, window_time: Duration) -> Self {
        self.window_time = Some(window_time);
        self
    }

    #[must_use]
    pub fn with_ref_count(mut self, ref_count: bool) -> Self {
        self.ref_count = ref_count;
        self
    }

    /// Swaps the time source.
    #[must_use]
    pub fn with_clock<C2: Clock>(self, clock: C2) -> ShareReplayConfig<C2> {
        ShareReplayConfig {
            buffer_size: self.buffer_size,
            window_time: self.window_time,
            ref_count: self.ref_count,
            clock,
        }
    }

    #[must_use]
    pub fn buffer_size(&self) -> Option<usize> {
        self.buffer_size
    }

    #[must_use]
    pub fn window_time(&self) -> Option<Duration> {
        self.window_time
    }

    #[must_use]
    pub fn ref_count(&self) -> bool {
        self.ref_count
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Wraps `source` into a shared, replaying producer using this configuration.
    pub fn apply<T, P>(self, source: P) -> ShareReplay<T, C>
    where
        T: Clone + Send + 'static,
        P: Producer<T> + 'static,
    {
        ShareReplay::new(source, self)
    }
}
