// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Bounded, order-preserving history of recent values.
//!
//! A [`ReplayBuffer`] keeps at most `buffer_size` values and, when a window is configured,
//! only values younger than that window. Eviction by age happens both when recording and when
//! taking a [`Snapshot`], since time passes between the two.
//!
//! The clock is consulted only when a window is configured.

use core::time::Duration;
use sharecast_core::Clock;
use std::collections::VecDeque;
use std::vec::IntoIter;

const MIN_WINDOW: Duration = Duration::from_millis(1);

struct Entry<T, I> {
    value: T,
    recorded_at: Option<I>,
}

/// Recent values plus a sealed flag set by normal completion.
pub struct ReplayBuffer<T, C: Clock> {
    capacity: Option<usize>,
    window: Option<Duration>,
    clock: C,
    entries: VecDeque<Entry<T, C::Instant>>,
    sealed: bool,
}

impl<T: Clone, C: Clock> ReplayBuffer<T, C> {
    /// Creates an empty buffer.
    ///
    /// A capacity of zero is raised to one and a window below one millisecond is raised to one
    /// millisecond. `None` means unbounded.
    pub fn new(capacity: Option<usize>, window: Option<Duration>, clock: C) -> Self {
        Self {
            capacity: capacity.map(|n| n.max(1)),
            window: window.map(|w| w.max(MIN_WINDOW)),
            clock,
            entries: VecDeque::new(),
            sealed: false,
        }
    }

    /// Appends a value, then evicts what no longer fits.
    ///
    /// Ignored once the buffer is sealed.
    pub fn record(&mut self, value: T) {
        if self.sealed {
            return;
        }

        let now = self.window.map(|_| self.clock.now());
        self.entries.push_back(Entry {
            value,
            recorded_at: now,
        });
        self.trim(now);
    }

    /// Returns the currently valid values, oldest first.
    pub fn snapshot(&mut self) -> Snapshot<T> {
        let now = self.window.map(|_| self.clock.now());
        self.trim(now);

        Snapshot {
            values: self.entries.iter().map(|e| e.value.clone()).collect(),
        }
    }

    /// Seals the buffer after normal completion; its content is kept for replay.
    pub fn persist_complete(&mut self) {
        self.sealed = true;
    }

    /// Drops every retained value.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns `true` after [`persist_complete`](Self::persist_complete).
    #[must_use]
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Number of retained entries, without re-evaluating the window.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn trim(&mut self, now: Option<C::Instant>) {
        if let Some(capacity) = self.capacity {
            while self.entries.len() > capacity {
                self.entries.pop_front();
            }
        }

        // elapsed time instead of an expiry instant: `now + window` overflows for huge windows
        if let (Some(now), Some(window)) = (now, self.window) {
            while self
                .entries
                .front()
                .and_then(|e| e.recorded_at)
                .is_some_and(|recorded_at| recorded_at <= now && now - recorded_at >= window)
            {
                self.entries.pop_front();
            }
        }
    }
}

/// An owned, ordered copy of the replayable values.
///
/// Iterating does not consume the buffer, and the snapshot can be iterated again by cloning it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot<T> {
    values: Vec<T>,
}

impl<T> Snapshot<T> {
    /// Borrowing iterator over the values, oldest first.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.values.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<T> IntoIterator for Snapshot<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Snapshot<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
