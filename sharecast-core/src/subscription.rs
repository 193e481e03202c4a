// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::fmt;
use core::sync::atomic::{AtomicBool, Ordering};
use parking_lot::Mutex;
use std::sync::Arc;

type Teardown = Box<dyn FnOnce() + Send>;

/// A cancel handle for one subscription.
///
/// Cloning a `Subscription` yields another handle to the same subscription. Calling
/// [`unsubscribe`](Self::unsubscribe) on any clone runs every registered teardown exactly once,
/// in registration order. Teardowns added after the subscription closed run immediately.
///
/// # Example
///
/// ```
/// use sharecast_core::Subscription;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let calls = Arc::new(AtomicUsize::new(0));
/// let subscription = Subscription::new();
/// let counter = calls.clone();
/// subscription.add(move || {
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
///
/// subscription.unsubscribe();
/// subscription.unsubscribe();
///
/// assert!(subscription.is_closed());
/// assert_eq!(calls.load(Ordering::SeqCst), 1);
/// ```
#[derive(Clone)]
pub struct Subscription {
    inner: Arc<Inner>,
}

struct Inner {
    closed: AtomicBool,
    teardowns: Mutex<Vec<Teardown>>,
}

impl Subscription {
    /// Creates an open subscription with no teardowns.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                closed: AtomicBool::new(false),
                teardowns: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Creates a handle that is already finished.
    #[must_use]
    pub fn closed() -> Self {
        let subscription = Self::new();
        subscription.inner.closed.store(true, Ordering::Release);
        subscription
    }

    /// Registers a teardown to run on unsubscribe.
    pub fn add<F>(&self, teardown: F)
    where
        F: FnOnce() + Send + 'static,
    {
        {
            let mut teardowns = self.inner.teardowns.lock();
            if !self.inner.closed.load(Ordering::Acquire) {
                teardowns.push(Box::new(teardown));
                return;
            }
        }
        teardown();
    }

    /// Closes the subscription and runs its teardowns.
    ///
    /// Idempotent. Teardowns run outside the internal lock, so they may freely touch this
    /// subscription again.
    pub fn unsubscribe(&self) {
        let teardowns = {
            let mut teardowns = self.inner.teardowns.lock();
            if self.inner.closed.swap(true, Ordering::AcqRel) {
                return;
            }
            core::mem::take(&mut *teardowns)
        };

        for teardown in teardowns {
            teardown();
        }
    }

    /// Returns `true` once the subscription has been unsubscribed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::Acquire)
    }
}

impl Default for Subscription {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("closed", &self.is_closed())
            .finish()
    }
}
