// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{Observer, SharecastError, Subscription};
use core::fmt;
use parking_lot::Mutex;
use std::sync::{Arc, Weak};

type Destination<T> = Arc<dyn Observer<T>>;

/// The protocol guard between a producer and one observer.
///
/// A `Subscriber` forwards calls to its observer until the first terminal signal or until its
/// [`Subscription`] is unsubscribed. From that point on it holds no reference to the observer
/// and ignores every further call, so a producer can never emit past a terminal signal and a
/// finished observer is released as soon as its terminal delivery returns.
///
/// Producers check [`is_closed`](Self::is_closed) to stop synchronous emission loops early.
pub struct Subscriber<T> {
    inner: Arc<Inner<T>>,
}

struct Inner<T> {
    destination: Mutex<Option<Destination<T>>>,
    subscription: Subscription,
}

impl<T: 'static> Subscriber<T> {
    /// Wraps an observer.
    pub fn new(observer: Arc<dyn Observer<T>>) -> Self {
        let inner = Arc::new(Inner {
            destination: Mutex::new(Some(observer)),
            subscription: Subscription::new(),
        });

        let weak: Weak<Inner<T>> = Arc::downgrade(&inner);
        inner.subscription.add(move || {
            if let Some(inner) = weak.upgrade() {
                // released outside the lock; dropping may run arbitrary observer code
                let released = inner.destination.lock().take();
                drop(released);
            }
        });

        Self { inner }
    }

    /// Forwards a value unless the subscriber is closed.
    pub fn next(&self, value: T) {
        let destination = self.inner.destination.lock().clone();
        if let Some(destination) = destination {
            destination.on_next(value);
        }
    }

    /// Delivers the terminal error once, then unsubscribes.
    pub fn error(&self, error: SharecastError) {
        let destination = self.inner.destination.lock().take();
        if let Some(destination) = destination {
            destination.on_error(error);
            drop(destination);
            self.inner.subscription.unsubscribe();
        }
    }

    /// Delivers the terminal completion once, then unsubscribes.
    pub fn complete(&self) {
        let destination = self.inner.destination.lock().take();
        if let Some(destination) = destination {
            destination.on_complete();
            drop(destination);
            self.inner.subscription.unsubscribe();
        }
    }

    /// Cancels the subscription without delivering a terminal signal.
    pub fn unsubscribe(&self) {
        self.inner.subscription.unsubscribe();
    }

    /// Returns `true` once a terminal signal was delivered or the subscription was cancelled.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.subscription.is_closed() || self.inner.destination.lock().is_none()
    }

    /// Registers cleanup to run when this subscriber finishes for any reason.
    pub fn add_teardown<F>(&self, teardown: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.inner.subscription.add(teardown);
    }

    /// Returns the cancel handle of this subscriber.
    #[must_use]
    pub fn subscription(&self) -> Subscription {
        self.inner.subscription.clone()
    }
}

impl<T> Clone for Subscriber<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: 'static> Observer<T> for Subscriber<T> {
    fn on_next(&self, value: T) {
        self.next(value);
    }

    fn on_error(&self, error: SharecastError) {
        self.error(error);
    }

    fn on_complete(&self) {
        self.complete();
    }
}

impl<T: 'static> fmt::Debug for Subscriber<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscriber")
            .field("closed", &self.is_closed())
            .finish()
    }
}
