// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Push producers.
//!
//! A [`Producer`] is a cold, push-based source: nothing happens until a subscriber arrives, and
//! every subscription runs the producer independently. Producers may emit synchronously from
//! inside `subscribe_with` or later from timers and I/O.
//!
//! ## Example
//!
//! ```
//! use sharecast_core::{create, ProducerExt};
//! use std::sync::{Arc, Mutex};
//!
//! let numbers = create(|subscriber| {
//!     for value in 1..=3 {
//!         if subscriber.is_closed() {
//!             return;
//!         }
//!         subscriber.next(value);
//!     }
//!     subscriber.complete();
//! });
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = seen.clone();
//! let subscription = numbers.subscribe_fn(move |v| sink.lock().unwrap().push(v), |_| {}, || {});
//!
//! assert_eq!(*seen.lock().unwrap(), vec![1, 2, 3]);
//! assert!(subscription.is_closed());
//! ```

use crate::{observer, Observer, SharecastError, Subscriber, Subscription};
use core::marker::PhantomData;
use std::sync::Arc;

/// A push-based source of values.
pub trait Producer<T>: Send + Sync {
    /// Starts one run of the producer towards `subscriber`.
    ///
    /// Implementations register their cancellation with
    /// [`Subscriber::add_teardown`] and stop emitting once the subscriber is closed.
    fn subscribe_with(&self, subscriber: Subscriber<T>);
}

/// Shared, type-erased producer.
pub type BoxProducer<T> = Arc<dyn Producer<T>>;

impl<T, P> Producer<T> for Arc<P>
where
    P: Producer<T> + ?Sized,
{
    fn subscribe_with(&self, subscriber: Subscriber<T>) {
        (**self).subscribe_with(subscriber);
    }
}

impl<T, P> Producer<T> for Box<P>
where
    P: Producer<T> + ?Sized,
{
    fn subscribe_with(&self, subscriber: Subscriber<T>) {
        (**self).subscribe_with(subscriber);
    }
}

/// Convenience subscription methods for every [`Producer`].
pub trait ProducerExt<T: 'static>: Producer<T> {
    /// Subscribes an observer and returns its cancel handle.
    fn subscribe<O>(&self, observer: O) -> Subscription
    where
        O: Observer<T> + 'static,
    {
        self.subscribe_observer(Arc::new(observer))
    }

    /// Subscribes an already shared observer.
    fn subscribe_observer(&self, observer: Arc<dyn Observer<T>>) -> Subscription {
        let subscriber = Subscriber::new(observer);
        let subscription = subscriber.subscription();
        self.subscribe_with(subscriber);
        subscription
    }

    /// Subscribes with `next`, `error` and `complete` callbacks.
    fn subscribe_fn<N, E, C>(&self, on_next: N, on_error: E, on_complete: C) -> Subscription
    where
        N: Fn(T) + Send + Sync + 'static,
        E: Fn(SharecastError) + Send + Sync + 'static,
        C: Fn() + Send + Sync + 'static,
    {
        self.subscribe(observer(on_next, on_error, on_complete))
    }

    /// Erases the concrete producer type.
    fn boxed(self) -> BoxProducer<T>
    where
        Self: Sized + 'static,
    {
        Arc::new(self)
    }
}

impl<T: 'static, P> ProducerExt<T> for P where P: Producer<T> + ?Sized {}

/// A producer defined by a closure run once per subscription.
pub struct FnProducer<T, F> {
    on_subscribe: F,
    _marker: PhantomData<fn() -> T>,
}

impl<T, F> Producer<T> for FnProducer<T, F>
where
    F: Fn(Subscriber<T>) + Send + Sync,
{
    fn subscribe_with(&self, subscriber: Subscriber<T>) {
        (self.on_subscribe)(subscriber);
    }
}

/// Builds a producer from a subscribe function.
pub fn create<T, F>(on_subscribe: F) -> FnProducer<T, F>
where
    F: Fn(Subscriber<T>) + Send + Sync,
{
    FnProducer {
        on_subscribe,
        _marker: PhantomData,
    }
}

/// A synchronous producer that emits every item of a cloneable iterable, then completes.
#[derive(Debug, Clone)]
pub struct FromIter<I> {
    items: I,
}

impl<I> Producer<I::Item> for FromIter<I>
where
    I: IntoIterator + Clone + Send + Sync,
    I::Item: 'static,
{
    fn subscribe_with(&self, subscriber: Subscriber<I::Item>) {
        for item in self.items.clone() {
            if subscriber.is_closed() {
                return;
            }
            subscriber.next(item);
        }
        subscriber.complete();
    }
}

/// Emits the items of `items` synchronously on every subscription.
pub fn from_iter<I>(items: I) -> FromIter<I>
where
    I: IntoIterator + Clone + Send + Sync,
{
    FromIter { items }
}
