// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Small producers and operators used to drive the share-replay operator in tests.

use core::marker::PhantomData;
use core::sync::atomic::{AtomicUsize, Ordering};
use parking_lot::Mutex;
use sharecast_core::{from_iter, FromIter, Observer, Producer, SharecastError, Subscriber, Subscription};
use std::sync::{Arc, Weak};

/// Emits `values` synchronously, then completes.
pub fn of<T>(values: Vec<T>) -> FromIter<Vec<T>>
where
    T: Clone + Send + Sync,
{
    from_iter(values)
}

/// Completes immediately.
pub fn empty<T>() -> Empty<T> {
    Empty(PhantomData)
}

pub struct Empty<T>(PhantomData<fn() -> T>);

impl<T: 'static> Producer<T> for Empty<T> {
    fn subscribe_with(&self, subscriber: Subscriber<T>) {
        subscriber.complete();
    }
}

/// Never emits and never terminates.
pub fn never<T>() -> Never<T> {
    Never(PhantomData)
}

pub struct Never<T>(PhantomData<fn() -> T>);

impl<T> Producer<T> for Never<T> {
    fn subscribe_with(&self, _subscriber: Subscriber<T>) {}
}

/// Fails immediately with a clone of `error`.
pub fn throw_error<T>(error: SharecastError) -> ThrowError<T> {
    ThrowError {
        error,
        _marker: PhantomData,
    }
}

pub struct ThrowError<T> {
    error: SharecastError,
    _marker: PhantomData<fn() -> T>,
}

impl<T: 'static> Producer<T> for ThrowError<T> {
    fn subscribe_with(&self, subscriber: Subscriber<T>) {
        subscriber.error(self.error.clone());
    }
}

/// Builds a fresh producer for every subscription.
pub fn defer<F>(factory: F) -> Defer<F> {
    Defer { factory }
}

pub struct Defer<F> {
    factory: F,
}

impl<T, P, F> Producer<T> for Defer<F>
where
    F: Fn() -> P + Send + Sync,
    P: Producer<T>,
{
    fn subscribe_with(&self, subscriber: Subscriber<T>) {
        (self.factory)().subscribe_with(subscriber);
    }
}

/// Emits the first `count` values of `source`, then completes and cancels it.
pub fn take<P>(source: P, count: usize) -> Take<P> {
    Take {
        source: Arc::new(source),
        count,
    }
}

pub struct Take<P> {
    source: Arc<P>,
    count: usize,
}

impl<P> Clone for Take<P> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            count: self.count,
        }
    }
}

struct TakeObserver<T> {
    downstream: Subscriber<T>,
    remaining: AtomicUsize,
}

impl<T: 'static> Observer<T> for TakeObserver<T> {
    fn on_next(&self, value: T) {
        let before = self
            .remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
        if let Ok(before) = before {
            self.downstream.next(value);
            if before == 1 {
                self.downstream.complete();
            }
        }
    }

    fn on_error(&self, error: SharecastError) {
        self.downstream.error(error);
    }

    fn on_complete(&self) {
        self.downstream.complete();
    }
}

impl<T, P> Producer<T> for Take<P>
where
    T: 'static,
    P: Producer<T>,
{
    fn subscribe_with(&self, subscriber: Subscriber<T>) {
        if self.count == 0 {
            subscriber.complete();
            return;
        }

        let upstream = Subscriber::new(Arc::new(TakeObserver {
            downstream: subscriber.clone(),
            remaining: AtomicUsize::new(self.count),
        }) as Arc<dyn Observer<T>>);

        let cancel = upstream.subscription();
        subscriber.add_teardown(move || cancel.unsubscribe());
        self.source.subscribe_with(upstream);
    }
}

/// Re-subscribes to `source` up to `count` times when it fails.
///
/// The re-subscription happens synchronously inside the error callback.
pub fn retry<P>(source: P, count: usize) -> Retry<P> {
    Retry {
        source: Arc::new(source),
        count,
    }
}

pub struct Retry<P> {
    source: Arc<P>,
    count: usize,
}

impl<P> Clone for Retry<P> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            count: self.count,
        }
    }
}

struct RetryRun<T, P> {
    source: Arc<P>,
    downstream: Subscriber<T>,
    remaining: AtomicUsize,
    attempt: Mutex<Option<Subscription>>,
}

impl<T, P> RetryRun<T, P>
where
    T: 'static,
    P: Producer<T> + 'static,
{
    fn start(self: &Arc<Self>) {
        let upstream = Subscriber::new(Arc::new(RetryObserver { run: self.clone() }) as Arc<dyn Observer<T>>);
        *self.attempt.lock() = Some(upstream.subscription());
        self.source.subscribe_with(upstream);
    }
}

struct RetryObserver<T, P> {
    run: Arc<RetryRun<T, P>>,
}

impl<T, P> Observer<T> for RetryObserver<T, P>
where
    T: 'static,
    P: Producer<T> + 'static,
{
    fn on_next(&self, value: T) {
        self.run.downstream.next(value);
    }

    fn on_error(&self, error: SharecastError) {
        if self.run.downstream.is_closed() {
            return;
        }
        let retried = self
            .run
            .remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if retried {
            self.run.start();
        } else {
            self.run.downstream.error(error);
        }
    }

    fn on_complete(&self) {
        self.run.downstream.complete();
    }
}

impl<T, P> Producer<T> for Retry<P>
where
    T: 'static,
    P: Producer<T> + 'static,
{
    fn subscribe_with(&self, subscriber: Subscriber<T>) {
        let run = Arc::new(RetryRun {
            source: self.source.clone(),
            downstream: subscriber.clone(),
            remaining: AtomicUsize::new(self.count),
            attempt: Mutex::new(None),
        });

        let weak: Weak<RetryRun<T, P>> = Arc::downgrade(&run);
        subscriber.add_teardown(move || {
            if let Some(run) = weak.upgrade() {
                let attempt = run.attempt.lock().take();
                if let Some(attempt) = attempt {
                    attempt.unsubscribe();
                }
            }
        });

        run.start();
    }
}
