// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::SharecastError;
use core::marker::PhantomData;

/// A downstream consumer of a push stream.
///
/// A well-behaved producer calls `on_next` zero or more times followed by at most one of
/// `on_error` / `on_complete`. Wrap observers in a [`Subscriber`](crate::Subscriber) to have
/// that grammar enforced.
pub trait Observer<T>: Send + Sync {
    /// Receives the next value.
    fn on_next(&self, value: T);

    /// Receives the terminal error.
    fn on_error(&self, error: SharecastError);

    /// Receives the terminal completion.
    fn on_complete(&self);
}

/// An [`Observer`] assembled from three closures.
pub struct FnObserver<T, N, E, C> {
    on_next: N,
    on_error: E,
    on_complete: C,
    _marker: PhantomData<fn(T)>,
}

impl<T, N, E, C> Observer<T> for FnObserver<T, N, E, C>
where
    N: Fn(T) + Send + Sync,
    E: Fn(SharecastError) + Send + Sync,
    C: Fn() + Send + Sync,
{
    fn on_next(&self, value: T) {
        (self.on_next)(value);
    }

    fn on_error(&self, error: SharecastError) {
        (self.on_error)(error);
    }

    fn on_complete(&self) {
        (self.on_complete)();
    }
}

/// Builds an observer from `next`, `error` and `complete` callbacks.
///
/// # Example
///
/// ```
/// use sharecast_core::{from_iter, observer, ProducerExt};
/// use std::sync::{Arc, Mutex};
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = seen.clone();
///
/// from_iter(vec![1, 2, 3]).subscribe(observer(
///     move |v| sink.lock().unwrap().push(v),
///     |_err| {},
///     || {},
/// ));
///
/// assert_eq!(*seen.lock().unwrap(), vec![1, 2, 3]);
/// ```
pub fn observer<T, N, E, C>(on_next: N, on_error: E, on_complete: C) -> FnObserver<T, N, E, C>
where
    N: Fn(T) + Send + Sync,
    E: Fn(SharecastError) + Send + Sync,
    C: Fn() + Send + Sync,
{
    FnObserver {
        on_next,
        on_error,
        on_complete,
        _marker: PhantomData,
    }
}
