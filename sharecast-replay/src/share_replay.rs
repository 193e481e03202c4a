// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The share-replay operator.
//!
//! [`ShareReplay`] turns a cold producer into one whose single upstream run is shared by every
//! subscriber, with late subscribers first receiving a bounded history.
//!
//! # Semantics
//!
//! - The upstream is subscribed lazily, on the first downstream subscription, and never more
//!   than once at a time.
//! - Every subscriber receives the buffered history, then live values, then the terminal signal.
//! - A completion is replayed to every later subscriber, with or without `ref_count`.
//! - An error is delivered to the current subscribers only; the next subscriber starts a brand
//!   new upstream run with an empty buffer.
//! - With `ref_count`, the last subscriber leaving before termination cancels the upstream and
//!   the next subscriber restarts it.
//!
//! # Example
//!
//! ```
//! use sharecast_core::{from_iter, ProducerExt};
//! use sharecast_replay::ShareReplayExt;
//! use std::sync::{Arc, Mutex};
//!
//! let shared = from_iter(vec![1, 2, 3]).share_replay(2);
//!
//! let first = Arc::new(Mutex::new(Vec::new()));
//! let sink = first.clone();
//! shared.subscribe_fn(move |v| sink.lock().unwrap().push(v), |_| {}, || {});
//!
//! // completed: a late subscriber gets the last two values, and the source is not re-run
//! let late = Arc::new(Mutex::new(Vec::new()));
//! let sink = late.clone();
//! shared.subscribe_fn(move |v| sink.lock().unwrap().push(v), |_| {}, || {});
//!
//! assert_eq!(*first.lock().unwrap(), vec![1, 2, 3]);
//! assert_eq!(*late.lock().unwrap(), vec![2, 3]);
//! ```

use crate::logging::debug;
use crate::multicast_hub::MulticastHub;
use crate::ShareReplayConfig;
use core::fmt;
use parking_lot::Mutex;
use sharecast_core::{BoxProducer, Clock, Producer, SharecastError, Subscriber, SystemClock};
use std::sync::{Arc, Weak};

/// A producer that multicasts one upstream run and replays recent values to late subscribers.
///
/// Cloning yields another handle to the same operator instance, sharing its current hub.
pub struct ShareReplay<T, C: Clock = SystemClock> {
    inner: Arc<Inner<T, C>>,
}

struct Inner<T, C: Clock> {
    source: BoxProducer<T>,
    config: ShareReplayConfig<C>,
    current: Mutex<Option<MulticastHub<T, C>>>,
}

impl<T, C> ShareReplay<T, C>
where
    T: Clone + Send + 'static,
    C: Clock,
{
    pub fn new<P>(source: P, config: ShareReplayConfig<C>) -> Self
    where
        P: Producer<T> + 'static,
    {
        Self {
            inner: Arc::new(Inner {
                source: Arc::new(source),
                config,
                current: Mutex::new(None),
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ShareReplayConfig<C> {
        &self.inner.config
    }

    /// The hub new subscribers would join right now, if any.
    #[must_use]
    pub fn current_hub(&self) -> Option<MulticastHub<T, C>> {
        self.inner.current.lock().clone()
    }

    fn current_or_create(&self) -> MulticastHub<T, C> {
        let mut current = self.inner.current.lock();
        if let Some(hub) = current.as_ref() {
            return hub.clone();
        }

        let operator: Weak<Inner<T, C>> = Arc::downgrade(&self.inner);
        let hub = MulticastHub::with_discard_hook(
            self.inner.source.clone(),
            &self.inner.config,
            move |discarded| {
                if let Some(operator) = operator.upgrade() {
                    let mut current = operator.current.lock();
                    if current.as_ref().is_some_and(|hub| hub.same_hub(discarded)) {
                        *current = None;
                    }
                }
            },
        );
        debug!("installing fresh {:?}", hub);

        *current = Some(hub.clone());
        hub
    }

    fn forget(&self, hub: &MulticastHub<T, C>) {
        let mut current = self.inner.current.lock();
        if current.as_ref().is_some_and(|c| c.same_hub(hub)) {
            *current = None;
        }
    }
}

impl<T, C> Producer<T> for ShareReplay<T, C>
where
    T: Clone + Send + 'static,
    C: Clock,
{
    fn subscribe_with(&self, subscriber: Subscriber<T>) {
        loop {
            let hub = self.current_or_create();
            match hub.subscribe(subscriber.clone()) {
                Ok(()) => return,
                // lost a race against teardown; the next hub is fresh
                Err(SharecastError::Discarded) => self.forget(&hub),
                Err(error) => {
                    subscriber.error(error);
                    return;
                }
            }
        }
    }
}

impl<T, C: Clock> Clone for ShareReplay<T, C> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T, C: Clock> fmt::Debug for ShareReplay<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShareReplay")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

/// Extension trait adding `share_replay` to every producer.
pub trait ShareReplayExt<T>: Producer<T> + Sized + 'static
where
    T: Clone + Send + 'static,
{
    /// Shares the producer and replays up to `buffer_size` values to late subscribers.
    ///
    /// No window and no ref counting: the upstream run survives all subscribers leaving.
    fn share_replay(self, buffer_size: usize) -> ShareReplay<T> {
        ShareReplay::new(self, ShareReplayConfig::buffered(buffer_size))
    }

    /// Shares the producer with full control over buffering, window, ref counting and clock.
    fn share_replay_with<C: Clock>(self, config: ShareReplayConfig<C>) -> ShareReplay<T, C> {
        ShareReplay::new(self, config)
    }
}

impl<T, P> ShareReplayExt<T> for P
where
    T: Clone + Send + 'static,
    P: Producer<T> + 'static,
{
}
