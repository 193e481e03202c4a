// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The multicast hub: one replay buffer, one upstream connection, many observers.
//!
//! ## Lifecycle
//!
//! | Event | Effect |
//! |-------|--------|
//! | first observer | replay (empty), then connect upstream |
//! | upstream value | record, then forward to every observer in join order |
//! | upstream completes | persist completion; the hub replays it forever |
//! | upstream errors | discard the hub; the error reaches current observers only |
//! | last observer leaves with `ref_count` | discard the hub and cancel upstream |
//!
//! A discarded hub refuses new observers with [`SharecastError::Discarded`], which tells the
//! owning operator to build a fresh one. Hubs have no identity beyond their allocation:
//! [`MulticastHub::same_hub`] compares handles.
//!
//! ## Re-entrancy
//!
//! Every operation holds a re-entrant lock for its whole duration, so calls from other threads
//! are serialized while calls made from inside a callback on the same thread (a producer that
//! emits while being subscribed, an observer that unsubscribes while receiving) go straight
//! through. The inner state is only borrowed between callbacks, never across one.

use crate::connection::{ConnectionController, ConnectionStatus};
use crate::logging::{debug, trace};
use crate::replay_buffer::{ReplayBuffer, Snapshot};
use crate::ShareReplayConfig;
use core::cell::RefCell;
use core::fmt;
use core::mem;
use parking_lot::ReentrantMutex;
use sharecast_core::{BoxProducer, Clock, Observer, Result, SharecastError, Subscriber};
use std::sync::{Arc, Weak};

/// Identity of one registered observer within its hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// The terminal state of a hub's upstream run.
#[derive(Debug, Clone)]
pub enum TerminalMarker {
    None,
    Error(SharecastError),
    Complete,
}

impl TerminalMarker {
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

type DiscardHook<T, C> = Box<dyn Fn(&MulticastHub<T, C>) + Send + Sync>;

/// Multicast hub bound to one upstream producer.
///
/// Cloning yields another handle to the same hub.
pub struct MulticastHub<T, C: Clock> {
    inner: Arc<Inner<T, C>>,
}

struct Inner<T, C: Clock> {
    ref_count: bool,
    connection: ConnectionController<T>,
    state: ReentrantMutex<RefCell<HubState<T, C>>>,
    on_discard: Option<DiscardHook<T, C>>,
}

struct HubState<T, C: Clock> {
    buffer: ReplayBuffer<T, C>,
    terminal: TerminalMarker,
    discarded: bool,
    observers: Vec<(ObserverId, Subscriber<T>)>,
    next_observer: u64,
}

enum Admission<T> {
    Completed(Snapshot<T>),
    Live(ObserverId, Snapshot<T>),
}

impl<T, C> MulticastHub<T, C>
where
    T: Clone + Send + 'static,
    C: Clock,
{
    /// Creates a hub that nobody owns; discarding it has no side effect.
    pub fn new(source: BoxProducer<T>, config: &ShareReplayConfig<C>) -> Self {
        Self::build(source, config, None)
    }

    /// Creates a hub that calls `on_discard` with itself when it is discarded.
    pub fn with_discard_hook<F>(source: BoxProducer<T>, config: &ShareReplayConfig<C>, on_discard: F) -> Self
    where
        F: Fn(&MulticastHub<T, C>) + Send + Sync + 'static,
    {
        Self::build(source, config, Some(Box::new(on_discard)))
    }

    fn build(source: BoxProducer<T>, config: &ShareReplayConfig<C>, on_discard: Option<DiscardHook<T, C>>) -> Self {
        let hub = Self {
            inner: Arc::new(Inner {
                ref_count: config.ref_count(),
                connection: ConnectionController::new(source),
                state: ReentrantMutex::new(RefCell::new(HubState {
                    buffer: ReplayBuffer::new(
                        config.buffer_size(),
                        config.window_time(),
                        config.clock().clone(),
                    ),
                    terminal: TerminalMarker::None,
                    discarded: false,
                    observers: Vec::new(),
                    next_observer: 0,
                })),
                on_discard,
            }),
        };
        debug!("{:?} created (ref_count: {})", hub, config.ref_count());
        hub
    }

    /// Returns `true` if both handles refer to the same hub.
    #[must_use]
    pub fn same_hub(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Adds an observer.
    ///
    /// The observer first receives the replayable history. After completion it then receives
    /// the completion and is done; before termination it stays registered for live values and
    /// the first registration connects upstream. Values the upstream emits synchronously while
    /// connecting reach it as live values.
    ///
    /// # Errors
    ///
    /// Returns [`SharecastError::Discarded`] if the hub was discarded.
    pub fn subscribe(&self, subscriber: Subscriber<T>) -> Result<()> {
        let guard = self.inner.state.lock();

        if subscriber.is_closed() {
            return Ok(());
        }

        let admission = {
            let mut state = guard.borrow_mut();
            if state.discarded {
                return Err(SharecastError::Discarded);
            }
            let replay = state.buffer.snapshot();
            match state.terminal {
                TerminalMarker::Complete => Admission::Completed(replay),
                TerminalMarker::Error(_) => return Err(SharecastError::Discarded),
                TerminalMarker::None => {
                    let id = ObserverId(state.next_observer);
                    state.next_observer += 1;
                    state.observers.push((id, subscriber.clone()));
                    Admission::Live(id, replay)
                }
            }
        };

        match admission {
            Admission::Completed(replay) => {
                for value in replay {
                    subscriber.next(value);
                }
                subscriber.complete();
            }
            Admission::Live(id, replay) => {
                let hub: Weak<Inner<T, C>> = Arc::downgrade(&self.inner);
                subscriber.add_teardown(move || {
                    if let Some(inner) = hub.upgrade() {
                        MulticastHub { inner }.unregister(id);
                    }
                });

                for value in replay {
                    subscriber.next(value);
                }

                // an observer leaving during replay may have torn the hub down already
                let discarded = guard.borrow().discarded;
                if !discarded {
                    self.connect();
                }
            }
        }

        drop(guard);
        Ok(())
    }

    /// Removes an observer; with `ref_count`, the last one leaving before termination
    /// discards the hub and cancels upstream.
    pub fn unregister(&self, id: ObserverId) {
        let guard = self.inner.state.lock();

        let tear_down = {
            let mut state = guard.borrow_mut();
            let before = state.observers.len();
            state.observers.retain(|(observer, _)| *observer != id);
            if state.observers.len() == before {
                return;
            }

            let idle = self.inner.ref_count
                && state.observers.is_empty()
                && state.terminal.is_none()
                && !state.discarded;
            if idle {
                state.discarded = true;
                state.buffer.clear();
            }
            idle
        };

        if tear_down {
            debug!("{:?} has no observers left, tearing down", self);
            self.discard();
            self.inner.connection.disconnect();
        }

        drop(guard);
    }

    /// Records an upstream value and forwards it to every observer in join order.
    pub fn broadcast(&self, value: T) {
        let guard = self.inner.state.lock();

        let targets: Vec<Subscriber<T>> = {
            let mut state = guard.borrow_mut();
            if !state.terminal.is_none() || state.discarded {
                return;
            }
            state.buffer.record(value.clone());
            state.observers.iter().map(|(_, s)| s.clone()).collect()
        };

        trace!("{:?} broadcasting to {} observers", self, targets.len());
        for target in targets {
            target.next(value.clone());
        }

        drop(guard);
    }

    /// Upstream completed: persist the completion and complete every observer.
    ///
    /// The hub stays usable and replays its history plus completion to later observers.
    pub fn terminate_complete(&self) {
        let guard = self.inner.state.lock();

        let observers = {
            let mut state = guard.borrow_mut();
            if !state.terminal.is_none() || state.discarded {
                return;
            }
            state.terminal = TerminalMarker::Complete;
            state.buffer.persist_complete();
            mem::take(&mut state.observers)
        };

        debug!("{:?} completed, {} observers", self, observers.len());
        self.inner.connection.disconnect();
        for (_, observer) in observers {
            observer.complete();
        }

        drop(guard);
    }

    /// Upstream failed: discard the hub, then deliver `error` to every current observer.
    ///
    /// The hub is discarded before delivery so that an observer re-subscribing from its error
    /// callback reaches a fresh hub and a fresh upstream run.
    pub fn terminate_error(&self, error: SharecastError) {
        let guard = self.inner.state.lock();

        let observers = {
            let mut state = guard.borrow_mut();
            if !state.terminal.is_none() || state.discarded {
                return;
            }
            state.terminal = TerminalMarker::Error(error.clone());
            state.discarded = true;
            state.buffer.clear();
            mem::take(&mut state.observers)
        };

        debug!("{:?} failed: {}; discarding", self, error);
        self.discard();
        self.inner.connection.disconnect();
        for (_, observer) in observers {
            observer.error(error.clone());
        }

        drop(guard);
    }

    /// Number of registered observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        let guard = self.inner.state.lock();
        let count = guard.borrow().observers.len();
        count
    }

    /// Current terminal marker.
    #[must_use]
    pub fn terminal(&self) -> TerminalMarker {
        let guard = self.inner.state.lock();
        let terminal = guard.borrow().terminal.clone();
        terminal
    }

    #[must_use]
    pub fn is_discarded(&self) -> bool {
        let guard = self.inner.state.lock();
        let discarded = guard.borrow().discarded;
        discarded
    }

    #[must_use]
    pub fn connection_status(&self) -> ConnectionStatus {
        self.inner.connection.status()
    }

    fn connect(&self) {
        let hub = self.clone();
        let connected = self.inner.connection.connect(move || {
            Subscriber::new(Arc::new(UpstreamObserver { hub }) as Arc<dyn Observer<T>>)
        });
        if connected {
            debug!("{:?} connected upstream", self);
        }
    }

    fn discard(&self) {
        if let Some(on_discard) = &self.inner.on_discard {
            on_discard(self);
        }
    }
}

impl<T, C: Clock> Clone for MulticastHub<T, C> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T, C: Clock> fmt::Debug for MulticastHub<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MulticastHub")
            .field("at", &Arc::as_ptr(&self.inner))
            .finish_non_exhaustive()
    }
}

// Routes upstream signals into the hub; lives exactly as long as the upstream subscription.
struct UpstreamObserver<T, C: Clock> {
    hub: MulticastHub<T, C>,
}

impl<T, C> Observer<T> for UpstreamObserver<T, C>
where
    T: Clone + Send + 'static,
    C: Clock,
{
    fn on_next(&self, value: T) {
        self.hub.broadcast(value);
    }

    fn on_error(&self, error: SharecastError) {
        self.hub.terminate_error(error);
    }

    fn on_complete(&self) {
        self.hub.terminate_complete();
    }
}
