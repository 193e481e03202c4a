// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::mem;
use parking_lot::Mutex;
use sharecast_core::{BoxProducer, Subscriber, Subscription};

/// Observable phase of a [`ConnectionController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// Never connected.
    NotConnected,
    /// Inside the upstream `subscribe_with` call.
    Connecting,
    /// Upstream subscription is live.
    Connected,
    /// Disconnected for good; a new connection needs a new hub.
    Released,
}

enum ConnectionState {
    NotConnected,
    Connecting(Subscription),
    Connected(Subscription),
    Released,
}

/// Owns the single upstream subscription of one hub.
///
/// The state is an explicit `not-connected / connecting / connected / released` flag rather
/// than call depth, so a producer that emits (or even terminates) synchronously from inside
/// its own subscription cannot trigger a second connect.
pub struct ConnectionController<T> {
    source: BoxProducer<T>,
    state: Mutex<ConnectionState>,
}

impl<T: 'static> ConnectionController<T> {
    pub fn new(source: BoxProducer<T>) -> Self {
        Self {
            source,
            state: Mutex::new(ConnectionState::NotConnected),
        }
    }

    /// Subscribes to the upstream producer unless a connection was already made.
    ///
    /// `upstream` builds the subscriber that routes upstream signals back into the hub; it is
    /// only called when a connection is actually established. Returns `true` in that case.
    pub fn connect<F>(&self, upstream: F) -> bool
    where
        F: FnOnce() -> Subscriber<T>,
    {
        let subscriber = {
            let mut state = self.state.lock();
            if !matches!(*state, ConnectionState::NotConnected) {
                return false;
            }
            let subscriber = upstream();
            *state = ConnectionState::Connecting(subscriber.subscription());
            subscriber
        };

        // lock released: the producer may call back into the hub and even disconnect us
        self.source.subscribe_with(subscriber);

        let mut state = self.state.lock();
        if let ConnectionState::Connecting(subscription) =
            mem::replace(&mut *state, ConnectionState::Released)
        {
            *state = ConnectionState::Connected(subscription);
        }
        true
    }

    /// Cancels the upstream subscription, if any, and releases the controller for good.
    ///
    /// Idempotent; returns `true` only when a live subscription was cancelled.
    pub fn disconnect(&self) -> bool {
        let previous = mem::replace(&mut *self.state.lock(), ConnectionState::Released);
        match previous {
            ConnectionState::Connecting(subscription) | ConnectionState::Connected(subscription) => {
                subscription.unsubscribe();
                true
            }
            ConnectionState::NotConnected | ConnectionState::Released => false,
        }
    }

    #[must_use]
    pub fn status(&self) -> ConnectionStatus {
        match *self.state.lock() {
            ConnectionState::NotConnected => ConnectionStatus::NotConnected,
            ConnectionState::Connecting(_) => ConnectionStatus::Connecting,
            ConnectionState::Connected(_) => ConnectionStatus::Connected,
            ConnectionState::Released => ConnectionStatus::Released,
        }
    }

    /// Returns `true` while an upstream subscription exists.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        matches!(
            self.status(),
            ConnectionStatus::Connecting | ConnectionStatus::Connected
        )
    }
}
