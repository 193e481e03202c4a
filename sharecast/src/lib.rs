// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Sharecast
//!
//! Multicast with replay for push streams.
//!
//! ## Overview
//!
//! `share_replay` turns a cold producer into a shared one: the upstream runs at most once at a
//! time no matter how many observers join, and every observer that joins late first receives
//! a bounded history of what it missed.
//!
//! - **Completion is persisted.** Observers joining after the upstream completed get the
//!   retained history followed by completion, without a new upstream run.
//! - **Errors are not.** An error reaches every observer present at the time and then discards
//!   the shared state; the next observer starts a fresh upstream run.
//! - **`ref_count`** decides whether the connection survives all observers leaving before
//!   termination (`false`, the default) or is torn down and later restarted (`true`).
//!
//! ## Quick Start
//!
//! ```rust
//! use sharecast::prelude::*;
//! use std::sync::{Arc, Mutex};
//!
//! let shared = from_iter(vec![1, 2, 3]).share_replay(2);
//!
//! let early = Arc::new(Mutex::new(Vec::new()));
//! let sink = early.clone();
//! shared.subscribe_fn(move |v| sink.lock().unwrap().push(v), |_| {}, || {});
//!
//! let late = Arc::new(Mutex::new(Vec::new()));
//! let sink = late.clone();
//! shared.subscribe_fn(move |v| sink.lock().unwrap().push(v), |_| {}, || {});
//!
//! assert_eq!(*early.lock().unwrap(), vec![1, 2, 3]);
//! assert_eq!(*late.lock().unwrap(), vec![2, 3]);
//! ```
//!
//! ## Crates
//!
//! | Crate | Contents |
//! |-------|----------|
//! | `sharecast-core` | observer protocol, subscriptions, clocks, errors |
//! | `sharecast-replay` | replay buffer, multicast hub, connection controller, the operator |
//! | `sharecast-stream` | bridges to and from `futures::Stream` |

// Re-export the protocol
pub use sharecast_core::{
    create, from_iter, observer, BoxProducer, Clock, Notification, Observer, Producer,
    ProducerExt, Result, SharecastError, StreamItem, Subscriber, Subscription, SystemClock,
};

// Re-export the operator and its building blocks
pub use sharecast_replay::{
    ConnectionStatus, MulticastHub, ReplayBuffer, ShareReplay, ShareReplayConfig,
    ShareReplayExt, Snapshot, TerminalMarker,
};

// Re-export the async bridge
pub use sharecast_stream::{from_stream_fn, CancellationToken, IntoStreamExt, ObservedStream, StreamProducer};

/// Prelude module for convenient imports
pub mod prelude {
    pub use sharecast_core::{create, from_iter, Observer, Producer, ProducerExt, SharecastError, StreamItem, Subscription};
    pub use sharecast_replay::{ShareReplayConfig, ShareReplayExt};
    pub use sharecast_stream::{from_stream_fn, IntoStreamExt};
}
