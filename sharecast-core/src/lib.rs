// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Core push protocol for sharecast.
//!
//! Everything here is the contract between a producer and its consumers:
//!
//! - [`Producer`]: a cold source started once per subscription
//! - [`Observer`]: receives `next*` followed by at most one `error` or `complete`
//! - [`Subscriber`]: the guard that enforces that grammar and releases the observer
//! - [`Subscription`]: the cancel handle returned to callers
//! - [`Clock`]: the time source consulted by replay windows

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod clock;
pub mod error;
pub mod notification;
pub mod observer;
pub mod producer;
pub mod stream_item;
pub mod subscriber;
pub mod subscription;

pub use self::clock::{Clock, SystemClock};
pub use self::error::{Result, SharecastError};
pub use self::notification::Notification;
pub use self::observer::{observer, FnObserver, Observer};
pub use self::producer::{create, from_iter, BoxProducer, FnProducer, FromIter, Producer, ProducerExt};
pub use self::stream_item::StreamItem;
pub use self::subscriber::Subscriber;
pub use self::subscription::Subscription;
