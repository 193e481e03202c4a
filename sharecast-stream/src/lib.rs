// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Async bridges for sharecast producers.
//!
//! - [`from_stream_fn`] turns a stream factory into a cold [`Producer`](sharecast_core::Producer),
//!   driving each subscription's stream on a [`ProducerTask`]
//! - [`IntoStreamExt::into_stream`] consumes any producer as a [`futures::Stream`]
//!
//! With both directions available, `share_replay` can sit between async code on either side.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod cancellation_token;
pub mod from_stream;
pub mod into_stream;
mod logging;
pub mod producer_task;

pub use self::cancellation_token::{CancellationToken, Cancelled};
pub use self::from_stream::{from_stream_fn, StreamProducer};
pub use self::into_stream::{IntoStreamExt, ObservedStream};
pub use self::producer_task::ProducerTask;
