// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Producers backed by async streams.
//!
//! Each subscription builds a fresh stream from the factory and drives it on its own
//! [`ProducerTask`]:
//!
//! | Stream event | Subscriber call |
//! |--------------|-----------------|
//! | `StreamItem::Value(v)` | `next(v)` |
//! | `StreamItem::Error(e)` | `error(e)`, then the task ends |
//! | end of stream | `complete()` |
//!
//! Unsubscribing cancels the task; the stream is dropped at its next poll boundary.

use crate::logging::debug;
use crate::ProducerTask;
use futures::future::{select, Either};
use futures::{Stream, StreamExt};
use sharecast_core::{Producer, StreamItem, Subscriber};

/// A cold producer that runs a new stream for every subscription.
pub struct StreamProducer<F> {
    factory: F,
}

/// Builds a [`StreamProducer`] from a stream factory.
///
/// Subscribing spawns a task, so it has to happen inside a Tokio runtime.
///
/// ```rust
/// use futures::stream;
/// use sharecast_core::StreamItem;
/// use sharecast_stream::{from_stream_fn, IntoStreamExt};
/// use futures::StreamExt;
///
/// # #[tokio::main]
/// # async fn main() {
/// let numbers = from_stream_fn(|| stream::iter(vec![StreamItem::Value(1), StreamItem::Value(2)]));
///
/// let items: Vec<_> = numbers.into_stream().collect().await;
/// assert_eq!(items, vec![StreamItem::Value(1), StreamItem::Value(2)]);
/// # }
/// ```
pub fn from_stream_fn<F>(factory: F) -> StreamProducer<F> {
    StreamProducer { factory }
}

#[cfg(feature = "runtime-tokio")]
impl<T, S, F> Producer<T> for StreamProducer<F>
where
    T: Send + 'static,
    S: Stream<Item = StreamItem<T>> + Send + 'static,
    F: Fn() -> S + Send + Sync,
{
    fn subscribe_with(&self, subscriber: Subscriber<T>) {
        if subscriber.is_closed() {
            return;
        }

        let stream = (self.factory)();
        let downstream = subscriber.clone();
        let task = ProducerTask::spawn(move |cancel| async move {
            let mut stream = Box::pin(stream);
            loop {
                match select(stream.next(), cancel.cancelled()).await {
                    Either::Left((Some(StreamItem::Value(value)), _)) => {
                        if downstream.is_closed() {
                            break;
                        }
                        downstream.next(value);
                    }
                    Either::Left((Some(StreamItem::Error(error)), _)) => {
                        debug!("stream producer failed: {}", error);
                        downstream.error(error);
                        break;
                    }
                    Either::Left((None, _)) => {
                        downstream.complete();
                        break;
                    }
                    Either::Right(((), _)) => {
                        debug!("stream producer cancelled");
                        break;
                    }
                }
            }
        });

        subscriber.add_teardown(move || task.cancel());
    }
}
