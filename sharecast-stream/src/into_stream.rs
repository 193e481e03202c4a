// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::logging::debug;
use async_channel::{Receiver, Sender};
use core::pin::Pin;
use core::task::{Context, Poll};
use futures::Stream;
use sharecast_core::{Observer, Producer, ProducerExt, SharecastError, StreamItem, Subscription};

/// Consumes a producer as an async [`Stream`] of [`StreamItem`]s.
pub trait IntoStreamExt<T>: Producer<T> + Sized
where
    T: Send + 'static,
{
    /// Subscribes right away and buffers everything the producer pushes until it is polled.
    ///
    /// An error is yielded as `StreamItem::Error` and ends the stream. Completion ends it
    /// without an item. Dropping the stream unsubscribes.
    ///
    /// ```rust
    /// use futures::StreamExt;
    /// use sharecast_core::{from_iter, StreamItem};
    /// use sharecast_stream::IntoStreamExt;
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let mut stream = from_iter(vec![1, 2]).into_stream();
    ///
    /// assert_eq!(stream.next().await, Some(StreamItem::Value(1)));
    /// assert_eq!(stream.next().await, Some(StreamItem::Value(2)));
    /// assert!(stream.next().await.is_none());
    /// # }
    /// ```
    fn into_stream(self) -> ObservedStream<T> {
        let (sender, receiver) = async_channel::unbounded();
        let subscription = self.subscribe(ChannelObserver { sender });
        ObservedStream {
            receiver: Box::pin(receiver),
            subscription,
        }
    }
}

impl<T, P> IntoStreamExt<T> for P
where
    T: Send + 'static,
    P: Producer<T> + Sized,
{
}

/// Stream returned by [`IntoStreamExt::into_stream`].
#[derive(Debug)]
pub struct ObservedStream<T> {
    receiver: Pin<Box<Receiver<StreamItem<T>>>>,
    subscription: Subscription,
}

impl<T> ObservedStream<T> {
    /// The subscription feeding this stream.
    pub fn subscription(&self) -> &Subscription {
        &self.subscription
    }
}

impl<T> Stream for ObservedStream<T> {
    type Item = StreamItem<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.as_mut().poll_next(cx)
    }
}

impl<T> Drop for ObservedStream<T> {
    fn drop(&mut self) {
        self.subscription.unsubscribe();
    }
}

struct ChannelObserver<T> {
    sender: Sender<StreamItem<T>>,
}

impl<T: Send> Observer<T> for ChannelObserver<T> {
    fn on_next(&self, value: T) {
        if self.sender.try_send(StreamItem::Value(value)).is_err() {
            debug!("into_stream receiver dropped, value discarded");
        }
    }

    fn on_error(&self, error: SharecastError) {
        // Ignoring the result: a dropped receiver has nobody left to tell
        let _ = self.sender.try_send(StreamItem::Error(error));
        self.sender.close();
    }

    fn on_complete(&self) {
        self.sender.close();
    }
}
