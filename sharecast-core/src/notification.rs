// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{SharecastError, StreamItem, Subscriber};

/// One reified push signal.
#[derive(Debug, Clone)]
pub enum Notification<T> {
    /// A value
    Next(T),
    /// The terminal error
    Error(SharecastError),
    /// The terminal completion
    Complete,
}

impl<T: 'static> Notification<T> {
    /// Replays this signal into `subscriber`.
    pub fn accept(self, subscriber: &Subscriber<T>) {
        match self {
            Self::Next(value) => subscriber.next(value),
            Self::Error(error) => subscriber.error(error),
            Self::Complete => subscriber.complete(),
        }
    }
}

impl<T> Notification<T> {
    /// Returns `true` for `Error` and `Complete`.
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Next(_))
    }

    /// Converts into the async bridge representation; completion has none.
    pub fn into_stream_item(self) -> Option<StreamItem<T>> {
        match self {
            Self::Next(value) => Some(StreamItem::Value(value)),
            Self::Error(error) => Some(StreamItem::Error(error)),
            Self::Complete => None,
        }
    }
}

impl<T> From<StreamItem<T>> for Notification<T> {
    fn from(item: StreamItem<T>) -> Self {
        match item {
            StreamItem::Value(value) => Self::Next(value),
            StreamItem::Error(error) => Self::Error(error),
        }
    }
}
