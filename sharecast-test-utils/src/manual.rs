// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use sharecast_core::{Producer, SharecastError, Subscriber};
use std::sync::Arc;

/// A producer driven by hand from the test body.
///
/// Every subscription is kept; [`emit`](Self::emit), [`error`](Self::error) and
/// [`complete`](Self::complete) push to all subscribers that are still open.
///
/// ```
/// use sharecast_core::ProducerExt;
/// use sharecast_test_utils::{ManualProducer, RecordingObserver};
///
/// let source = ManualProducer::new();
/// let recorder = RecordingObserver::new();
/// source.subscribe(recorder.clone());
///
/// source.emit(1);
/// source.complete();
///
/// assert_eq!(recorder.values(), vec![1]);
/// assert!(recorder.is_completed());
/// ```
pub struct ManualProducer<T> {
    subscribers: Arc<Mutex<Vec<Subscriber<T>>>>,
}

impl<T: Clone + 'static> ManualProducer<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            subscribers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// How many times the producer was subscribed.
    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.subscribers.lock().len()
    }

    /// How many subscribers are still open.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.subscribers
            .lock()
            .iter()
            .filter(|s| !s.is_closed())
            .count()
    }

    pub fn emit(&self, value: T) {
        for subscriber in self.open() {
            subscriber.next(value.clone());
        }
    }

    pub fn error(&self, error: SharecastError) {
        for subscriber in self.open() {
            subscriber.error(error.clone());
        }
    }

    pub fn complete(&self) {
        for subscriber in self.open() {
            subscriber.complete();
        }
    }

    // snapshot taken so callbacks may subscribe again without deadlocking
    fn open(&self) -> Vec<Subscriber<T>> {
        self.subscribers
            .lock()
            .iter()
            .filter(|s| !s.is_closed())
            .cloned()
            .collect()
    }
}

impl<T: Clone + 'static> Default for ManualProducer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for ManualProducer<T> {
    fn clone(&self) -> Self {
        Self {
            subscribers: self.subscribers.clone(),
        }
    }
}

impl<T> Producer<T> for ManualProducer<T> {
    fn subscribe_with(&self, subscriber: Subscriber<T>) {
        self.subscribers.lock().push(subscriber);
    }
}
