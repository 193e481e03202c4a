// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::marble::{parse_marbles, Recorded, SubscriptionLog};
use crate::TestScheduler;
use parking_lot::Mutex;
use sharecast_core::{Producer, Subscriber};
use std::sync::Arc;

/// A producer that plays a marble diagram from the frame it is subscribed at.
///
/// Every subscription runs the diagram independently and is logged, so tests can assert how
/// often and for how long the producer was subscribed.
#[derive(Debug, Clone)]
pub struct ColdProducer {
    scheduler: TestScheduler,
    messages: Arc<Vec<(u64, Recorded<char>)>>,
    subscriptions: Arc<Mutex<Vec<SubscriptionLog>>>,
}

impl ColdProducer {
    #[must_use]
    pub fn new(scheduler: TestScheduler, marbles: &str) -> Self {
        Self {
            scheduler,
            messages: Arc::new(parse_marbles(marbles)),
            subscriptions: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every subscription so far, in subscription order.
    #[must_use]
    pub fn subscriptions(&self) -> Vec<SubscriptionLog> {
        self.subscriptions.lock().clone()
    }
}

impl Producer<char> for ColdProducer {
    fn subscribe_with(&self, subscriber: Subscriber<char>) {
        let start = self.scheduler.frame();
        let index = {
            let mut log = self.subscriptions.lock();
            log.push(SubscriptionLog {
                subscribed: start,
                unsubscribed: None,
            });
            log.len() - 1
        };

        let log = self.subscriptions.clone();
        let scheduler = self.scheduler.clone();
        subscriber.add_teardown(move || {
            let at = scheduler.frame();
            if let Some(entry) = log.lock().get_mut(index) {
                entry.unsubscribed.get_or_insert(at);
            }
        });

        for &(offset, message) in self.messages.iter() {
            let subscriber = subscriber.clone();
            self.scheduler.schedule_at(start + offset, move || {
                if !subscriber.is_closed() {
                    message.into_notification().accept(&subscriber);
                }
            });
        }
    }
}
