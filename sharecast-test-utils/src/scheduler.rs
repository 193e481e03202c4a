// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::cold::ColdProducer;
use crate::recorder::RecordingObserver;
use core::fmt;
use core::time::Duration;
use parking_lot::Mutex;
use sharecast_core::{Clock, Producer, Subscriber};
use std::collections::BTreeMap;
use std::sync::Arc;

type Action = Box<dyn FnOnce() + Send>;

/// Virtual-time scheduler driving marble tests.
///
/// Time is measured in frames; one frame is one millisecond when the scheduler is used as a
/// [`Clock`]. Actions scheduled for the same frame run in the order they were scheduled, and an
/// action may schedule further actions, including for the current frame.
///
/// ```
/// use sharecast_test_utils::TestScheduler;
/// use std::sync::atomic::{AtomicU64, Ordering};
/// use std::sync::Arc;
///
/// let scheduler = TestScheduler::new();
/// let seen = Arc::new(AtomicU64::new(0));
///
/// let (clock, sink) = (scheduler.clone(), seen.clone());
/// scheduler.schedule_at(7, move || sink.store(clock.frame(), Ordering::SeqCst));
/// scheduler.flush();
///
/// assert_eq!(seen.load(Ordering::SeqCst), 7);
/// ```
#[derive(Clone, Default)]
pub struct TestScheduler {
    inner: Arc<Mutex<State>>,
}

#[derive(Default)]
struct State {
    frame: u64,
    next_seq: u64,
    queue: BTreeMap<(u64, u64), Action>,
    now_calls: usize,
}

impl TestScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual frame.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.inner.lock().frame
    }

    /// Number of times the scheduler was asked for the time through [`Clock::now`].
    #[must_use]
    pub fn now_calls(&self) -> usize {
        self.inner.lock().now_calls
    }

    /// Runs `action` at `frame`, or at the current frame if `frame` already passed.
    pub fn schedule_at<F>(&self, frame: u64, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let mut state = self.inner.lock();
        let frame = frame.max(state.frame);
        let seq = state.next_seq;
        state.next_seq += 1;
        state.queue.insert((frame, seq), Box::new(action));
    }

    /// Runs `action` `delay` frames from now.
    pub fn schedule_in<F>(&self, delay: u64, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let at = self.frame() + delay;
        self.schedule_at(at, action);
    }

    /// Runs every scheduled action, advancing virtual time as it goes.
    pub fn flush(&self) {
        loop {
            let next = {
                let mut state = self.inner.lock();
                match state.queue.pop_first() {
                    Some(((frame, _), action)) => {
                        state.frame = frame;
                        action
                    }
                    None => return,
                }
            };
            next();
        }
    }

    /// Runs the actions due up to and including `frame`, then moves the clock to `frame`.
    pub fn advance_to(&self, frame: u64) {
        loop {
            let next = {
                let mut state = self.inner.lock();
                let due = state.queue.keys().next().map(|&(due, _)| due);
                match due {
                    Some(due) if due <= frame => {
                        state.frame = due;
                        state.queue.pop_first().map(|(_, action)| action)
                    }
                    _ => {
                        state.frame = state.frame.max(frame);
                        None
                    }
                }
            };
            match next {
                Some(action) => action(),
                None => return,
            }
        }
    }

    /// Builds a cold producer replaying `marbles` relative to each subscription.
    #[must_use]
    pub fn cold(&self, marbles: &str) -> ColdProducer {
        ColdProducer::new(self.clone(), marbles)
    }

    /// Subscribes to `producer` at `subscribe_at` and cancels at `unsubscribe_at`, recording
    /// every notification together with the frame it arrived in.
    pub fn observe<T, P>(
        &self,
        producer: P,
        subscribe_at: u64,
        unsubscribe_at: Option<u64>,
    ) -> RecordingObserver<T>
    where
        T: Send + 'static,
        P: Producer<T> + 'static,
    {
        let recorder = RecordingObserver::with_scheduler(self.clone());
        let subscriber = Subscriber::new(Arc::new(recorder.clone()));
        let subscription = subscriber.subscription();

        self.schedule_at(subscribe_at, move || producer.subscribe_with(subscriber));
        if let Some(at) = unsubscribe_at {
            self.schedule_at(at, move || subscription.unsubscribe());
        }

        recorder
    }
}

impl Clock for TestScheduler {
    type Instant = Duration;

    fn now(&self) -> Duration {
        let mut state = self.inner.lock();
        state.now_calls += 1;
        Duration::from_millis(state.frame)
    }
}

impl fmt::Debug for TestScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.lock();
        f.debug_struct("TestScheduler")
            .field("frame", &state.frame)
            .field("pending", &state.queue.len())
            .finish()
    }
}
