// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities for the sharecast workspace.
//!
//! Push streams are tested in virtual time: a [`TestScheduler`] owns a queue of actions keyed by
//! frame, [`ColdProducer`]s play marble diagrams relative to their subscription, and
//! [`RecordingObserver`]s capture what arrived and when. A [`ManualProducer`] covers the tests
//! that drive a source by hand instead. Expected output is written as a marble
//! diagram too and compared with [`parse_marbles`].
//!
//! # Example
//!
//! ```rust
//! use sharecast_test_utils::{parse_marbles, parse_subscriptions, TestScheduler};
//!
//! let scheduler = TestScheduler::new();
//! let source = scheduler.cold("-a-b-|");
//!
//! let recorder = scheduler.observe(source.clone(), 2, None);
//! scheduler.flush();
//!
//! assert_eq!(recorder.records(), parse_marbles("---a-b-|"));
//! assert_eq!(source.subscriptions(), vec![parse_subscriptions("--^----!")]);
//! ```
//!
//! The scheduler is also a [`sharecast_core::Clock`], so time-windowed replay can be driven
//! deterministically and clock reads can be counted with [`TestScheduler::now_calls`].

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod cold;
pub mod combinators;
pub mod manual;
pub mod marble;
pub mod recorder;
pub mod scheduler;

pub use self::cold::ColdProducer;
pub use self::combinators::{defer, empty, never, of, retry, take, throw_error};
pub use self::manual::ManualProducer;
pub use self::marble::{parse_marbles, parse_subscriptions, Recorded, SubscriptionLog};
pub use self::recorder::RecordingObserver;
pub use self::scheduler::TestScheduler;
