// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Marble diagrams.
//!
//! Every character occupies one frame:
//!
//! | Character | Meaning |
//! |-----------|---------|
//! | `-` or space | nothing happens |
//! | `(` ... `)` | everything inside lands on the frame of `(` |
//! | `\|` | completion |
//! | `#` | error |
//! | `^` / `!` | subscription / unsubscription (subscription diagrams only) |
//! | anything else | a value |
//!
//! ```
//! use sharecast_test_utils::{parse_marbles, Recorded};
//!
//! assert_eq!(
//!     parse_marbles("-a-(bc)|"),
//!     vec![
//!         (1, Recorded::Next('a')),
//!         (3, Recorded::Next('b')),
//!         (3, Recorded::Next('c')),
//!         (7, Recorded::Complete),
//!     ]
//! );
//! ```

use sharecast_core::{Notification, SharecastError};

/// One notification as seen by a test, without the error payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recorded<T> {
    Next(T),
    Error,
    Complete,
}

impl<T> Recorded<T> {
    /// The notification a producer replaying this marble emits.
    ///
    /// Errors carry a fixed `"error"` context.
    pub fn into_notification(self) -> Notification<T> {
        match self {
            Self::Next(value) => Notification::Next(value),
            Self::Error => Notification::Error(SharecastError::stream_error("error")),
            Self::Complete => Notification::Complete,
        }
    }
}

/// Subscription and unsubscription frames of one producer subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionLog {
    pub subscribed: u64,
    /// `None` while still subscribed.
    pub unsubscribed: Option<u64>,
}

/// Parses a notification diagram into `(frame, notification)` pairs.
#[must_use]
pub fn parse_marbles(marbles: &str) -> Vec<(u64, Recorded<char>)> {
    let mut events = Vec::new();
    let mut group: Option<u64> = None;

    for (frame, c) in (0u64..).zip(marbles.chars()) {
        let at = group.unwrap_or(frame);
        match c {
            ' ' | '-' | '^' | '!' => {}
            '(' => group = Some(frame),
            ')' => group = None,
            '|' => events.push((at, Recorded::Complete)),
            '#' => events.push((at, Recorded::Error)),
            value => events.push((at, Recorded::Next(value))),
        }
    }

    events
}

/// Parses a subscription diagram such as `"--^---!"` or `"(^!)"`.
///
/// # Panics
///
/// Panics if the diagram has no `^`.
#[must_use]
pub fn parse_subscriptions(marbles: &str) -> SubscriptionLog {
    let mut group: Option<u64> = None;
    let mut subscribed = None;
    let mut unsubscribed = None;

    for (frame, c) in (0u64..).zip(marbles.chars()) {
        let at = group.unwrap_or(frame);
        match c {
            '(' => group = Some(frame),
            ')' => group = None,
            '^' => subscribed = Some(at),
            '!' => unsubscribed = Some(at),
            _ => {}
        }
    }

    SubscriptionLog {
        subscribed: subscribed.unwrap_or_else(|| panic!("no '^' in {marbles:?}")),
        unsubscribed,
    }
}
