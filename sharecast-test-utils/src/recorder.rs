// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::marble::Recorded;
use crate::TestScheduler;
use core::fmt;
use parking_lot::Mutex;
use sharecast_core::{Observer, SharecastError};
use std::sync::Arc;

/// An observer that records everything it receives.
///
/// Clones share the same record, so a test keeps one clone while the producer owns another.
/// With a scheduler attached every notification is stamped with the current frame; without
/// one the frame is always `0`.
pub struct RecordingObserver<T> {
    scheduler: Option<TestScheduler>,
    records: Arc<Mutex<Vec<(u64, Recorded<T>)>>>,
    errors: Arc<Mutex<Vec<SharecastError>>>,
}

impl<T> RecordingObserver<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            scheduler: None,
            records: Arc::new(Mutex::new(Vec::new())),
            errors: Arc::new(Mutex::new(Vec::new())),
        }
    }

    #[must_use]
    pub fn with_scheduler(scheduler: TestScheduler) -> Self {
        Self {
            scheduler: Some(scheduler),
            ..Self::new()
        }
    }

    /// Received errors, with their payloads.
    #[must_use]
    pub fn errors(&self) -> Vec<SharecastError> {
        self.errors.lock().clone()
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.records
            .lock()
            .iter()
            .any(|(_, r)| matches!(r, Recorded::Complete))
    }

    #[must_use]
    pub fn is_errored(&self) -> bool {
        !self.errors.lock().is_empty()
    }

    fn push(&self, record: Recorded<T>) {
        let frame = self.scheduler.as_ref().map_or(0, TestScheduler::frame);
        self.records.lock().push((frame, record));
    }
}

impl<T: Clone> RecordingObserver<T> {
    /// Everything received so far, stamped with frames.
    #[must_use]
    pub fn records(&self) -> Vec<(u64, Recorded<T>)> {
        self.records.lock().clone()
    }

    /// Only the values, in arrival order.
    #[must_use]
    pub fn values(&self) -> Vec<T> {
        self.records
            .lock()
            .iter()
            .filter_map(|(_, r)| match r {
                Recorded::Next(value) => Some(value.clone()),
                Recorded::Error | Recorded::Complete => None,
            })
            .collect()
    }
}

impl<T> Default for RecordingObserver<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for RecordingObserver<T> {
    fn clone(&self) -> Self {
        Self {
            scheduler: self.scheduler.clone(),
            records: self.records.clone(),
            errors: self.errors.clone(),
        }
    }
}

impl<T: Send> Observer<T> for RecordingObserver<T> {
    fn on_next(&self, value: T) {
        self.push(Recorded::Next(value));
    }

    fn on_error(&self, error: SharecastError) {
        self.errors.lock().push(error);
        self.push(Recorded::Error);
    }

    fn on_complete(&self) {
        self.push(Recorded::Complete);
    }
}

impl<T: fmt::Debug> fmt::Debug for RecordingObserver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordingObserver")
            .field("records", &*self.records.lock())
            .finish()
    }
}
