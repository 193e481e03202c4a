// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::CancellationToken;
use core::future::Future;

/// Handle to a background task feeding one subscription.
///
/// The task receives a [`CancellationToken`] and is expected to stop once it fires. Cancelling
/// happens explicitly through [`cancel`](Self::cancel) or implicitly when the handle is dropped.
///
/// ```rust
/// use sharecast_stream::ProducerTask;
///
/// # #[tokio::main]
/// # async fn main() {
/// let task = ProducerTask::spawn(|cancel| async move {
///     cancel.cancelled().await;
/// });
///
/// assert!(!task.is_cancelled());
/// drop(task);
/// # }
/// ```
#[derive(Debug)]
pub struct ProducerTask {
    cancel: CancellationToken,
}

impl ProducerTask {
    /// Spawns `f(token)` on the ambient Tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    #[cfg(feature = "runtime-tokio")]
    pub fn spawn<F, Fut>(f: F) -> Self
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let cancel = CancellationToken::new();
        tokio::spawn(f(cancel.clone()));
        Self { cancel }
    }

    /// Signals the task to stop at its next cancellation point.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for ProducerTask {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
