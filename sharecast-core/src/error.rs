// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for the sharecast push protocol.
//!
//! Errors are terminal signals: a producer emits at most one of them, after which the
//! subscription is finished. They travel by value to every observer, so [`SharecastError`]
//! clones exactly: a wrapped user error is shared through an [`Arc`] rather than re-rendered.
//!
//! # Examples
//!
//! ```
//! use sharecast_core::{Result, SharecastError};
//!
//! fn fetch() -> Result<u32> {
//!     Err(SharecastError::stream_error("upstream not ready"))
//! }
//!
//! assert!(fetch().is_err());
//! ```

use std::error::Error;
use std::sync::Arc;

/// Root error type for all sharecast operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SharecastError {
    /// A producer failed while emitting.
    ///
    /// This is the general error for upstream failures that don't carry a typed source.
    #[error("Stream processing error: {context}")]
    StreamProcessingError {
        /// Description of what went wrong
        context: String,
    },

    /// Custom error from user code, shared verbatim between all observers.
    #[error("User error: {0}")]
    UserError(#[source] Arc<dyn Error + Send + Sync>),

    /// The multicast hub was torn down and refuses new observers.
    ///
    /// The owning operator reacts by building a fresh hub; observers never see this variant
    /// when they subscribe through the operator.
    #[error("Multicast hub has been discarded")]
    Discarded,
}

impl SharecastError {
    /// Create a stream processing error with the given context
    pub fn stream_error(context: impl Into<String>) -> Self {
        Self::StreamProcessingError {
            context: context.into(),
        }
    }

    /// Wrap a user error
    pub fn user_error(error: impl Error + Send + Sync + 'static) -> Self {
        Self::UserError(Arc::new(error))
    }

    /// Wrap an already shared user error without re-allocating it.
    pub fn from_arc(error: Arc<dyn Error + Send + Sync>) -> Self {
        Self::UserError(error)
    }

    /// Returns the shared user payload, if this is a `UserError`.
    ///
    /// Two errors cloned from the same original return pointer-equal payloads.
    #[must_use]
    pub fn user_source(&self) -> Option<&Arc<dyn Error + Send + Sync>> {
        match self {
            Self::UserError(inner) => Some(inner),
            _ => None,
        }
    }

    /// Returns `true` for errors raised by the library's own lifecycle rather than by a
    /// producer.
    #[must_use]
    pub const fn is_lifecycle(&self) -> bool {
        matches!(self, Self::Discarded)
    }
}

/// Specialized Result type for sharecast operations
pub type Result<T> = std::result::Result<T, SharecastError>;
