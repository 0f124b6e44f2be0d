// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! Error types for the Tributary publish/subscribe runtime
//!
//! Tributary separates two error channels:
//!
//! - [`TributaryError`] reports misuse detected at an API boundary, such as a
//!   negative demand handed to a fallible constructor or a `try_send` on a
//!   subject that already terminated.
//! - [`StreamError`] is a ready-made failure payload for streams. Producers
//!   deliver it through the failure terminal event, never as a `Result`
//!   returned from `request` or `send`.
//!
//! # Examples
//!
//! ```
//! use tributary_error::{Result, TributaryError};
//!
//! fn checked_count(count: i64) -> Result<u64> {
//!     u64::try_from(count).map_err(|_| TributaryError::invalid_demand(count))
//! }
//!
//! assert!(checked_count(-1).is_err());
//! ```

/// Errors raised by Tributary operations at an API boundary.
///
/// None of these travel through a subscription. Stream failures are terminal
/// events carrying a producer-defined payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TributaryError {
    /// A demand was built from a negative count.
    #[error("Invalid demand: count must be non-negative, got {count}")]
    InvalidDemand {
        /// The rejected count
        count: i64,
    },

    /// The subject already delivered its terminal event.
    #[error("Subject is terminated")]
    SubjectTerminated,

    /// No execution context was available for the scheduler.
    #[error("Scheduler unavailable: {context}")]
    SchedulerUnavailable {
        /// Why the execution context could not be obtained
        context: String,
    },
}

impl TributaryError {
    /// Create an invalid demand error for the rejected count
    #[must_use]
    pub const fn invalid_demand(count: i64) -> Self {
        Self::InvalidDemand { count }
    }

    /// Create a scheduler unavailable error with the given context
    pub fn scheduler_unavailable(context: impl Into<String>) -> Self {
        Self::SchedulerUnavailable {
            context: context.into(),
        }
    }
}

/// Specialized Result type for Tributary operations
///
/// # Examples
///
/// ```
/// use tributary_error::Result;
///
/// fn attach() -> Result<usize> {
///     Ok(1)
/// }
/// ```
pub type Result<T> = std::result::Result<T, TributaryError>;

/// General-purpose failure payload for streams.
///
/// Subjects hand the same failure to every attached subscriber, so failure
/// types must be `Clone`. `StreamError` keeps user errors behind a `Box`
/// and degrades them to their message when cloned.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// The producer failed while generating values.
    #[error("Stream processing error: {context}")]
    Processing {
        /// Description of what went wrong
        context: String,
    },

    /// The producer gave up waiting.
    #[error("Timeout error: {context}")]
    Timeout {
        /// Context about the timeout
        context: String,
    },

    /// Error raised by user code and forwarded as the stream failure.
    #[error("User error: {0}")]
    User(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl StreamError {
    /// Create a processing error with the given context
    pub fn processing(context: impl Into<String>) -> Self {
        Self::Processing {
            context: context.into(),
        }
    }

    /// Create a timeout error with the given context
    pub fn timeout(context: impl Into<String>) -> Self {
        Self::Timeout {
            context: context.into(),
        }
    }

    /// Wrap a user error
    pub fn user(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::User(Box::new(error))
    }
}

impl Clone for StreamError {
    fn clone(&self) -> Self {
        match self {
            Self::Processing { context } => Self::Processing {
                context: context.clone(),
            },
            Self::Timeout { context } => Self::Timeout {
                context: context.clone(),
            },
            // Boxed errors are not clonable, keep the message
            Self::User(e) => Self::Processing {
                context: format!("User error: {e}"),
            },
        }
    }
}

/// Extension trait for turning any error into a [`StreamError`]
pub trait IntoStreamError {
    /// Convert this error into a `StreamError`
    fn into_stream_error(self) -> StreamError;
}

impl<E: std::error::Error + Send + Sync + 'static> IntoStreamError for E {
    fn into_stream_error(self) -> StreamError {
        StreamError::user(self)
    }
}

/// Helper trait for adding context to results that fail with a [`StreamError`]
pub trait ResultExt<T> {
    /// Add context to an error
    ///
    /// # Errors
    /// Returns `Err(StreamError)` if the underlying result is `Err`.
    fn context(self, context: impl Into<String>) -> std::result::Result<T, StreamError>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<StreamError>,
{
    fn context(self, context: impl Into<String>) -> std::result::Result<T, StreamError> {
        self.map_err(|e| {
            let context = context.into();
            match e.into() {
                StreamError::User(inner) => StreamError::Processing {
                    context: format!("{context}: {inner}"),
                },
                other => other,
            }
        })
    }
}
