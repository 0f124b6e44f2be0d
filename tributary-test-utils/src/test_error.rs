// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// Failure payload used by tests that need a comparable error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TestError {
    /// Generic failure with a message.
    #[error("test failure: {0}")]
    Failed(String),
    /// The upstream went away.
    #[error("upstream disconnected")]
    Disconnected,
}

impl TestError {
    /// Shorthand for `TestError::Failed`.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}
