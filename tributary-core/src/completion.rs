// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// Failure type for streams that cannot fail.
pub type Never = core::convert::Infallible;

/// The terminal event of a stream.
///
/// Exactly one completion reaches a subscriber, after which the stream
/// delivers nothing else. A failure is ordinary control flow, not a panic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion<E> {
    /// The stream ended normally.
    Finished,
    /// The stream ended with a producer-defined error.
    Failure(E),
}

impl<E> Completion<E> {
    /// Returns `true` if this is `Finished`.
    pub const fn is_finished(&self) -> bool {
        matches!(self, Completion::Finished)
    }

    /// Returns `true` if this is a `Failure`.
    pub const fn is_failure(&self) -> bool {
        matches!(self, Completion::Failure(_))
    }

    /// Converts to `Option<E>`, discarding `Finished`.
    pub fn failure(self) -> Option<E> {
        match self {
            Completion::Finished => None,
            Completion::Failure(e) => Some(e),
        }
    }

    /// Maps the failure payload, leaving `Finished` untouched.
    pub fn map_failure<F, G>(self, f: G) -> Completion<F>
    where
        G: FnOnce(E) -> F,
    {
        match self {
            Completion::Finished => Completion::Finished,
            Completion::Failure(e) => Completion::Failure(f(e)),
        }
    }
}

impl<E> From<Result<(), E>> for Completion<E> {
    fn from(result: Result<(), E>) -> Self {
        match result {
            Ok(()) => Completion::Finished,
            Err(e) => Completion::Failure(e),
        }
    }
}

impl<E> From<Completion<E>> for Result<(), E> {
    fn from(completion: Completion<E>) -> Self {
        match completion {
            Completion::Finished => Ok(()),
            Completion::Failure(e) => Err(e),
        }
    }
}
