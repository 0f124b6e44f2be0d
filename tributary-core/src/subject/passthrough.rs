// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::implementation::{Broadcast, Replay};
use super::Subject;
use crate::{Completion, Never, Publisher, Subscriber};
use std::fmt;
use std::sync::Arc;
use tributary_error::{Result, TributaryError};

/// A subject that broadcasts values to current subscribers without replay.
///
/// Subscribers with zero outstanding demand miss the values sent while they
/// are saturated.
///
/// See the [module documentation](crate::subject) for details.
pub struct PassthroughSubject<T, E = Never> {
    inner: Arc<Broadcast<T, E>>,
}

impl<T, E> PassthroughSubject<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    /// Creates a subject with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Broadcast::new(Replay::Never, None),
        }
    }

    /// Like [`Subject::send`], but reports a send after termination.
    ///
    /// # Errors
    ///
    /// Returns `TributaryError::SubjectTerminated` if a terminal event was
    /// already sent.
    pub fn try_send(&self, value: T) -> Result<()> {
        if self.inner.send(value) {
            Ok(())
        } else {
            Err(TributaryError::SubjectTerminated)
        }
    }

    /// Returns `true` once a terminal event has been sent.
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.inner.state.lock().terminal.is_some()
    }

    /// Returns the number of attached subscriptions.
    ///
    /// Cancelled subscriptions are removed immediately; all of them are
    /// removed by the terminal event.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.state.lock().conduits.len()
    }
}

impl<T, E> Publisher for PassthroughSubject<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    type Output = T;
    type Failure = E;

    fn subscribe<S>(&self, subscriber: S)
    where
        S: Subscriber<Input = T, Failure = E> + Send + 'static,
    {
        self.inner.subscribe(subscriber);
    }
}

impl<T, E> Subject for PassthroughSubject<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    fn send(&self, value: T) {
        if !self.inner.send(value) {
            debug!("value sent to terminated subject dropped");
        }
    }

    fn send_completion(&self, completion: Completion<E>) {
        self.inner.complete(completion);
    }
}

impl<T, E> Default for PassthroughSubject<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> Clone for PassthroughSubject<T, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, E> fmt::Debug for PassthroughSubject<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("PassthroughSubject")
            .field("subscribers", &state.conduits.len())
            .field("terminated", &state.terminal.is_some())
            .finish()
    }
}
