// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::implementation::{Broadcast, Replay};
use super::Subject;
use crate::{Completion, Never, Publisher, Subscriber};
use std::fmt;
use std::sync::Arc;
use tributary_error::{Result, TributaryError};

/// A subject that remembers the most recent value.
///
/// A subscriber attaching after a value exists receives that value as soon
/// as it grants demand. A subscriber that is saturated while values are
/// sent keeps only the newest one and gets it on its next request.
///
/// ```
/// use tributary_core::{CurrentValueSubject, PublisherExt, Subject};
/// use std::sync::{Arc, Mutex};
///
/// let subject = CurrentValueSubject::<&str>::empty();
/// subject.send("first");
/// subject.send("second");
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink_seen = Arc::clone(&seen);
/// let _cancellable = subject.sink(move |value| sink_seen.lock().unwrap().push(value));
///
/// subject.send("third");
/// assert_eq!(*seen.lock().unwrap(), vec!["second", "third"]);
/// ```
pub struct CurrentValueSubject<T, E = Never> {
    inner: Arc<Broadcast<T, E>>,
}

impl<T, E> CurrentValueSubject<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    /// Creates a subject holding `initial`, replayed to every subscriber.
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self {
            inner: Broadcast::new(Replay::Latest, Some(initial)),
        }
    }

    /// Creates a subject that starts replaying after the first `send`.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            inner: Broadcast::new(Replay::Latest, None),
        }
    }

    /// The most recently sent value, if any.
    #[must_use]
    pub fn value(&self) -> Option<T> {
        self.inner.state.lock().current.clone()
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
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.state.lock().conduits.len()
    }
}

impl<T, E> Publisher for CurrentValueSubject<T, E>
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

impl<T, E> Subject for CurrentValueSubject<T, E>
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

impl<T, E> Clone for CurrentValueSubject<T, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug, E> fmt::Debug for CurrentValueSubject<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("CurrentValueSubject")
            .field("value", &state.current)
            .field("subscribers", &state.conduits.len())
            .field("terminated", &state.terminal.is_some())
            .finish()
    }
}
