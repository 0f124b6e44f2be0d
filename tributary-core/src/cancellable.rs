// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{CancellationToken, Subscription};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// Something that can be told to stop.
///
/// Cancelling is always idempotent and never interrupts work that is
/// already running.
pub trait Cancellable {
    /// Request cancellation.
    fn cancel(&self);
}

impl<S: Subscription + ?Sized> Cancellable for Arc<S> {
    fn cancel(&self) {
        Subscription::cancel(&**self);
    }
}

impl Cancellable for CancellationToken {
    fn cancel(&self) {
        CancellationToken::cancel(self);
    }
}

type CancelFn = Box<dyn FnOnce() + Send>;

/// Type-erased cancellable that cancels automatically when dropped.
///
/// Returned by [`PublisherExt::sink`](crate::PublisherExt::sink) and
/// friends: keep it alive for as long as values should flow.
///
/// ```
/// use tributary_core::{AnyCancellable, PassthroughSubject, PublisherExt, Subject};
/// use std::sync::{Arc, Mutex};
///
/// let subject = PassthroughSubject::<i32>::new();
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink_seen = Arc::clone(&seen);
///
/// let mut bag: Vec<AnyCancellable> = Vec::new();
/// subject
///     .sink(move |value| sink_seen.lock().unwrap().push(value))
///     .store(&mut bag);
///
/// subject.send(1);
/// bag.clear();
/// subject.send(2);
///
/// assert_eq!(*seen.lock().unwrap(), vec![1]);
/// ```
pub struct AnyCancellable {
    cancel: Mutex<Option<CancelFn>>,
}

impl AnyCancellable {
    /// Run `cancel` at most once, on [`Cancellable::cancel`] or on drop.
    pub fn new<F>(cancel: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            cancel: Mutex::new(Some(Box::new(cancel))),
        }
    }

    /// Wrap an existing cancellable.
    pub fn from_cancellable<C>(cancellable: C) -> Self
    where
        C: Cancellable + Send + 'static,
    {
        Self::new(move || cancellable.cancel())
    }

    /// Move this handle into a collection that owns its lifetime.
    pub fn store(self, collection: &mut Vec<AnyCancellable>) {
        collection.push(self);
    }

    /// Run the cancellation now instead of on drop. Idempotent.
    pub fn cancel(&self) {
        // Release the lock before running user code
        let cancel = self.cancel.lock().take();
        if let Some(cancel) = cancel {
            cancel();
        }
    }

    /// Returns `true` once cancellation has run.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.lock().is_none()
    }
}

impl Cancellable for AnyCancellable {
    fn cancel(&self) {
        AnyCancellable::cancel(self);
    }
}

impl Drop for AnyCancellable {
    fn drop(&mut self) {
        AnyCancellable::cancel(self);
    }
}

impl fmt::Debug for AnyCancellable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyCancellable")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}
