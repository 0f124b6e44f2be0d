// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A field that announces its writes.

use std::fmt;
use std::sync::OnceLock;
use tributary_core::{Never, PassthroughSubject, Publisher, Subject, Subscriber};

/// A value paired with a publisher of its future writes.
///
/// Reads go straight to the value. [`set`](Published::set) stores the new
/// value and then sends it to every subscriber attached through
/// [`publisher`](Published::publisher). Subscribers do not receive the
/// value current at the time they subscribe, only later writes.
///
/// The subject behind the publisher is created on first use, so a field
/// nobody observes costs nothing beyond the value itself.
///
/// ```
/// use tributary::{Published, PublisherExt};
/// use std::sync::{Arc, Mutex};
///
/// let mut temperature = Published::new(20);
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink_seen = Arc::clone(&seen);
/// let _cancellable = temperature
///     .publisher()
///     .sink(move |value| sink_seen.lock().unwrap().push(value));
///
/// temperature.set(21);
/// temperature.set(23);
///
/// assert_eq!(*temperature.get(), 23);
/// assert_eq!(*seen.lock().unwrap(), vec![21, 23]);
/// ```
pub struct Published<T> {
    value: T,
    subject: OnceLock<PassthroughSubject<T>>,
}

impl<T> Published<T>
where
    T: Clone + Send + 'static,
{
    #[must_use]
    pub const fn new(value: T) -> Self {
        Self {
            value,
            subject: OnceLock::new(),
        }
    }

    /// The current value.
    pub const fn get(&self) -> &T {
        &self.value
    }

    /// Store `value`, then publish it.
    pub fn set(&mut self, value: T) {
        self.replace(value);
    }

    /// Store `value`, publish it and return the previous value.
    pub fn replace(&mut self, value: T) -> T {
        let previous = std::mem::replace(&mut self.value, value.clone());
        // Without a subject nobody can be listening
        if let Some(subject) = self.subject.get() {
            subject.send(value);
        }
        previous
    }

    /// Apply `update` to a copy of the value and publish the result.
    pub fn modify<F>(&mut self, update: F)
    where
        F: FnOnce(&mut T),
    {
        let mut value = self.value.clone();
        update(&mut value);
        self.set(value);
    }

    /// Publisher of the values written from now on.
    pub fn publisher(&self) -> PublishedPublisher<T> {
        PublishedPublisher {
            subject: self.subject.get_or_init(PassthroughSubject::new).clone(),
        }
    }

    /// Give up the value. Attached subscribers receive nothing more, and are
    /// released once no [`PublishedPublisher`] handle is left.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T> Default for Published<T>
where
    T: Clone + Default + Send + 'static,
{
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Published<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Published")
            .field("value", &self.value)
            .field("observed", &self.subject.get().is_some())
            .finish()
    }
}

/// Publisher handed out by [`Published::publisher`]. Cheap to clone; every
/// clone observes the same field.
pub struct PublishedPublisher<T> {
    subject: PassthroughSubject<T>,
}

impl<T> Publisher for PublishedPublisher<T>
where
    T: Clone + Send + 'static,
{
    type Output = T;
    type Failure = Never;

    fn subscribe<S>(&self, subscriber: S)
    where
        S: Subscriber<Input = T, Failure = Never> + Send + 'static,
    {
        self.subject.subscribe(subscriber);
    }
}

impl<T> Clone for PublishedPublisher<T> {
    fn clone(&self) -> Self {
        Self {
            subject: self.subject.clone(),
        }
    }
}

impl<T> fmt::Debug for PublishedPublisher<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublishedPublisher")
            .field("subject", &self.subject)
            .finish()
    }
}
