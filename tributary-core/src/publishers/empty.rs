// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{Completion, EmptySubscription, Never, Publisher, Subscriber};
use core::marker::PhantomData;
use std::fmt;

/// Publishes no values. Finishes immediately unless built with
/// [`Empty::never`].
pub struct Empty<T, E = Never> {
    completes_immediately: bool,
    _marker: PhantomData<fn() -> (T, E)>,
}

impl<T, E> Empty<T, E> {
    /// A publisher that finishes as soon as it is subscribed to.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            completes_immediately: true,
            _marker: PhantomData,
        }
    }

    /// A publisher that never emits anything, not even completion.
    #[must_use]
    pub const fn never() -> Self {
        Self {
            completes_immediately: false,
            _marker: PhantomData,
        }
    }
}

impl<T, E> Publisher for Empty<T, E> {
    type Output = T;
    type Failure = E;

    fn subscribe<S>(&self, mut subscriber: S)
    where
        S: Subscriber<Input = T, Failure = E> + Send + 'static,
    {
        subscriber.receive_subscription(EmptySubscription::shared());
        if self.completes_immediately {
            subscriber.receive_completion(Completion::Finished);
        }
    }
}

impl<T, E> Default for Empty<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> Clone for Empty<T, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, E> Copy for Empty<T, E> {}

impl<T, E> fmt::Debug for Empty<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Empty")
            .field("completes_immediately", &self.completes_immediately)
            .finish()
    }
}
