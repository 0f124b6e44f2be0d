// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{Completion, EmptySubscription, Publisher, Subscriber};
use core::marker::PhantomData;
use std::fmt;

/// Terminates every subscriber with the same failure, without values.
pub struct Fail<T, E> {
    failure: E,
    _output: PhantomData<fn() -> T>,
}

impl<T, E> Fail<T, E> {
    /// Fail each subscriber with `failure`.
    pub const fn new(failure: E) -> Self {
        Self {
            failure,
            _output: PhantomData,
        }
    }

    /// The failure delivered to subscribers.
    pub const fn failure(&self) -> &E {
        &self.failure
    }
}

impl<T, E: Clone> Publisher for Fail<T, E> {
    type Output = T;
    type Failure = E;

    fn subscribe<S>(&self, mut subscriber: S)
    where
        S: Subscriber<Input = T, Failure = E> + Send + 'static,
    {
        subscriber.receive_subscription(EmptySubscription::shared());
        subscriber.receive_completion(Completion::Failure(self.failure.clone()));
    }
}

impl<T, E: Clone> Clone for Fail<T, E> {
    fn clone(&self) -> Self {
        Self::new(self.failure.clone())
    }
}

impl<T, E: fmt::Debug> fmt::Debug for Fail<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fail").field("failure", &self.failure).finish()
    }
}
