// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::sequence::SequenceSubscription;
use crate::{Never, Publisher, Subscriber};
use std::sync::Arc;

/// Publishes a single value on the first positive demand, then finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Just<T> {
    value: T,
}

impl<T> Just<T> {
    /// Publish `value` once per subscriber.
    pub const fn new(value: T) -> Self {
        Self { value }
    }

    /// The value this publisher emits.
    pub const fn value(&self) -> &T {
        &self.value
    }
}

impl<T> Publisher for Just<T>
where
    T: Clone + Send + 'static,
{
    type Output = T;
    type Failure = Never;

    fn subscribe<S>(&self, subscriber: S)
    where
        S: Subscriber<Input = T, Failure = Never> + Send + 'static,
    {
        let items = core::iter::once(self.value.clone()).peekable();
        let subscription = Arc::new(SequenceSubscription::new(items));
        subscription.attach(Box::new(subscriber));
    }
}
