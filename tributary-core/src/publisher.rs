// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{AnySubscriber, Subscriber};
use std::fmt;
use std::sync::Arc;

/// Producer side of the demand protocol.
///
/// `subscribe` hands the subscriber a [`Subscription`](crate::Subscription)
/// through `receive_subscription` before any value is delivered. Values
/// then flow only against demand the subscriber granted, followed by at
/// most one terminal event.
pub trait Publisher {
    /// Type of the values this publisher produces.
    type Output;

    /// Type of the failure this publisher may terminate with.
    type Failure;

    /// Attach `subscriber` to this publisher.
    fn subscribe<S>(&self, subscriber: S)
    where
        S: Subscriber<Input = Self::Output, Failure = Self::Failure> + Send + 'static;
}

type SubscribeFn<T, E> = dyn Fn(AnySubscriber<T, E>) + Send + Sync;

/// Type-erased publisher.
///
/// Lets publishers of different concrete types but the same
/// `Output`/`Failure` pair live in one collection. Cheap to clone.
///
/// ```
/// use tributary_core::{AnyPublisher, Just, PublisherExt, Sequence};
///
/// let publishers: Vec<AnyPublisher<i32, _>> = vec![
///     Just::new(1).erase(),
///     Sequence::new(vec![2, 3]).erase(),
/// ];
/// assert_eq!(publishers.len(), 2);
/// ```
pub struct AnyPublisher<T, E> {
    subscribe: Arc<SubscribeFn<T, E>>,
}

impl<T: 'static, E: 'static> AnyPublisher<T, E> {
    /// Erase the concrete type of `publisher`.
    pub fn new<P>(publisher: P) -> Self
    where
        P: Publisher<Output = T, Failure = E> + Send + Sync + 'static,
    {
        Self {
            subscribe: Arc::new(move |subscriber: AnySubscriber<T, E>| {
                publisher.subscribe(subscriber);
            }),
        }
    }
}

impl<T: 'static, E: 'static> Publisher for AnyPublisher<T, E> {
    type Output = T;
    type Failure = E;

    fn subscribe<S>(&self, subscriber: S)
    where
        S: Subscriber<Input = T, Failure = E> + Send + 'static,
    {
        (self.subscribe)(Box::new(subscriber));
    }
}

impl<T, E> Clone for AnyPublisher<T, E> {
    fn clone(&self) -> Self {
        Self {
            subscribe: Arc::clone(&self.subscribe),
        }
    }
}

impl<T, E> fmt::Debug for AnyPublisher<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AnyPublisher")
    }
}
