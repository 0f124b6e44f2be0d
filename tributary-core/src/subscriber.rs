// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{AnySubscription, Completion, Demand};

/// Receiver side of the demand protocol.
///
/// The call sequence a subscriber observes is always:
///
/// 1. `receive_subscription` exactly once,
/// 2. zero or more `receive`, never more than the demand it granted,
/// 3. at most one `receive_completion`.
///
/// The [`Demand`] returned from `receive` is added to the outstanding
/// demand after the delivered value has been accounted for, so returning
/// `Demand::NONE` keeps the current budget and returning `Demand::max(1)`
/// replaces the value just consumed.
pub trait Subscriber {
    /// Type of the values this subscriber accepts.
    type Input;

    /// Type of the failure this subscriber accepts.
    type Failure;

    /// Called once, before anything else, with the link to the publisher.
    fn receive_subscription(&mut self, subscription: AnySubscription);

    /// Called for each value. Returns the additional demand.
    fn receive(&mut self, input: Self::Input) -> Demand;

    /// Called once when the stream terminates.
    fn receive_completion(&mut self, completion: Completion<Self::Failure>);
}

/// Boxed subscriber, used where heterogeneous subscribers share a collection.
pub type AnySubscriber<T, E> = Box<dyn Subscriber<Input = T, Failure = E> + Send>;

impl<S: Subscriber + ?Sized> Subscriber for Box<S> {
    type Input = S::Input;
    type Failure = S::Failure;

    fn receive_subscription(&mut self, subscription: AnySubscription) {
        (**self).receive_subscription(subscription);
    }

    fn receive(&mut self, input: Self::Input) -> Demand {
        (**self).receive(input)
    }

    fn receive_completion(&mut self, completion: Completion<Self::Failure>) {
        (**self).receive_completion(completion);
    }
}
