// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{
    AnySubscriber, AnySubscription, Completion, Demand, EmptySubscription, Never, Publisher,
    Subscriber, Subscription,
};
use core::iter::Peekable;
use core::marker::PhantomData;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// Cold publisher that replays the items of a collection to each subscriber,
/// strictly against demand, then finishes.
///
/// An empty collection finishes right after the subscription is handed out,
/// without waiting for demand.
///
/// ```
/// use tributary_core::{PublisherExt, Sequence};
/// use std::sync::{Arc, Mutex};
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink_seen = Arc::clone(&seen);
/// let _cancellable = Sequence::new(vec![1, 2, 3])
///     .sink(move |value| sink_seen.lock().unwrap().push(value));
///
/// assert_eq!(*seen.lock().unwrap(), vec![1, 2, 3]);
/// ```
pub struct Sequence<I, E = Never> {
    items: I,
    _failure: PhantomData<fn() -> E>,
}

impl<I> Sequence<I>
where
    I: IntoIterator + Clone,
{
    /// Publish the items of `items`.
    pub fn new(items: I) -> Self {
        Self {
            items,
            _failure: PhantomData,
        }
    }
}

impl<I, E> Sequence<I, E> {
    /// Retype the failure so the sequence can feed subscribers that expect `F`.
    pub fn set_failure_type<F>(self) -> Sequence<I, F> {
        Sequence {
            items: self.items,
            _failure: PhantomData,
        }
    }
}

impl<I, E> Publisher for Sequence<I, E>
where
    I: IntoIterator + Clone,
    I::IntoIter: Send + 'static,
    I::Item: Send + 'static,
    E: Send + 'static,
{
    type Output = I::Item;
    type Failure = E;

    fn subscribe<S>(&self, subscriber: S)
    where
        S: Subscriber<Input = I::Item, Failure = E> + Send + 'static,
    {
        let mut items = self.items.clone().into_iter().peekable();
        let mut subscriber = subscriber;
        if items.peek().is_none() {
            subscriber.receive_subscription(EmptySubscription::shared());
            subscriber.receive_completion(Completion::Finished);
            return;
        }

        let subscription = Arc::new(SequenceSubscription::new(items));
        subscription.attach(Box::new(subscriber));
    }
}

impl<I: Clone, E> Clone for Sequence<I, E> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            _failure: PhantomData,
        }
    }
}

impl<I: fmt::Debug, E> fmt::Debug for Sequence<I, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence").field("items", &self.items).finish()
    }
}

struct SequenceState<It: Iterator, E> {
    items: Peekable<It>,
    demand: Demand,
    downstream: Option<AnySubscriber<It::Item, E>>,
    delivering: bool,
    terminated: bool,
}

/// Drives one subscriber through the items.
///
/// `delivering` turns a re-entrant `request` made from inside `receive`
/// into a demand update that the running loop picks up, so a subscriber
/// that replenishes one-for-one never deepens the call stack.
pub(crate) struct SequenceSubscription<It: Iterator, E> {
    state: Mutex<SequenceState<It, E>>,
}

impl<It, E> SequenceSubscription<It, E>
where
    It: Iterator + Send + 'static,
    It::Item: Send + 'static,
    E: Send + 'static,
{
    pub(crate) fn new(items: Peekable<It>) -> Self {
        Self {
            state: Mutex::new(SequenceState {
                items,
                demand: Demand::NONE,
                downstream: None,
                delivering: true,
                terminated: false,
            }),
        }
    }

    pub(crate) fn attach(self: &Arc<Self>, mut subscriber: AnySubscriber<It::Item, E>) {
        subscriber.receive_subscription(Arc::clone(self) as AnySubscription);

        let mut state = self.state.lock();
        state.delivering = false;
        if state.terminated {
            drop(state);
            drop(subscriber);
            return;
        }
        state.downstream = Some(subscriber);
        drop(state);
        self.pump();
    }

    fn pump(&self) {
        let mut state = self.state.lock();
        if state.delivering {
            return;
        }
        state.delivering = true;

        while !state.terminated && !state.demand.is_zero() {
            let Some(value) = state.items.next() else {
                break;
            };
            let Some(mut downstream) = state.downstream.take() else {
                break;
            };
            state.demand -= 1;
            drop(state);

            let more = downstream.receive(value);

            state = self.state.lock();
            if state.terminated {
                // Cancelled from inside `receive`
                drop(state);
                drop(downstream);
                state = self.state.lock();
                break;
            }
            state.demand += more;

            if state.items.peek().is_none() {
                state.terminated = true;
                drop(state);
                downstream.receive_completion(Completion::Finished);
                drop(downstream);
                state = self.state.lock();
                break;
            }
            state.downstream = Some(downstream);
        }

        state.delivering = false;
    }
}

impl<It, E> Subscription for SequenceSubscription<It, E>
where
    It: Iterator + Send + 'static,
    It::Item: Send + 'static,
    E: Send + 'static,
{
    fn request(&self, demand: Demand) {
        {
            let mut state = self.state.lock();
            if state.terminated {
                return;
            }
            state.demand += demand;
        }
        self.pump();
    }

    fn cancel(&self) {
        let downstream = {
            let mut state = self.state.lock();
            state.terminated = true;
            state.downstream.take()
        };
        drop(downstream);
    }
}
