// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tributary_core::{AnySubscription, Completion, Demand, Subscriber, Subscription};

/// One callback observed by a [`TrackingSubscriber`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<T, E> {
    /// `receive_subscription` was called.
    Subscription,
    /// `receive` was called with this value.
    Value(T),
    /// `receive_completion` was called.
    Completion(Completion<E>),
}

type ReceiveFn<T> = Box<dyn FnMut(&T, &AnySubscription) -> Demand + Send>;

struct Tracking<T, E> {
    history: Vec<Event<T, E>>,
    subscription: Option<AnySubscription>,
    initial_demand: Option<Demand>,
    receive: Option<ReceiveFn<T>>,
}

/// Subscriber that records every callback and follows a scripted demand.
///
/// Clones share the same history, so a test keeps one clone as a handle
/// and gives the other to the publisher.
///
/// ```
/// use tributary_core::{Demand, PassthroughSubject, Publisher, Subject};
/// use tributary_test_utils::{Event, TrackingSubscriber};
///
/// let subject = PassthroughSubject::<i32>::new();
/// let tracker = TrackingSubscriber::new().with_initial_demand(Demand::max(1));
/// subject.subscribe(tracker.clone());
///
/// subject.send(1);
/// subject.send(2);
///
/// assert_eq!(tracker.history(), vec![Event::Subscription, Event::Value(1)]);
/// ```
pub struct TrackingSubscriber<T, E = tributary_core::Never> {
    inner: Arc<Mutex<Tracking<T, E>>>,
}

impl<T, E> TrackingSubscriber<T, E> {
    /// A subscriber that requests nothing on its own.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Tracking {
                history: Vec::new(),
                subscription: None,
                initial_demand: None,
                receive: None,
            })),
        }
    }

    /// Request `demand` as soon as the subscription arrives.
    #[must_use]
    pub fn with_initial_demand(self, demand: Demand) -> Self {
        self.inner.lock().initial_demand = Some(demand);
        self
    }

    /// Decide the demand returned for each value. The closure also gets the
    /// subscription, so it can cancel or request from inside delivery.
    #[must_use]
    pub fn with_receive<F>(self, receive: F) -> Self
    where
        F: FnMut(&T, &AnySubscription) -> Demand + Send + 'static,
    {
        self.inner.lock().receive = Some(Box::new(receive));
        self
    }

    /// Every callback so far, in order.
    #[must_use]
    pub fn history(&self) -> Vec<Event<T, E>>
    where
        T: Clone,
        E: Clone,
    {
        self.inner.lock().history.clone()
    }

    /// The values received so far, in order.
    #[must_use]
    pub fn values(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.inner
            .lock()
            .history
            .iter()
            .filter_map(|event| match event {
                Event::Value(value) => Some(value.clone()),
                _ => None,
            })
            .collect()
    }

    /// The terminal events received so far.
    #[must_use]
    pub fn completions(&self) -> Vec<Completion<E>>
    where
        E: Clone,
    {
        self.inner
            .lock()
            .history
            .iter()
            .filter_map(|event| match event {
                Event::Completion(completion) => Some(completion.clone()),
                _ => None,
            })
            .collect()
    }

    /// The subscription handed over by the publisher, if any.
    #[must_use]
    pub fn subscription(&self) -> Option<AnySubscription> {
        self.inner.lock().subscription.clone()
    }

    /// Request more values through the recorded subscription.
    ///
    /// # Panics
    ///
    /// Panics if no subscription has been received yet.
    pub fn request(&self, demand: Demand) {
        self.expect_subscription().request(demand);
    }

    /// Cancel the recorded subscription.
    ///
    /// # Panics
    ///
    /// Panics if no subscription has been received yet.
    pub fn cancel(&self) {
        self.expect_subscription().cancel();
    }

    fn expect_subscription(&self) -> AnySubscription {
        self.subscription()
            .expect("tracking subscriber has not received a subscription")
    }
}

impl<T, E> Subscriber for TrackingSubscriber<T, E> {
    type Input = T;
    type Failure = E;

    fn receive_subscription(&mut self, subscription: AnySubscription) {
        let initial_demand = {
            let mut tracking = self.inner.lock();
            tracking.history.push(Event::Subscription);
            tracking.subscription = Some(Arc::clone(&subscription));
            tracking.initial_demand
        };
        if let Some(demand) = initial_demand {
            subscription.request(demand);
        }
    }

    fn receive(&mut self, input: T) -> Demand {
        let (receive, subscription) = {
            let mut tracking = self.inner.lock();
            let receive = tracking.receive.take();
            let subscription = tracking.subscription.clone();
            (receive, subscription)
        };

        // Run the script without holding the lock, it may call back into a publisher
        let (demand, receive) = match (receive, subscription) {
            (Some(mut receive), Some(subscription)) => {
                (receive(&input, &subscription), Some(receive))
            }
            (receive, _) => (Demand::NONE, receive),
        };

        let mut tracking = self.inner.lock();
        tracking.history.push(Event::Value(input));
        if tracking.receive.is_none() {
            tracking.receive = receive;
        }
        demand
    }

    fn receive_completion(&mut self, completion: Completion<E>) {
        self.inner
            .lock()
            .history
            .push(Event::Completion(completion));
    }
}

impl<T, E> Clone for TrackingSubscriber<T, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, E> Default for TrackingSubscriber<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, E: fmt::Debug> fmt::Debug for TrackingSubscriber<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackingSubscriber")
            .field("history", &self.inner.lock().history)
            .finish()
    }
}
