// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{
    AnyCancellable, AnyPublisher, AnySubscription, Completion, Demand, Publisher, Sink, Subject,
    Subscriber, Subscription,
};
use parking_lot::Mutex;
use std::sync::Arc;

/// Convenience methods available on every [`Publisher`].
pub trait PublisherExt: Publisher {
    /// Attach a subscriber with unbounded demand that calls `receive_value`
    /// for every value and ignores the terminal event.
    ///
    /// Values stop flowing when the returned handle is cancelled or dropped.
    fn sink<V>(&self, receive_value: V) -> AnyCancellable
    where
        V: FnMut(Self::Output) + Send + 'static,
        Self::Output: 'static,
        Self::Failure: 'static,
    {
        self.sink_with_completion(|_| {}, receive_value)
    }

    /// Like [`sink`](Self::sink), also observing the terminal event.
    fn sink_with_completion<C, V>(&self, receive_completion: C, receive_value: V) -> AnyCancellable
    where
        C: FnOnce(Completion<Self::Failure>) + Send + 'static,
        V: FnMut(Self::Output) + Send + 'static,
        Self::Output: 'static,
        Self::Failure: 'static,
    {
        let (sink, cancellable) = Sink::new(receive_completion, receive_value);
        self.subscribe(sink);
        cancellable
    }

    /// Erase the concrete publisher type.
    fn erase(self) -> AnyPublisher<Self::Output, Self::Failure>
    where
        Self: Sized + Send + Sync + 'static,
        Self::Output: 'static,
        Self::Failure: 'static,
    {
        AnyPublisher::new(self)
    }

    /// Forward every value and the terminal event of this publisher into
    /// `subject`, with unbounded demand.
    fn subscribe_subject<S>(&self, subject: S) -> AnyCancellable
    where
        S: Subject<Output = Self::Output, Failure = Self::Failure> + Send + 'static,
    {
        let link: Arc<Mutex<SubjectLink>> = Arc::default();
        let handle_link = Arc::clone(&link);
        self.subscribe(SubjectSubscriber { subject, link });

        AnyCancellable::new(move || {
            let subscription = {
                let mut link = handle_link.lock();
                link.cancelled = true;
                link.upstream.take()
            };
            if let Some(subscription) = subscription {
                subscription.cancel();
            }
        })
    }
}

impl<P: Publisher + ?Sized> PublisherExt for P {}

#[derive(Default)]
struct SubjectLink {
    cancelled: bool,
    upstream: Option<AnySubscription>,
}

struct SubjectSubscriber<S> {
    subject: S,
    link: Arc<Mutex<SubjectLink>>,
}

impl<S: Subject> Subscriber for SubjectSubscriber<S> {
    type Input = S::Output;
    type Failure = S::Failure;

    fn receive_subscription(&mut self, subscription: AnySubscription) {
        let cancelled = {
            let mut link = self.link.lock();
            if !link.cancelled {
                link.upstream = Some(Arc::clone(&subscription));
            }
            link.cancelled
        };

        if cancelled {
            subscription.cancel();
        } else {
            subscription.request(Demand::Unbounded);
        }
    }

    fn receive(&mut self, input: S::Output) -> Demand {
        self.subject.send(input);
        Demand::NONE
    }

    fn receive_completion(&mut self, completion: Completion<S::Failure>) {
        self.link.lock().upstream = None;
        self.subject.send_completion(completion);
    }
}
