// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{AnyCancellable, AnySubscription, Completion, Demand, Subscriber, Subscription};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Default)]
struct SinkLink {
    cancelled: bool,
    subscription: Option<AnySubscription>,
}

/// Subscriber that requests unbounded demand and forwards everything to
/// closures.
///
/// Built through [`PublisherExt::sink`](crate::PublisherExt::sink) or
/// [`PublisherExt::sink_with_completion`](crate::PublisherExt::sink_with_completion),
/// which also hand back the [`AnyCancellable`] controlling the link.
pub struct Sink<T, E, V, C> {
    receive_value: V,
    receive_completion: Option<C>,
    link: Arc<Mutex<SinkLink>>,
    _marker: core::marker::PhantomData<fn(T, E)>,
}

impl<T, E, V, C> Sink<T, E, V, C>
where
    V: FnMut(T) + Send + 'static,
    C: FnOnce(Completion<E>) + Send + 'static,
{
    /// Create the sink together with the handle that cancels it.
    pub fn new(receive_completion: C, receive_value: V) -> (Self, AnyCancellable) {
        let link = Arc::new(Mutex::new(SinkLink::default()));
        let handle_link = Arc::clone(&link);
        let cancellable = AnyCancellable::new(move || {
            let subscription = {
                let mut link = handle_link.lock();
                link.cancelled = true;
                link.subscription.take()
            };
            if let Some(subscription) = subscription {
                subscription.cancel();
            }
        });

        let sink = Self {
            receive_value,
            receive_completion: Some(receive_completion),
            link,
            _marker: core::marker::PhantomData,
        };
        (sink, cancellable)
    }
}

impl<T, E, V, C> Subscriber for Sink<T, E, V, C>
where
    V: FnMut(T) + Send + 'static,
    C: FnOnce(Completion<E>) + Send + 'static,
{
    type Input = T;
    type Failure = E;

    fn receive_subscription(&mut self, subscription: AnySubscription) {
        let cancelled = {
            let mut link = self.link.lock();
            if !link.cancelled {
                link.subscription = Some(Arc::clone(&subscription));
            }
            link.cancelled
        };

        if cancelled {
            subscription.cancel();
        } else {
            subscription.request(Demand::Unbounded);
        }
    }

    fn receive(&mut self, input: T) -> Demand {
        (self.receive_value)(input);
        Demand::NONE
    }

    fn receive_completion(&mut self, completion: Completion<E>) {
        self.link.lock().subscription = None;
        if let Some(receive_completion) = self.receive_completion.take() {
            receive_completion(completion);
        }
    }
}
