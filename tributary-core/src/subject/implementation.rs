// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{
    AnySubscriber, AnySubscription, Completion, Demand, EmptySubscription, Subscriber,
    Subscription,
};
use parking_lot::{Mutex, MutexGuard};
use std::collections::VecDeque;
use std::sync::{Arc, Weak};

/// What a subject does with a value offered to a subscription without demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Replay {
    /// Drop it.
    Never,
    /// Keep the most recent one until demand arrives.
    Latest,
}

/// Work handed to the fan-out pass already running on the subject.
enum Queued<T, E> {
    Value(T),
    Terminal(Completion<E>),
}

pub(crate) struct BroadcastState<T, E> {
    pub(crate) conduits: Vec<Arc<Conduit<T, E>>>,
    pub(crate) terminal: Option<Completion<E>>,
    pub(crate) current: Option<T>,
    next_id: u64,
    sending: bool,
    queued: VecDeque<Queued<T, E>>,
}

/// Subscriber set and terminal state shared by every subject flavour.
pub(crate) struct Broadcast<T, E> {
    pub(crate) state: Mutex<BroadcastState<T, E>>,
    replay: Replay,
}

impl<T, E> Broadcast<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    pub(crate) fn new(replay: Replay, current: Option<T>) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(BroadcastState {
                conduits: Vec::new(),
                terminal: None,
                current,
                next_id: 0,
                sending: false,
                queued: VecDeque::new(),
            }),
            replay,
        })
    }

    pub(crate) fn subscribe<S>(self: &Arc<Self>, subscriber: S)
    where
        S: Subscriber<Input = T, Failure = E> + Send + 'static,
    {
        let mut subscriber: AnySubscriber<T, E> = Box::new(subscriber);

        let mut state = self.state.lock();
        if let Some(terminal) = state.terminal.clone() {
            drop(state);
            trace!("subject already terminated, replaying terminal event");
            subscriber.receive_subscription(EmptySubscription::shared());
            subscriber.receive_completion(terminal);
            return;
        }

        let id = state.next_id;
        state.next_id += 1;
        let replay = match self.replay {
            Replay::Latest => state.current.clone(),
            Replay::Never => None,
        };
        let conduit = Arc::new(Conduit::new(id, Arc::downgrade(self), self.replay, replay));
        state.conduits.push(Arc::clone(&conduit));
        drop(state);

        debug!(subscription = id, "subscriber attached");
        conduit.attach(subscriber);
    }

    /// Offer `value` to every attached subscription. Returns `false` if the
    /// subject already terminated.
    ///
    /// Only one fan-out pass runs at a time. A `send` or completion issued
    /// while a pass is running, from a subscriber callback or from another
    /// thread, is queued and delivered by that pass once it finishes the
    /// current value.
    pub(crate) fn send(&self, value: T) -> bool {
        let mut state = self.state.lock();
        if state.terminal.is_some() {
            return false;
        }
        if state.sending {
            state.queued.push_back(Queued::Value(value));
            return true;
        }
        state.sending = true;
        drop(state);

        self.fan_out(Queued::Value(value));
        true
    }

    /// Record `completion` and deliver it to every attached subscription.
    /// Returns `false` if a terminal event was already recorded.
    pub(crate) fn complete(&self, completion: Completion<E>) -> bool {
        let mut state = self.state.lock();
        if state.terminal.is_some() {
            return false;
        }
        state.terminal = Some(completion.clone());
        if state.sending {
            state.queued.push_back(Queued::Terminal(completion));
            return true;
        }
        state.sending = true;
        drop(state);

        self.fan_out(Queued::Terminal(completion));
        true
    }

    /// Deliver `first`, then everything queued behind it, in order.
    fn fan_out(&self, first: Queued<T, E>) {
        let mut next = Some(first);
        while let Some(item) = next {
            match item {
                Queued::Value(value) => {
                    let conduits = {
                        let mut state = self.state.lock();
                        if self.replay == Replay::Latest {
                            state.current = Some(value.clone());
                        }
                        state.conduits.clone()
                    };
                    // Iterate a snapshot so subscribers may cancel or attach mid fan-out
                    for conduit in conduits {
                        conduit.offer(value.clone());
                    }
                }
                Queued::Terminal(completion) => {
                    let conduits = std::mem::take(&mut self.state.lock().conduits);
                    debug!(subscribers = conduits.len(), "subject terminated");
                    for conduit in conduits {
                        conduit.complete(completion.clone());
                    }
                }
            }

            let mut state = self.state.lock();
            next = state.queued.pop_front();
            if next.is_none() {
                state.sending = false;
            }
        }
    }

    fn detach(&self, id: u64) {
        self.state.lock().conduits.retain(|conduit| conduit.id != id);
    }
}

impl<T, E> Drop for Broadcast<T, E> {
    fn drop(&mut self) {
        // Subscribers usually hold their own subscription, break that cycle
        let conduits = std::mem::take(&mut self.state.get_mut().conduits);
        for conduit in conduits {
            conduit.release();
        }
    }
}

enum Event<T, E> {
    Value(T),
    Terminal(Completion<E>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Active,
    Terminated,
    Cancelled,
}

struct ConduitState<T, E> {
    status: Status,
    demand: Demand,
    downstream: Option<AnySubscriber<T, E>>,
    pending: VecDeque<Event<T, E>>,
    held: Option<T>,
    delivering: bool,
}

impl<T, E> ConduitState<T, E> {
    /// Move a held value into the delivery queue once demand allows it.
    fn release_held(&mut self) {
        if self.status != Status::Active || self.demand.is_zero() {
            return;
        }
        if let Some(value) = self.held.take() {
            self.demand -= 1;
            self.pending.push_back(Event::Value(value));
        }
    }
}

/// One subscriber's link to a subject.
///
/// Delivery to the subscriber is serialized through `pending`: whoever
/// finds `delivering == false` becomes the deliverer and drains the queue,
/// everyone else (another thread, or the subscriber itself calling back
/// into the subject) only enqueues. The subscriber is moved out of the
/// state while its callbacks run so no lock is held across user code.
pub(crate) struct Conduit<T, E> {
    id: u64,
    parent: Weak<Broadcast<T, E>>,
    replay: Replay,
    state: Mutex<ConduitState<T, E>>,
}

impl<T, E> Conduit<T, E> {
    /// Stop delivery and drop the subscriber. Returns `false` if the
    /// conduit was already cancelled.
    fn release(&self) -> bool {
        let downstream = {
            let mut state = self.state.lock();
            if state.status == Status::Cancelled {
                return false;
            }
            state.status = Status::Cancelled;
            state.pending.clear();
            state.held = None;
            // A running deliverer drops the subscriber when its callback returns
            if state.delivering {
                None
            } else {
                state.downstream.take()
            }
        };
        drop(downstream);
        true
    }
}

impl<T, E> Conduit<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    fn new(id: u64, parent: Weak<Broadcast<T, E>>, replay: Replay, held: Option<T>) -> Self {
        Self {
            id,
            parent,
            replay,
            state: Mutex::new(ConduitState {
                status: Status::Active,
                demand: Demand::NONE,
                downstream: None,
                pending: VecDeque::new(),
                held,
                // Nothing is delivered until `attach` installs the subscriber
                delivering: true,
            }),
        }
    }

    fn attach(self: &Arc<Self>, mut subscriber: AnySubscriber<T, E>) {
        let subscription: AnySubscription = Arc::clone(self) as AnySubscription;
        subscriber.receive_subscription(subscription);

        let mut state = self.state.lock();
        state.delivering = false;
        if state.status == Status::Cancelled {
            drop(state);
            drop(subscriber);
            return;
        }
        state.downstream = Some(subscriber);
        state.release_held();
        self.drain(state);
    }

    fn offer(&self, value: T) {
        let mut state = self.state.lock();
        if state.status != Status::Active {
            return;
        }
        if state.demand.is_zero() {
            if self.replay == Replay::Latest {
                state.held = Some(value);
            }
            return;
        }
        state.demand -= 1;
        state.held = None;
        state.pending.push_back(Event::Value(value));
        self.drain(state);
    }

    fn complete(&self, completion: Completion<E>) {
        let mut state = self.state.lock();
        if state.status != Status::Active {
            return;
        }
        state.status = Status::Terminated;
        state.held = None;
        state.pending.push_back(Event::Terminal(completion));
        self.drain(state);
    }

    fn drain<'a>(&'a self, mut state: MutexGuard<'a, ConduitState<T, E>>) {
        if state.delivering {
            return;
        }
        state.delivering = true;

        while let Some(event) = state.pending.pop_front() {
            let Some(mut downstream) = state.downstream.take() else {
                state.pending.clear();
                break;
            };
            drop(state);

            let granted = match event {
                Event::Value(value) => Some(downstream.receive(value)),
                Event::Terminal(completion) => {
                    downstream.receive_completion(completion);
                    None
                }
            };

            state = self.state.lock();
            match granted {
                Some(more) if state.status != Status::Cancelled => {
                    state.demand += more;
                    state.downstream = Some(downstream);
                    state.release_held();
                }
                _ => {
                    // Cancelled or terminated: release the subscriber outside the lock
                    state.pending.clear();
                    drop(state);
                    drop(downstream);
                    state = self.state.lock();
                }
            }
        }

        state.delivering = false;
    }
}

impl<T, E> Subscription for Conduit<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    fn request(&self, demand: Demand) {
        let mut state = self.state.lock();
        if state.status != Status::Active {
            return;
        }
        state.demand += demand;
        state.release_held();
        self.drain(state);
    }

    fn cancel(&self) {
        if !self.release() {
            return;
        }
        if let Some(parent) = self.parent.upgrade() {
            parent.detach(self.id);
        }
        debug!(subscription = self.id, "subscription cancelled");
    }
}
