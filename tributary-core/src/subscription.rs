// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::Demand;
use std::sync::Arc;

/// The live link between one publisher and one subscriber.
///
/// A subscriber receives its subscription in
/// [`Subscriber::receive_subscription`](crate::Subscriber::receive_subscription)
/// and uses it to grant demand or to stop the stream.
///
/// Both methods must be no-ops once the subscription has terminated, and
/// `cancel` must be idempotent. Implementations may deliver values
/// synchronously from inside `request`.
pub trait Subscription: Send + Sync {
    /// Grant `demand` more values. Added with saturating arithmetic.
    fn request(&self, demand: Demand);

    /// Stop delivery and release the subscriber.
    fn cancel(&self);
}

/// Shared, type-erased subscription handle.
pub type AnySubscription = Arc<dyn Subscription>;

impl<S: Subscription + ?Sized> Subscription for Arc<S> {
    fn request(&self, demand: Demand) {
        (**self).request(demand);
    }

    fn cancel(&self) {
        (**self).cancel();
    }
}

/// A subscription that never delivers anything.
///
/// Handed to subscribers that attach to an already terminated publisher,
/// right before the terminal event.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptySubscription;

impl EmptySubscription {
    /// Returns the empty subscription as a shared handle.
    #[must_use]
    pub fn shared() -> AnySubscription {
        Arc::new(Self)
    }
}

impl Subscription for EmptySubscription {
    fn request(&self, _demand: Demand) {}

    fn cancel(&self) {}
}
