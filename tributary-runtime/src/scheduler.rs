// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{Instant, Stride};
use tributary_core::{AnyCancellable, Cancellable, CancellationToken};

/// Runs closures now, after a delay, or periodically.
///
/// Timers fire no earlier than requested. `tolerance` states how much
/// lateness the caller accepts; implementations never fire early to honour
/// it, and a tolerance below [`minimum_tolerance`](Self::minimum_tolerance)
/// is treated as that minimum.
///
/// Cancelling the returned [`ScheduledHandle`] suppresses future firings.
/// It never interrupts an action that is already running.
pub trait Scheduler: Send + Sync {
    /// The scheduler's current time.
    fn now(&self) -> Instant;

    /// The smallest lateness the backing timer can honour.
    fn minimum_tolerance(&self) -> Stride;

    /// Run `action` as soon as possible.
    fn schedule<F>(&self, action: F)
    where
        F: FnOnce() + Send + 'static;

    /// Run `action` once, `delay` from now. A negative delay means "now".
    fn schedule_after<F>(&self, delay: Stride, tolerance: Stride, action: F) -> ScheduledHandle
    where
        F: FnOnce() + Send + 'static;

    /// Run `action` every `interval`, first one `interval` from now, until
    /// the handle is cancelled. Intervals shorter than one nanosecond are
    /// raised to one nanosecond.
    fn schedule_repeating<F>(
        &self,
        interval: Stride,
        tolerance: Stride,
        action: F,
    ) -> ScheduledHandle
    where
        F: FnMut() + Send + 'static;
}

/// Smallest interval accepted for repeating work.
pub(crate) fn effective_interval(interval: Stride) -> Stride {
    interval.max(Stride::nanoseconds(1))
}

/// Handle to scheduled work.
///
/// Dropping the handle does not cancel the work; convert it with
/// [`into_cancellable`](Self::into_cancellable) for cancel-on-drop.
#[derive(Debug, Clone, Default)]
pub struct ScheduledHandle {
    token: CancellationToken,
}

impl ScheduledHandle {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Suppress every future firing. Idempotent.
    pub fn cancel(&self) {
        if !self.token.is_cancelled() {
            trace!("scheduled work cancelled");
        }
        self.token.cancel();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Cancel the work when the returned value is dropped.
    #[must_use]
    pub fn into_cancellable(self) -> AnyCancellable {
        AnyCancellable::from_cancellable(self)
    }
}

impl Cancellable for ScheduledHandle {
    fn cancel(&self) {
        ScheduledHandle::cancel(self);
    }
}
