// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![cfg(feature = "runtime-smol")]

use crate::scheduler::effective_interval;
use crate::{Clock, Instant, MonotonicClock, ScheduledHandle, Scheduler, Stride};
use async_io::Timer;
use futures::future::{select, Either};
use futures::StreamExt;
use std::pin::pin;

/// Schedules work as detached tasks on smol's global executor, timed by
/// `async-io`.
#[derive(Debug, Clone, Copy)]
pub struct SmolScheduler {
    minimum_tolerance: Stride,
}

impl SmolScheduler {
    pub const DEFAULT_MINIMUM_TOLERANCE: Stride = Stride::milliseconds(1);

    #[must_use]
    pub const fn new() -> Self {
        Self {
            minimum_tolerance: Self::DEFAULT_MINIMUM_TOLERANCE,
        }
    }

    /// Override the advertised minimum tolerance.
    #[must_use]
    pub const fn with_minimum_tolerance(self, tolerance: Stride) -> Self {
        Self {
            minimum_tolerance: tolerance,
        }
    }
}

impl Default for SmolScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for SmolScheduler {
    fn now(&self) -> Instant {
        MonotonicClock.now()
    }

    fn minimum_tolerance(&self) -> Stride {
        self.minimum_tolerance
    }

    fn schedule<F>(&self, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        smol::spawn(async move { action() }).detach();
    }

    fn schedule_after<F>(&self, delay: Stride, _tolerance: Stride, action: F) -> ScheduledHandle
    where
        F: FnOnce() + Send + 'static,
    {
        let handle = ScheduledHandle::new();
        let token = handle.token();
        let delay = delay.clamped_duration();
        debug!(delay = ?delay, "scheduling delayed work on smol");

        smol::spawn(async move {
            let timer = pin!(Timer::after(delay));
            let cancelled = pin!(token.cancelled());
            if let Either::Left(_) = select(timer, cancelled).await {
                if !token.is_cancelled() {
                    action();
                }
            }
        })
        .detach();
        handle
    }

    fn schedule_repeating<F>(
        &self,
        interval: Stride,
        _tolerance: Stride,
        mut action: F,
    ) -> ScheduledHandle
    where
        F: FnMut() + Send + 'static,
    {
        let handle = ScheduledHandle::new();
        let token = handle.token();
        let period = effective_interval(interval).clamped_duration();
        debug!(period = ?period, "scheduling repeating work on smol");

        smol::spawn(async move {
            let mut ticker = Timer::interval(period);
            loop {
                let tick = ticker.next();
                let cancelled = pin!(token.cancelled());
                match select(tick, cancelled).await {
                    Either::Left((Some(_), _)) if !token.is_cancelled() => action(),
                    _ => break,
                }
            }
            trace!("repeating work stopped");
        })
        .detach();
        handle
    }
}
