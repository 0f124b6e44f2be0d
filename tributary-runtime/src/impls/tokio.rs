// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![cfg(feature = "runtime-tokio")]

use crate::clock::process_origin;
use crate::scheduler::effective_interval;
use crate::{Instant, ScheduledHandle, Scheduler, Stride};
use futures::future::{select, Either};
use std::pin::pin;
use tokio::runtime::Handle;
use tokio::time::MissedTickBehavior;
use tributary_error::{Result, TributaryError};

/// Schedules work as tasks on a tokio runtime.
///
/// Time is read from tokio's clock, so paused test runtimes
/// (`start_paused`) see virtual time through [`Scheduler::now`] as well.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    handle: Handle,
    minimum_tolerance: Stride,
}

impl TokioScheduler {
    /// Timer granularity of the tokio time driver.
    pub const DEFAULT_MINIMUM_TOLERANCE: Stride = Stride::milliseconds(1);

    /// Spawn onto the runtime behind `handle`.
    #[must_use]
    pub fn new(handle: Handle) -> Self {
        Self {
            handle,
            minimum_tolerance: Self::DEFAULT_MINIMUM_TOLERANCE,
        }
    }

    /// Spawn onto the runtime the caller is running in.
    ///
    /// # Errors
    ///
    /// Returns `TributaryError::SchedulerUnavailable` when called outside a
    /// tokio runtime.
    pub fn try_current() -> Result<Self> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|err| TributaryError::scheduler_unavailable(err.to_string()))
    }

    /// Override the advertised minimum tolerance.
    #[must_use]
    pub fn with_minimum_tolerance(mut self, tolerance: Stride) -> Self {
        self.minimum_tolerance = tolerance;
        self
    }

    fn tokio_origin() -> tokio::time::Instant {
        tokio::time::Instant::from_std(process_origin())
    }
}

impl Scheduler for TokioScheduler {
    fn now(&self) -> Instant {
        let elapsed = tokio::time::Instant::now().saturating_duration_since(Self::tokio_origin());
        Instant::from_nanos(u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX))
    }

    fn minimum_tolerance(&self) -> Stride {
        self.minimum_tolerance
    }

    fn schedule<F>(&self, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.handle.spawn(async move { action() });
    }

    fn schedule_after<F>(&self, delay: Stride, _tolerance: Stride, action: F) -> ScheduledHandle
    where
        F: FnOnce() + Send + 'static,
    {
        let handle = ScheduledHandle::new();
        let token = handle.token();
        let delay = delay.clamped_duration();
        debug!(delay = ?delay, "scheduling delayed work on tokio");

        self.handle.spawn(async move {
            let sleep = pin!(tokio::time::sleep(delay));
            let cancelled = pin!(token.cancelled());
            if let Either::Left(_) = select(sleep, cancelled).await {
                if !token.is_cancelled() {
                    action();
                }
            }
        });
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
        debug!(period = ?period, "scheduling repeating work on tokio");

        self.handle.spawn(async move {
            let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                let tick = pin!(ticker.tick());
                let cancelled = pin!(token.cancelled());
                match select(tick, cancelled).await {
                    Either::Left(_) if !token.is_cancelled() => action(),
                    _ => break,
                }
            }
            trace!("repeating work stopped");
        });
        handle
    }
}
