// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{Clock, Instant, MonotonicClock, ScheduledHandle, Scheduler, Stride};

/// Runs every action synchronously on the calling thread.
///
/// Delays are ignored and repeating work runs exactly once, so the returned
/// handles only ever observe finished work.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateScheduler;

impl Scheduler for ImmediateScheduler {
    fn now(&self) -> Instant {
        MonotonicClock.now()
    }

    fn minimum_tolerance(&self) -> Stride {
        Stride::ZERO
    }

    fn schedule<F>(&self, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        action();
    }

    fn schedule_after<F>(&self, _delay: Stride, _tolerance: Stride, action: F) -> ScheduledHandle
    where
        F: FnOnce() + Send + 'static,
    {
        action();
        ScheduledHandle::new()
    }

    fn schedule_repeating<F>(
        &self,
        _interval: Stride,
        _tolerance: Stride,
        mut action: F,
    ) -> ScheduledHandle
    where
        F: FnMut() + Send + 'static,
    {
        action();
        ScheduledHandle::new()
    }
}
