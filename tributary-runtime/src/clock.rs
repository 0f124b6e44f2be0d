// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{Instant, Stride};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

/// Source of monotonic nanosecond readings.
pub trait Clock: Send + Sync + 'static {
    /// Nanoseconds since the clock's origin. Never decreases.
    fn now_nanos(&self) -> u64;

    /// The current reading as an [`Instant`].
    fn now(&self) -> Instant {
        Instant::from_nanos(self.now_nanos())
    }
}

/// Host monotonic clock, measured from the first reading in the process.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

pub(crate) fn process_origin() -> std::time::Instant {
    static ORIGIN: OnceLock<std::time::Instant> = OnceLock::new();
    *ORIGIN.get_or_init(std::time::Instant::now)
}

impl Clock for MonotonicClock {
    fn now_nanos(&self) -> u64 {
        let elapsed = process_origin().elapsed().as_nanos();
        u64::try_from(elapsed).unwrap_or(u64::MAX)
    }
}

/// Clock that only moves when told to. Clones share the same reading.
///
/// ```
/// use tributary_runtime::{Clock, Instant, ManualClock, Stride};
///
/// let clock = ManualClock::new(Instant::from_nanos(10));
/// clock.advance(Stride::nanoseconds(5));
/// assert_eq!(clock.now(), Instant::from_nanos(15));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    nanos: Arc<AtomicU64>,
}

impl ManualClock {
    #[must_use]
    pub fn new(start: Instant) -> Self {
        Self {
            nanos: Arc::new(AtomicU64::new(start.as_nanos())),
        }
    }

    /// Move the clock forward. Backward strides are ignored so readings stay
    /// monotonic.
    pub fn advance(&self, stride: Stride) {
        if stride.is_negative() {
            return;
        }
        let delta = stride.magnitude();
        let _ = self
            .nanos
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |nanos| {
                Some(nanos.saturating_add(delta))
            });
    }

    /// Move the clock to `instant` if it is later than the current reading.
    pub fn set(&self, instant: Instant) {
        self.nanos.fetch_max(instant.as_nanos(), Ordering::AcqRel);
    }
}

impl Clock for ManualClock {
    fn now_nanos(&self) -> u64 {
        self.nanos.load(Ordering::Acquire)
    }
}
