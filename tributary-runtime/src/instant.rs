// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Monotonic time points.
//!
//! An [`Instant`] is an unsigned nanosecond count read from some monotonic
//! [`Clock`](crate::Clock). Instants are only comparable with instants from
//! the same clock within the same run.
//!
//! On the wire an instant is a single-field object:
//!
//! ```
//! use tributary_runtime::Instant;
//!
//! let json = serde_json::to_string(&Instant::from_nanos(42)).unwrap();
//! assert_eq!(json, r#"{"value":42}"#);
//! ```

use crate::Stride;
use core::fmt;
use serde::{Deserialize, Serialize};

/// A point on a monotonic nanosecond timeline.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Instant {
    value: u64,
}

impl Instant {
    /// The start of the timeline.
    pub const ZERO: Self = Self { value: 0 };

    /// The last representable point.
    pub const MAX: Self = Self { value: u64::MAX };

    #[must_use]
    pub const fn from_nanos(value: u64) -> Self {
        Self { value }
    }

    /// The raw nanosecond count.
    #[must_use]
    pub const fn as_nanos(self) -> u64 {
        self.value
    }

    /// The stride from `self` to `other`, that is `other - self`.
    ///
    /// Distances longer than `i64::MAX` nanoseconds saturate.
    ///
    /// # Panics
    ///
    /// Panics if `other` is earlier than `self`: the difference is computed
    /// on the unsigned counters and has no representation. Kept for
    /// compatibility with timelines that rely on it; use
    /// [`signed_distance`](Self::signed_distance) when `other` may precede
    /// `self`.
    #[must_use]
    pub fn distance(self, other: Self) -> Stride {
        let Some(nanos) = other.value.checked_sub(self.value) else {
            panic!(
                "instant distance underflow: {} precedes {}",
                other.value, self.value
            );
        };
        Stride::nanoseconds(i64::try_from(nanos).unwrap_or(i64::MAX))
    }

    /// The stride from `self` to `other`, negative when `other` is earlier.
    ///
    /// Never panics; saturates at the `i64` range.
    #[must_use]
    pub fn signed_distance(self, other: Self) -> Stride {
        let delta = i128::from(other.value) - i128::from(self.value);
        let nanos = i64::try_from(delta).unwrap_or(if delta < 0 { i64::MIN } else { i64::MAX });
        Stride::nanoseconds(nanos)
    }

    /// The instant `stride` away from `self`, saturating at both ends of the
    /// timeline.
    #[must_use]
    pub const fn advanced(self, stride: Stride) -> Self {
        Self {
            value: self.value.saturating_add_signed(stride.as_nanos()),
        }
    }

    /// The instant `stride` away from `self`, or `None` if it falls off
    /// either end of the timeline.
    #[must_use]
    pub const fn checked_advanced(self, stride: Stride) -> Option<Self> {
        match self.value.checked_add_signed(stride.as_nanos()) {
            Some(value) => Some(Self { value }),
            None => None,
        }
    }
}

impl From<u64> for Instant {
    fn from(value: u64) -> Self {
        Self::from_nanos(value)
    }
}

impl From<Instant> for u64 {
    fn from(instant: Instant) -> Self {
        instant.value
    }
}

impl core::ops::Add<Stride> for Instant {
    type Output = Self;

    fn add(self, rhs: Stride) -> Self {
        self.advanced(rhs)
    }
}

impl core::ops::Sub<Stride> for Instant {
    type Output = Self;

    fn sub(self, rhs: Stride) -> Self {
        self.advanced(-rhs)
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ns", self.value)
    }
}
