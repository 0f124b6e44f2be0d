// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::fmt;
use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use core::time::Duration;
use serde::{Deserialize, Serialize};

/// Signed distance between two [`Instant`](crate::Instant)s, in nanoseconds.
///
/// Also used for scheduling delays, intervals and tolerances. Constructors
/// and arithmetic saturate at the `i64` range.
///
/// ```
/// use tributary_runtime::Stride;
///
/// assert_eq!(Stride::microseconds(2), Stride::nanoseconds(2_000));
/// assert_eq!(Stride::nanoseconds(-220).to_string(), "-220ns");
/// assert_eq!(Stride::seconds(1).as_duration(), Some(std::time::Duration::from_secs(1)));
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Stride(i64);

impl Stride {
    /// No distance at all.
    pub const ZERO: Self = Self(0);

    /// The longest representable forward distance.
    pub const MAX: Self = Self(i64::MAX);

    #[must_use]
    pub const fn nanoseconds(nanos: i64) -> Self {
        Self(nanos)
    }

    #[must_use]
    pub const fn microseconds(micros: i64) -> Self {
        Self(micros.saturating_mul(1_000))
    }

    #[must_use]
    pub const fn milliseconds(millis: i64) -> Self {
        Self(millis.saturating_mul(1_000_000))
    }

    #[must_use]
    pub const fn seconds(seconds: i64) -> Self {
        Self(seconds.saturating_mul(1_000_000_000))
    }

    /// The signed nanosecond count.
    #[must_use]
    pub const fn as_nanos(self) -> i64 {
        self.0
    }

    /// Absolute length of the stride.
    #[must_use]
    pub const fn magnitude(self) -> u64 {
        self.0.unsigned_abs()
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Convert to a [`Duration`], or `None` for a backwards stride.
    #[must_use]
    pub const fn as_duration(self) -> Option<Duration> {
        if self.0 < 0 {
            None
        } else {
            Some(Duration::from_nanos(self.0.unsigned_abs()))
        }
    }

    /// Like [`as_duration`](Self::as_duration), treating backwards strides
    /// as "now".
    #[must_use]
    pub const fn clamped_duration(self) -> Duration {
        match self.as_duration() {
            Some(duration) => duration,
            None => Duration::ZERO,
        }
    }
}

impl From<i64> for Stride {
    fn from(nanos: i64) -> Self {
        Self(nanos)
    }
}

impl TryFrom<Duration> for Stride {
    type Error = core::num::TryFromIntError;

    fn try_from(duration: Duration) -> Result<Self, Self::Error> {
        i64::try_from(duration.as_nanos()).map(Self)
    }
}

impl Add for Stride {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Stride {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Stride {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Stride {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for Stride {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl Mul<i64> for Stride {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self {
        Self(self.0.saturating_mul(rhs))
    }
}

impl fmt::Display for Stride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ns", self.0)
    }
}
