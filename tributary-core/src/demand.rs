// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Credit counter for the publisher/subscriber handshake.
//!
//! A [`Demand`] is the number of additional values a subscriber is willing to
//! receive, or [`Demand::Unbounded`]. All arithmetic saturates: nothing ever
//! goes negative and nothing wraps around.
//!
//! ```
//! use tributary_core::Demand;
//!
//! assert_eq!(Demand::max(3) + Demand::Unbounded, Demand::Unbounded);
//! assert_eq!(Demand::max(2) - 5, Demand::NONE);
//! assert!(Demand::max(1) < Demand::Unbounded);
//! ```

use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use tributary_error::TributaryError;

/// Number of values a subscriber still accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Demand {
    /// No limit on the number of values.
    Unbounded,
    /// At most this many more values.
    Bounded(usize),
}

impl Demand {
    /// No further values.
    pub const NONE: Self = Self::Bounded(0);

    /// Any number of values.
    pub const UNLIMITED: Self = Self::Unbounded;

    /// A demand for at most `count` values.
    #[must_use]
    pub const fn max(count: usize) -> Self {
        Self::Bounded(count)
    }

    /// Build a demand from a signed count.
    ///
    /// # Panics
    ///
    /// Panics if `count` is negative. A negative demand is a caller bug, use
    /// [`Demand::try_from`] to validate untrusted input instead.
    #[must_use]
    pub fn from_signed(count: i64) -> Self {
        match Self::try_from(count) {
            Ok(demand) => demand,
            Err(err) => panic!("{err}"),
        }
    }

    /// The finite count, or `None` for [`Demand::Unbounded`].
    #[must_use]
    pub const fn as_bounded(self) -> Option<usize> {
        match self {
            Self::Unbounded => None,
            Self::Bounded(count) => Some(count),
        }
    }

    /// Returns `true` if no value may be delivered.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        matches!(self, Self::Bounded(0))
    }

    /// Returns `true` for [`Demand::Unbounded`].
    #[must_use]
    pub const fn is_unbounded(self) -> bool {
        matches!(self, Self::Unbounded)
    }
}

impl Default for Demand {
    fn default() -> Self {
        Self::NONE
    }
}

impl TryFrom<i64> for Demand {
    type Error = TributaryError;

    fn try_from(count: i64) -> Result<Self, Self::Error> {
        usize::try_from(count)
            .map(Self::Bounded)
            .map_err(|_| TributaryError::invalid_demand(count))
    }
}

impl From<usize> for Demand {
    fn from(count: usize) -> Self {
        Self::Bounded(count)
    }
}

impl Add for Demand {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Bounded(a), Self::Bounded(b)) => {
                a.checked_add(b).map_or(Self::Unbounded, Self::Bounded)
            }
            _ => Self::Unbounded,
        }
    }
}

impl Add<usize> for Demand {
    type Output = Self;

    fn add(self, rhs: usize) -> Self {
        self + Self::Bounded(rhs)
    }
}

impl AddAssign for Demand {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl AddAssign<usize> for Demand {
    fn add_assign(&mut self, rhs: usize) {
        *self = *self + rhs;
    }
}

impl Sub for Demand {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Unbounded, _) => Self::Unbounded,
            (Self::Bounded(_), Self::Unbounded) => Self::NONE,
            (Self::Bounded(a), Self::Bounded(b)) => Self::Bounded(a.saturating_sub(b)),
        }
    }
}

impl Sub<usize> for Demand {
    type Output = Self;

    fn sub(self, rhs: usize) -> Self {
        self - Self::Bounded(rhs)
    }
}

impl SubAssign for Demand {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl SubAssign<usize> for Demand {
    fn sub_assign(&mut self, rhs: usize) {
        *self = *self - rhs;
    }
}

impl Mul<usize> for Demand {
    type Output = Self;

    fn mul(self, rhs: usize) -> Self {
        match self {
            Self::Unbounded => Self::Unbounded,
            Self::Bounded(a) => a.checked_mul(rhs).map_or(Self::Unbounded, Self::Bounded),
        }
    }
}

impl PartialOrd for Demand {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Demand {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Unbounded, Self::Unbounded) => Ordering::Equal,
            (Self::Unbounded, Self::Bounded(_)) => Ordering::Greater,
            (Self::Bounded(_), Self::Unbounded) => Ordering::Less,
            (Self::Bounded(a), Self::Bounded(b)) => a.cmp(b),
        }
    }
}

impl PartialEq<usize> for Demand {
    fn eq(&self, other: &usize) -> bool {
        *self == Self::Bounded(*other)
    }
}

impl PartialOrd<usize> for Demand {
    fn partial_cmp(&self, other: &usize) -> Option<Ordering> {
        Some(self.cmp(&Self::Bounded(*other)))
    }
}

impl fmt::Display for Demand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unbounded => write!(f, "unlimited"),
            Self::Bounded(count) => write!(f, "max({count})"),
        }
    }
}
