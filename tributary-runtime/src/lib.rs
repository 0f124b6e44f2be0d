// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Time for Tributary: monotonic [`Instant`]s, signed [`Stride`]s, the
//! [`Clock`]s that produce them and the [`Scheduler`]s that run work
//! against them.
//!
//! | Scheduler | Feature | Runs work |
//! |-----------|---------|-----------|
//! | [`ImmediateScheduler`] | always | synchronously, delays ignored |
//! | [`VirtualTimeScheduler`] | always | when the test advances time |
//! | `TokioScheduler` | `runtime-tokio` (default) | as tokio tasks |
//! | `SmolScheduler` | `runtime-smol` | as smol tasks |
//!
//! ```
//! use tributary_runtime::{Instant, Stride};
//!
//! let a = Instant::from_nanos(10_000);
//! let b = Instant::from_nanos(10_431);
//!
//! assert_eq!(a.distance(b), Stride::nanoseconds(431));
//! assert_eq!(a.advanced(Stride::nanoseconds(431)), b);
//! assert_eq!(a.advanced(Stride::nanoseconds(-220)), Instant::from_nanos(9_780));
//! ```

#[macro_use]
mod logging;

pub mod clock;
pub mod impls;
pub mod instant;
pub mod scheduler;
pub mod stride;

pub use self::clock::{Clock, ManualClock, MonotonicClock};
pub use self::impls::immediate::ImmediateScheduler;
#[cfg(feature = "runtime-smol")]
pub use self::impls::smol::SmolScheduler;
#[cfg(feature = "runtime-tokio")]
pub use self::impls::tokio::TokioScheduler;
pub use self::impls::virtual_time::VirtualTimeScheduler;
pub use self::instant::Instant;
pub use self::scheduler::{ScheduledHandle, Scheduler};
pub use self::stride::Stride;
