// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! # Tributary
//!
//! Demand-driven publish/subscribe with explicit backpressure.
//!
//! ## Overview
//!
//! A [`Publisher`] delivers values to a [`Subscriber`] only against the
//! [`Demand`] the subscriber granted through its [`Subscription`], and ends
//! with exactly one [`Completion`]. [`PassthroughSubject`] and
//! [`CurrentValueSubject`] are publishers you push into; they fan values out
//! to every attached subscriber in subscribe order. [`Published`] wraps a
//! plain field so its writes can be observed.
//!
//! Time lives in [`tributary_runtime`]: [`Instant`], [`Stride`] and the
//! [`Scheduler`] implementations, including a [`VirtualTimeScheduler`] for
//! deterministic tests.
//!
//! ## Crate layout
//!
//! - `tributary-core`: the protocol, primitive publishers, subjects, sinks
//! - `tributary-runtime`: instants, strides, clocks, schedulers
//! - `tributary-error`: shared error types
//!
//! ## Quick Start
//!
//! ```rust
//! use tributary::prelude::*;
//! use std::sync::{Arc, Mutex};
//!
//! let subject = PassthroughSubject::<&str>::new();
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink_seen = Arc::clone(&seen);
//!
//! let _cancellable = subject.sink(move |value| sink_seen.lock().unwrap().push(value));
//! subject.send("hello");
//! subject.finish();
//!
//! assert_eq!(*seen.lock().unwrap(), vec!["hello"]);
//! ```

pub mod published;

pub use published::{Published, PublishedPublisher};

// Re-export core types
pub use tributary_core::{
    AnyCancellable, AnyPublisher, AnySubscriber, AnySubscription, Cancellable, CancellationToken,
    Completion, CurrentValueSubject, Demand, Empty, EmptySubscription, Fail, Just, Never,
    PassthroughSubject, Publisher, PublisherExt, Sequence, Sink, Subject, Subscriber,
    Subscription,
};

// Re-export time and scheduling
#[cfg(feature = "runtime-smol")]
pub use tributary_runtime::SmolScheduler;
#[cfg(feature = "runtime-tokio")]
pub use tributary_runtime::TokioScheduler;
pub use tributary_runtime::{
    Clock, ImmediateScheduler, Instant, ManualClock, MonotonicClock, ScheduledHandle, Scheduler,
    Stride, VirtualTimeScheduler,
};

// Re-export errors
pub use tributary_error::{Result, StreamError, TributaryError};

pub use tributary_core;
pub use tributary_runtime;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AnyCancellable, Completion, CurrentValueSubject, Demand, Instant, PassthroughSubject,
        Published, Publisher, PublisherExt, Scheduler, Stride, Subject, Subscriber, Subscription,
    };
}
