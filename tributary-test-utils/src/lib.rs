// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the Tributary workspace.
//!
//! Intended for tests only, not for production code.
//!
//! # Key Types
//!
//! - [`TrackingSubscriber`] records every callback it receives and follows
//!   a scripted demand, so tests can assert exactly what a publisher
//!   delivered and when.
//! - [`TestError`] is a comparable failure payload.
//! - [`Person`] is a non-`Copy` payload for fan-out tests.
//!
//! ```rust
//! use tributary_core::{Completion, Demand, Publisher, Sequence};
//! use tributary_test_utils::{Event, TrackingSubscriber};
//!
//! let tracker = TrackingSubscriber::new().with_initial_demand(Demand::max(2));
//! Sequence::new(vec![10, 20, 30]).subscribe(tracker.clone());
//!
//! assert_eq!(tracker.values(), vec![10, 20]);
//! tracker.request(Demand::max(1));
//! assert_eq!(
//!     tracker.history().last(),
//!     Some(&Event::Completion(Completion::Finished))
//! );
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod person;
pub mod test_error;
pub mod tracking;

pub use person::{person_alice, person_bob, person_charlie, Person};
pub use test_error::TestError;
pub use tracking::{Event, TrackingSubscriber};
