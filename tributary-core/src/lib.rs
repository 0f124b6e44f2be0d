// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Core of the Tributary demand-driven publish/subscribe runtime.
//!
//! A [`Publisher`] hands each [`Subscriber`] a [`Subscription`]. The
//! subscriber grants [`Demand`] through it and the publisher delivers at most
//! that many values, followed by one [`Completion`]. Subjects add an
//! imperative `send` and broadcast to every attached subscriber.
//!
//! ```
//! use tributary_core::{Completion, PassthroughSubject, PublisherExt, Subject};
//! use std::sync::{Arc, Mutex};
//!
//! let subject = PassthroughSubject::<u32>::new();
//! let total = Arc::new(Mutex::new(0));
//! let sink_total = Arc::clone(&total);
//!
//! let _cancellable = subject.sink(move |value| *sink_total.lock().unwrap() += value);
//! subject.send(2);
//! subject.send(3);
//! subject.send_completion(Completion::Finished);
//!
//! assert_eq!(*total.lock().unwrap(), 5);
//! ```

#[macro_use]
mod logging;

pub mod cancellable;
pub mod cancellation_token;
pub mod completion;
pub mod demand;
pub mod publisher;
pub mod publisher_ext;
pub mod publishers;
pub mod sink;
pub mod subject;
pub mod subscriber;
pub mod subscription;

pub use self::cancellable::{AnyCancellable, Cancellable};
pub use self::cancellation_token::{CancellationToken, Cancelled};
pub use self::completion::{Completion, Never};
pub use self::demand::Demand;
pub use self::publisher::{AnyPublisher, Publisher};
pub use self::publisher_ext::PublisherExt;
pub use self::publishers::{Empty, Fail, Just, Sequence};
pub use self::sink::Sink;
pub use self::subject::{CurrentValueSubject, PassthroughSubject, Subject};
pub use self::subscriber::{AnySubscriber, Subscriber};
pub use self::subscription::{AnySubscription, EmptySubscription, Subscription};
pub use tributary_error::{Result, StreamError, TributaryError};
