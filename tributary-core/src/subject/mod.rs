// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Hot, multi-subscriber publishers fed by imperative `send` calls.
//!
//! ## Characteristics
//!
//! - **Hot**: values exist only while they are being sent. A subscriber with
//!   no outstanding demand simply misses them; nothing is buffered for it and
//!   the sender is never blocked.
//! - **Ordered fan-out**: each `send` visits subscribers in subscribe order.
//! - **Re-entrant**: a subscriber may `request`, `cancel`, or `send` from
//!   inside its own callbacks. Such calls are resolved against the current
//!   demand and terminal state. A `send` or completion issued while a
//!   fan-out is running is queued behind it, so every subscriber sees values
//!   in the order they were sent.
//! - **Released on drop**: when the last handle to a subject goes away
//!   without a terminal event, attached subscribers are dropped.
//! - **Thread-safe**: cheap to clone; clones share one subscriber set guarded
//!   by a mutex owned by the subject.
//! - **Terminal**: after `send_completion`, late subscribers receive the same
//!   terminal event immediately and further sends are ignored.
//!
//! Two flavours exist: [`PassthroughSubject`] never replays, and
//! [`CurrentValueSubject`] keeps the latest value for subscribers that were
//! not ready to take it.
//!
//! ## Example
//!
//! ```
//! use tributary_core::{Completion, PassthroughSubject, PublisherExt, Subject};
//! use std::sync::{Arc, Mutex};
//!
//! let subject = PassthroughSubject::<i32>::new();
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink_seen = Arc::clone(&seen);
//!
//! let _cancellable = subject.sink(move |value| sink_seen.lock().unwrap().push(value));
//!
//! subject.send(1);
//! subject.send(2);
//! subject.send_completion(Completion::Finished);
//! subject.send(3);
//!
//! assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
//! ```

mod current_value;
pub(crate) mod implementation;
mod passthrough;

pub use current_value::CurrentValueSubject;
pub use passthrough::PassthroughSubject;

use crate::{Completion, Publisher};

/// A publisher that is also fed values imperatively.
pub trait Subject: Publisher {
    /// Offer `value` to every attached subscriber with outstanding demand.
    ///
    /// Ignored once the subject has terminated.
    fn send(&self, value: Self::Output);

    /// Deliver the terminal event to every attached subscriber and remember
    /// it for late subscribers. Only the first call has an effect.
    fn send_completion(&self, completion: Completion<Self::Failure>);

    /// Shorthand for `send_completion(Completion::Failure(failure))`.
    fn send_failure(&self, failure: Self::Failure) {
        self.send_completion(Completion::Failure(failure));
    }

    /// Shorthand for `send_completion(Completion::Finished)`.
    fn finish(&self) {
        self.send_completion(Completion::Finished);
    }
}
