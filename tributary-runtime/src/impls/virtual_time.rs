// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Deterministic scheduler driven by hand.
//!
//! Work never fires on its own. Tests move time forward with
//! [`VirtualTimeScheduler::advance_by`], [`VirtualTimeScheduler::advance_to`]
//! or [`VirtualTimeScheduler::run`], and due work fires on the calling thread
//! in due-time order, ties broken by scheduling order.
//!
//! ```
//! use tributary_runtime::{Instant, Scheduler, Stride, VirtualTimeScheduler};
//! use std::sync::{Arc, Mutex};
//!
//! let scheduler = VirtualTimeScheduler::new();
//! let fired = Arc::new(Mutex::new(Vec::new()));
//!
//! let log = Arc::clone(&fired);
//! scheduler.schedule_after(Stride::nanoseconds(20), Stride::ZERO, move || log.lock().unwrap().push("b"));
//! let log = Arc::clone(&fired);
//! scheduler.schedule_after(Stride::nanoseconds(10), Stride::ZERO, move || log.lock().unwrap().push("a"));
//!
//! scheduler.advance_by(Stride::nanoseconds(15));
//! assert_eq!(*fired.lock().unwrap(), vec!["a"]);
//! assert_eq!(scheduler.now(), Instant::from_nanos(15));
//!
//! scheduler.run();
//! assert_eq!(*fired.lock().unwrap(), vec!["a", "b"]);
//! ```

use crate::scheduler::effective_interval;
use crate::{Clock, Instant, ManualClock, ScheduledHandle, Scheduler, Stride};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tributary_core::CancellationToken;

enum Work {
    Once(Box<dyn FnOnce() + Send>),
    Repeating {
        interval: Stride,
        action: Box<dyn FnMut() + Send>,
    },
}

struct Job {
    token: CancellationToken,
    work: Work,
}

#[derive(Default)]
struct Queue {
    jobs: BTreeMap<(Instant, u64), Job>,
    next_seq: u64,
}

impl Queue {
    fn push(&mut self, due: Instant, job: Job) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.jobs.insert((due, seq), job);
    }

    /// Remove the earliest job due at or before `deadline`.
    fn pop_due(&mut self, deadline: Instant) -> Option<(Instant, Job)> {
        let (&(due, _), _) = self.jobs.first_key_value()?;
        if due > deadline {
            return None;
        }
        self.jobs.pop_first().map(|((due, _), job)| (due, job))
    }

    /// Latest due time among live one-shot jobs.
    fn last_one_shot(&self) -> Option<Instant> {
        self.jobs
            .iter()
            .rev()
            .find(|(_, job)| matches!(job.work, Work::Once(_)) && !job.token.is_cancelled())
            .map(|(&(due, _), _)| due)
    }
}

struct Inner {
    clock: ManualClock,
    queue: Mutex<Queue>,
}

/// Scheduler over virtual time. Clones share the clock and the queue.
#[derive(Clone)]
pub struct VirtualTimeScheduler {
    inner: Arc<Inner>,
}

impl VirtualTimeScheduler {
    /// A scheduler whose clock starts at [`Instant::ZERO`].
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(Instant::ZERO)
    }

    #[must_use]
    pub fn starting_at(start: Instant) -> Self {
        Self {
            inner: Arc::new(Inner {
                clock: ManualClock::new(start),
                queue: Mutex::new(Queue::default()),
            }),
        }
    }

    /// The clock this scheduler reads. Advancing it directly does not fire
    /// any work.
    #[must_use]
    pub fn clock(&self) -> ManualClock {
        self.inner.clock.clone()
    }

    /// Number of queued jobs, cancelled ones included until their due time.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.inner.queue.lock().jobs.len()
    }

    /// Move time forward by `stride`, firing everything that becomes due.
    pub fn advance_by(&self, stride: Stride) {
        self.advance_to(self.now().advanced(stride));
    }

    /// Move time forward to `target`, firing everything due up to and
    /// including it. A target in the past only fires work already due.
    pub fn advance_to(&self, target: Instant) {
        let target = target.max(self.now());
        while let Some((due, job)) = self.pop_due(target) {
            self.inner.clock.set(due);
            self.fire(due, job);
        }
        self.inner.clock.set(target);
    }

    /// Fire queued work until no one-shot work is left.
    ///
    /// Repeating work keeps firing while it is interleaved with one-shot
    /// work and stays queued afterwards.
    pub fn run(&self) {
        loop {
            let last = self.inner.queue.lock().last_one_shot();
            match last {
                Some(due) => self.advance_to(due),
                None => break,
            }
        }
    }

    fn pop_due(&self, deadline: Instant) -> Option<(Instant, Job)> {
        self.inner.queue.lock().pop_due(deadline)
    }

    fn fire(&self, due: Instant, job: Job) {
        if job.token.is_cancelled() {
            trace!(due = %due, "skipping cancelled work");
            return;
        }

        // The queue lock is released here so actions may schedule more work
        match job.work {
            Work::Once(action) => action(),
            Work::Repeating {
                interval,
                mut action,
            } => {
                action();
                if job.token.is_cancelled() {
                    return;
                }
                let Some(next) = due.checked_advanced(interval) else {
                    trace!(due = %due, "repeating work reached the end of the timeline");
                    return;
                };
                self.inner.queue.lock().push(
                    next,
                    Job {
                        token: job.token,
                        work: Work::Repeating { interval, action },
                    },
                );
            }
        }
    }

    fn enqueue(&self, due: Instant, work: Work) -> ScheduledHandle {
        let handle = ScheduledHandle::new();
        let job = Job {
            token: handle.token(),
            work,
        };
        self.inner.queue.lock().push(due, job);
        handle
    }

    fn due_after(&self, delay: Stride) -> Instant {
        let now = self.now();
        now.advanced(delay).max(now)
    }
}

impl Default for VirtualTimeScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for VirtualTimeScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualTimeScheduler")
            .field("now", &self.now())
            .field("pending", &self.pending())
            .finish()
    }
}

impl Scheduler for VirtualTimeScheduler {
    fn now(&self) -> Instant {
        self.inner.clock.now()
    }

    fn minimum_tolerance(&self) -> Stride {
        Stride::ZERO
    }

    /// Queues `action` at the current instant; it fires on the next advance,
    /// even `advance_by(Stride::ZERO)`.
    fn schedule<F>(&self, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.enqueue(self.now(), Work::Once(Box::new(action)));
    }

    fn schedule_after<F>(&self, delay: Stride, _tolerance: Stride, action: F) -> ScheduledHandle
    where
        F: FnOnce() + Send + 'static,
    {
        self.enqueue(self.due_after(delay), Work::Once(Box::new(action)))
    }

    fn schedule_repeating<F>(
        &self,
        interval: Stride,
        _tolerance: Stride,
        action: F,
    ) -> ScheduledHandle
    where
        F: FnMut() + Send + 'static,
    {
        let interval = effective_interval(interval);
        self.enqueue(
            self.due_after(interval),
            Work::Repeating {
                interval,
                action: Box::new(action),
            },
        )
    }
}
