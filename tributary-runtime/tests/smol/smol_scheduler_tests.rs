// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tributary_runtime::{Scheduler, SmolScheduler, Stride};

#[test]
fn test_schedule_after_fires_no_earlier_than_delay() -> anyhow::Result<()> {
    let scheduler = SmolScheduler::new();
    let start = scheduler.now();
    let (tx, rx) = std::sync::mpsc::channel();

    let _handle = scheduler.schedule_after(Stride::milliseconds(20), Stride::ZERO, move || {
        let _ = tx.send(SmolScheduler::new().now());
    });
    let fired_at = rx.recv_timeout(Duration::from_secs(5))?;

    assert!(start.distance(fired_at) >= Stride::milliseconds(20));
    Ok(())
}

#[test]
fn test_cancelled_delay_never_fires() {
    smol::block_on(async {
        let scheduler = SmolScheduler::default();
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&runs);

        let handle = scheduler.schedule_after(Stride::milliseconds(10), Stride::ZERO, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        handle.cancel();
        smol::Timer::after(Duration::from_millis(50)).await;

        assert_eq!(runs.load(Ordering::SeqCst), 0);
    });
}

#[test]
fn test_repeating_work_stops_after_cancel() {
    smol::block_on(async {
        let scheduler = SmolScheduler::new();
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&runs);

        let handle = scheduler.schedule_repeating(Stride::milliseconds(5), Stride::ZERO, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        smol::Timer::after(Duration::from_millis(60)).await;
        handle.cancel();
        smol::Timer::after(Duration::from_millis(20)).await;
        let fired = runs.load(Ordering::SeqCst);
        smol::Timer::after(Duration::from_millis(50)).await;

        assert!(fired >= 1);
        assert_eq!(runs.load(Ordering::SeqCst), fired);
    });
}
