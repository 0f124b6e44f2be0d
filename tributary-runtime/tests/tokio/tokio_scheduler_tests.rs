// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tributary_error::TributaryError;
use tributary_runtime::{Scheduler, Stride, TokioScheduler};

#[test]
fn test_try_current_fails_outside_runtime() {
    let result = TokioScheduler::try_current();

    assert!(matches!(
        result,
        Err(TributaryError::SchedulerUnavailable { .. })
    ));
}

#[tokio::test]
async fn test_minimum_tolerance_defaults_to_timer_granularity() -> anyhow::Result<()> {
    let scheduler = TokioScheduler::try_current()?;
    assert_eq!(scheduler.minimum_tolerance(), Stride::milliseconds(1));

    let tuned = scheduler.with_minimum_tolerance(Stride::ZERO);
    assert_eq!(tuned.minimum_tolerance(), Stride::ZERO);
    Ok(())
}

#[tokio::test]
async fn test_schedule_runs_on_the_runtime() -> anyhow::Result<()> {
    let scheduler = TokioScheduler::try_current()?;
    let (tx, rx) = tokio::sync::oneshot::channel();

    scheduler.schedule(move || {
        let _ = tx.send(42);
    });

    assert_eq!(rx.await?, 42);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_schedule_after_fires_no_earlier_than_delay() -> anyhow::Result<()> {
    // Arrange
    let scheduler = TokioScheduler::try_current()?;
    let start = scheduler.now();
    let (tx, rx) = tokio::sync::oneshot::channel();
    let clock = scheduler.clone();

    // Act
    let _handle = scheduler.schedule_after(Stride::milliseconds(50), Stride::ZERO, move || {
        let _ = tx.send(clock.now());
    });
    let fired_at = rx.await?;

    // Assert
    assert!(start.distance(fired_at) >= Stride::milliseconds(50));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_delay_never_fires() -> anyhow::Result<()> {
    let scheduler = TokioScheduler::try_current()?;
    let runs = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&runs);

    let handle = scheduler.schedule_after(Stride::milliseconds(10), Stride::ZERO, move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    handle.cancel();
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert_eq!(runs.load(Ordering::SeqCst), 0);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_repeating_work_stops_after_cancel() -> anyhow::Result<()> {
    // Arrange
    let scheduler = TokioScheduler::try_current()?;
    let runs = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&runs);
    let handle = scheduler.schedule_repeating(Stride::milliseconds(10), Stride::ZERO, move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    // Act
    tokio::time::sleep(Duration::from_millis(35)).await;
    handle.cancel();
    let fired = runs.load(Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(100)).await;

    // Assert
    assert_eq!(fired, 3);
    assert_eq!(runs.load(Ordering::SeqCst), fired);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_now_follows_paused_clock() -> anyhow::Result<()> {
    let scheduler = TokioScheduler::try_current()?;
    let before = scheduler.now();

    tokio::time::advance(Duration::from_secs(2)).await;

    assert!(before.distance(scheduler.now()) >= Stride::seconds(2));
    Ok(())
}

#[test]
fn test_explicit_handle_from_owned_runtime() -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_time()
        .build()?;
    let scheduler = TokioScheduler::new(runtime.handle().clone());
    let (tx, rx) = std::sync::mpsc::channel();

    let _handle = scheduler.schedule_after(Stride::milliseconds(1), Stride::ZERO, move || {
        let _ = tx.send("fired");
    });

    assert_eq!(rx.recv_timeout(Duration::from_secs(5))?, "fired");
    Ok(())
}
