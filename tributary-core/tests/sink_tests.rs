// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use std::sync::Arc;
use tributary_core::{
    AnyCancellable, CancellationToken, Completion, CurrentValueSubject, Fail,
    PassthroughSubject, PublisherExt, Sequence, Subject,
};
use tributary_test_utils::TestError;

fn collector<T: Send + 'static>() -> (Arc<Mutex<Vec<T>>>, impl FnMut(T) + Send + 'static) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink_seen = Arc::clone(&seen);
    (seen, move |value| sink_seen.lock().push(value))
}

#[test]
fn test_sink_receives_every_value() {
    let (seen, receive) = collector::<i32>();

    let _cancellable = Sequence::new(vec![1, 2, 3]).sink(receive);

    assert_eq!(*seen.lock(), vec![1, 2, 3]);
}

#[test]
fn test_sink_with_completion_observes_finish() {
    let (seen, receive) = collector::<&str>();
    let completion = Arc::new(Mutex::new(None));
    let sink_completion = Arc::clone(&completion);

    let _cancellable = Sequence::new(vec!["x"]).sink_with_completion(
        move |result| *sink_completion.lock() = Some(result),
        receive,
    );

    assert_eq!(*seen.lock(), vec!["x"]);
    assert_eq!(*completion.lock(), Some(Completion::Finished));
}

#[test]
fn test_sink_with_completion_observes_failure() {
    let completion = Arc::new(Mutex::new(None));
    let sink_completion = Arc::clone(&completion);

    let _cancellable = Fail::<i32, TestError>::new(TestError::failed("nope")).sink_with_completion(
        move |result| *sink_completion.lock() = Some(result),
        |_| {},
    );

    assert_eq!(
        *completion.lock(),
        Some(Completion::Failure(TestError::failed("nope")))
    );
}

#[test]
fn test_dropping_cancellable_detaches_sink() {
    // Arrange
    let subject = PassthroughSubject::<i32>::new();
    let (seen, receive) = collector::<i32>();
    let cancellable = subject.sink(receive);
    subject.send(1);
    assert_eq!(subject.subscriber_count(), 1);

    // Act
    drop(cancellable);
    subject.send(2);

    // Assert
    assert_eq!(*seen.lock(), vec![1]);
    assert_eq!(subject.subscriber_count(), 0);
}

#[test]
fn test_explicit_cancel_is_idempotent() {
    let subject = PassthroughSubject::<i32>::new();
    let (seen, receive) = collector::<i32>();
    let cancellable = subject.sink(receive);

    assert!(!cancellable.is_cancelled());
    cancellable.cancel();
    cancellable.cancel();
    subject.send(1);

    assert!(cancellable.is_cancelled());
    assert!(seen.lock().is_empty());
}

#[test]
fn test_cancellable_bag_owns_subscriptions() {
    let subject = PassthroughSubject::<i32>::new();
    let mut bag = Vec::new();
    let (first, receive_first) = collector::<i32>();
    let (second, receive_second) = collector::<i32>();

    subject.sink(receive_first).store(&mut bag);
    subject.sink(receive_second).store(&mut bag);
    subject.send(1);
    bag.clear();
    subject.send(2);

    assert_eq!(*first.lock(), vec![1]);
    assert_eq!(*second.lock(), vec![1]);
}

#[test]
fn test_cancellable_wraps_cancellation_token() {
    let token = CancellationToken::new();

    drop(AnyCancellable::from_cancellable(token.clone()));

    assert!(token.is_cancelled());
}

#[test]
fn test_cancellable_runs_closure_once() {
    let runs = Arc::new(Mutex::new(0));
    let counted = Arc::clone(&runs);
    let cancellable = AnyCancellable::new(move || *counted.lock() += 1);

    cancellable.cancel();
    drop(cancellable);

    assert_eq!(*runs.lock(), 1);
}

#[test]
fn test_subscribe_subject_forwards_values_and_completion() {
    // Arrange
    let subject = PassthroughSubject::<i32>::new();
    let (seen, receive) = collector::<i32>();
    let _downstream = subject.sink(receive);

    // Act
    let _upstream = Sequence::new(vec![4, 5]).subscribe_subject(subject.clone());

    // Assert
    assert_eq!(*seen.lock(), vec![4, 5]);
    assert!(subject.is_terminated());
}

#[test]
fn test_subscribe_subject_into_current_value_subject() {
    let subject = CurrentValueSubject::<i32>::new(0);
    let feed = PassthroughSubject::<i32>::new();
    let _link = feed.subscribe_subject(subject.clone());

    feed.send(7);

    assert_eq!(subject.value(), Some(7));
    assert!(!subject.is_terminated());
}

#[test]
fn test_cancelled_subject_link_stops_forwarding() {
    let subject = CurrentValueSubject::<i32>::new(0);
    let feed = PassthroughSubject::<i32>::new();
    let link = feed.subscribe_subject(subject.clone());

    feed.send(1);
    drop(link);
    feed.send(2);
    feed.finish();

    assert_eq!(subject.value(), Some(1));
    assert!(!subject.is_terminated());
    assert_eq!(feed.subscriber_count(), 0);
}
