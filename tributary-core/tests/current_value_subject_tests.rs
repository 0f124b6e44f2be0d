// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use tributary_core::{Completion, CurrentValueSubject, Demand, Publisher, Subject, TributaryError};
use tributary_test_utils::{person_alice, person_bob, Event, Person, TrackingSubscriber};

#[test]
fn test_initial_value_is_delivered_on_first_demand() {
    let subject = CurrentValueSubject::<i32>::new(0);
    let tracker = TrackingSubscriber::<i32>::new().with_initial_demand(Demand::max(1));

    subject.subscribe(tracker.clone());

    assert_eq!(tracker.history(), vec![Event::Subscription, Event::Value(0)]);
}

#[test]
fn test_current_value_waits_for_demand() {
    // Arrange
    let subject = CurrentValueSubject::<i32>::new(5);
    let tracker = TrackingSubscriber::<i32>::new();
    subject.subscribe(tracker.clone());
    assert_eq!(tracker.values(), Vec::<i32>::new());

    // Act
    tracker.request(Demand::max(1));

    // Assert
    assert_eq!(tracker.values(), vec![5]);
}

#[test]
fn test_empty_subject_replays_nothing_until_first_send() {
    let subject = CurrentValueSubject::<i32>::empty();
    let tracker = TrackingSubscriber::<i32>::new().with_initial_demand(Demand::Unbounded);
    subject.subscribe(tracker.clone());
    assert_eq!(subject.value(), None);

    subject.send(1);

    assert_eq!(tracker.values(), vec![1]);
    assert_eq!(subject.value(), Some(1));
}

#[test]
fn test_late_subscriber_sees_only_the_latest_value() {
    // Arrange
    let subject = CurrentValueSubject::<i32>::empty();
    subject.send(1);
    subject.send(2);
    subject.send(3);

    // Act
    let late = TrackingSubscriber::<i32>::new().with_initial_demand(Demand::Unbounded);
    subject.subscribe(late.clone());
    subject.send(4);

    // Assert
    assert_eq!(late.values(), vec![3, 4]);
}

#[test]
fn test_saturated_subscriber_receives_newest_value_on_next_request() {
    // Arrange
    let subject = CurrentValueSubject::<i32>::new(0);
    let tracker = TrackingSubscriber::<i32>::new().with_initial_demand(Demand::max(1));
    subject.subscribe(tracker.clone());

    // Act
    subject.send(1);
    subject.send(2);
    subject.send(3);
    tracker.request(Demand::max(1));

    // Assert
    assert_eq!(tracker.values(), vec![0, 3]);
}

#[test]
fn test_held_value_is_not_delivered_twice() {
    let subject = CurrentValueSubject::<i32>::new(0);
    let tracker = TrackingSubscriber::<i32>::new().with_initial_demand(Demand::max(1));
    subject.subscribe(tracker.clone());

    subject.send(1);
    tracker.request(Demand::max(5));
    subject.send(2);

    assert_eq!(tracker.values(), vec![0, 1, 2]);
}

#[test]
fn test_value_tracks_latest_send() {
    let subject = CurrentValueSubject::<Person>::new(person_alice());
    assert_eq!(subject.value(), Some(person_alice()));

    subject.send(person_bob());

    assert_eq!(subject.value(), Some(person_bob()));
}

#[test]
fn test_terminated_subject_replays_only_the_terminal_event() {
    // Arrange
    let subject = CurrentValueSubject::<i32>::new(9);
    subject.finish();

    // Act
    let late = TrackingSubscriber::<i32>::new().with_initial_demand(Demand::Unbounded);
    subject.subscribe(late.clone());

    // Assert
    assert_eq!(
        late.history(),
        vec![Event::Subscription, Event::Completion(Completion::Finished)]
    );
    assert_eq!(subject.value(), Some(9));
}

#[test]
fn test_send_after_termination_leaves_value_untouched() {
    let subject = CurrentValueSubject::<i32>::new(1);
    subject.finish();

    subject.send(2);

    assert!(subject.is_terminated());
    assert_eq!(subject.value(), Some(1));
    assert_eq!(subject.try_send(3), Err(TributaryError::SubjectTerminated));
}

#[test]
fn test_each_subscriber_gets_the_value_once() {
    let subject = CurrentValueSubject::<i32>::new(0);
    let first = TrackingSubscriber::<i32>::new().with_initial_demand(Demand::Unbounded);
    let second = TrackingSubscriber::<i32>::new().with_initial_demand(Demand::Unbounded);
    subject.subscribe(first.clone());
    subject.subscribe(second.clone());

    subject.send(1);

    assert_eq!(first.values(), vec![0, 1]);
    assert_eq!(second.values(), vec![0, 1]);
    assert_eq!(subject.subscriber_count(), 2);
}

#[test]
fn test_cancelled_subscriber_drops_held_value() {
    let subject = CurrentValueSubject::<i32>::new(0);
    let tracker = TrackingSubscriber::<i32>::new();
    subject.subscribe(tracker.clone());

    tracker.cancel();
    tracker.request(Demand::Unbounded);

    assert_eq!(tracker.values(), Vec::<i32>::new());
    assert_eq!(subject.subscriber_count(), 0);
}
