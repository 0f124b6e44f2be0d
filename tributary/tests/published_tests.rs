// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use tributary::prelude::*;
use tributary_test_utils::{person_alice, person_bob, person_charlie, Event, Person, TrackingSubscriber};

#[test]
fn test_get_returns_latest_write() {
    let mut field = Published::new(1);
    assert_eq!(*field.get(), 1);

    field.set(2);

    assert_eq!(*field.get(), 2);
}

#[test]
fn test_subscribers_see_writes_after_subscribing_only() {
    // Arrange
    let mut field = Published::new(person_alice());
    field.set(person_bob());
    let tracker = TrackingSubscriber::<Person>::new().with_initial_demand(Demand::Unbounded);

    // Act
    field.publisher().subscribe(tracker.clone());
    field.set(person_charlie());

    // Assert
    assert_eq!(
        tracker.history(),
        vec![Event::Subscription, Event::Value(person_charlie())]
    );
}

#[test]
fn test_value_is_stored_before_it_is_published() {
    // Arrange
    let mut field = Published::new(0);
    let tracker = TrackingSubscriber::<i32>::new().with_initial_demand(Demand::max(1));
    field.publisher().subscribe(tracker.clone());

    // Act
    let previous = field.replace(5);
    field.set(6);

    // Assert
    assert_eq!(previous, 0);
    assert_eq!(*field.get(), 6);
    assert_eq!(tracker.values(), vec![5]);
}

#[test]
fn test_publisher_clones_observe_the_same_field() {
    let mut field = Published::new(String::from("a"));
    let first = TrackingSubscriber::<String>::new().with_initial_demand(Demand::Unbounded);
    let second = TrackingSubscriber::<String>::new().with_initial_demand(Demand::Unbounded);
    let publisher = field.publisher();
    publisher.clone().subscribe(first.clone());
    field.publisher().subscribe(second.clone());

    field.modify(|value| value.push('b'));

    assert_eq!(first.values(), vec!["ab".to_string()]);
    assert_eq!(second.values(), vec!["ab".to_string()]);
}

#[test]
fn test_writes_without_observers_are_silent() {
    let mut field = Published::<u8>::default();

    field.set(3);

    assert_eq!(field.into_inner(), 3);
}

#[test]
fn test_debug_reports_observation() {
    let field = Published::new(1);
    assert_eq!(format!("{field:?}"), "Published { value: 1, observed: false }");

    let _publisher = field.publisher();
    assert_eq!(format!("{field:?}"), "Published { value: 1, observed: true }");
}
