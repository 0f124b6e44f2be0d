// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! `StreamError` travelling as the failure terminal event.

use parking_lot::Mutex;
use std::sync::Arc;
use tributary_core::{
    Completion, CurrentValueSubject, Demand, Fail, PassthroughSubject, Publisher, PublisherExt,
    StreamError, Subject,
};
use tributary_error::{IntoStreamError, ResultExt};
use tributary_test_utils::TrackingSubscriber;

fn failure_message(completion: &Completion<StreamError>) -> Option<String> {
    match completion {
        Completion::Failure(error) => Some(error.to_string()),
        Completion::Finished => None,
    }
}

#[test]
fn test_fail_delivers_stream_error_to_every_subscriber() {
    // Arrange
    let publisher = Fail::<i32, StreamError>::new(StreamError::timeout("no reply from sensor"));
    let messages = Arc::new(Mutex::new(Vec::new()));

    // Act
    let mut bag = Vec::new();
    for _ in 0..2 {
        let sink_messages = Arc::clone(&messages);
        publisher
            .sink_with_completion(
                move |completion| sink_messages.lock().push(failure_message(&completion)),
                |_| {},
            )
            .store(&mut bag);
    }

    // Assert
    assert_eq!(
        *messages.lock(),
        vec![
            Some("Timeout error: no reply from sensor".to_string()),
            Some("Timeout error: no reply from sensor".to_string()),
        ]
    );
}

#[test]
fn test_subject_fans_out_stream_error_from_user_code() {
    // Arrange
    let subject = PassthroughSubject::<i32, StreamError>::new();
    let first =
        TrackingSubscriber::<i32, StreamError>::new().with_initial_demand(Demand::Unbounded);
    let second =
        TrackingSubscriber::<i32, StreamError>::new().with_initial_demand(Demand::Unbounded);
    subject.subscribe(first.clone());
    subject.subscribe(second.clone());

    // Act
    for reading in ["12", "x7"] {
        match reading
            .parse::<i32>()
            .map_err(IntoStreamError::into_stream_error)
            .context("parsing reading")
        {
            Ok(value) => subject.send(value),
            Err(error) => subject.send_failure(error),
        }
    }

    // Assert
    assert_eq!(first.values(), vec![12]);
    assert_eq!(second.values(), vec![12]);
    for tracker in [&first, &second] {
        let completions = tracker.completions();
        assert_eq!(completions.len(), 1);
        let message = failure_message(&completions[0]).expect("stream failed");
        assert!(
            message.starts_with("Stream processing error: parsing reading: "),
            "unexpected message {message}"
        );
    }
}

#[test]
fn test_late_subscriber_receives_cloned_user_error_as_message() {
    // Arrange
    let subject = CurrentValueSubject::<i32, StreamError>::new(0);
    let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
    subject.send_failure(StreamError::user(io));

    // Act
    let late =
        TrackingSubscriber::<i32, StreamError>::new().with_initial_demand(Demand::Unbounded);
    subject.subscribe(late.clone());

    // Assert
    assert_eq!(late.values(), Vec::<i32>::new());
    let completions = late.completions();
    assert!(matches!(
        completions.as_slice(),
        [Completion::Failure(StreamError::Processing { context })]
            if context == "User error: pipe closed"
    ));
}
