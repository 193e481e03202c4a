// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::StreamExt;
use sharecast_core::{from_iter, SharecastError, StreamItem};
use sharecast_replay::ShareReplayExt;
use sharecast_stream::IntoStreamExt;
use sharecast_test_utils::{never, throw_error, ManualProducer};
use std::time::Duration;
use tokio::time::timeout;

#[tokio::test]
async fn buffers_values_pushed_before_polling() {
    // Arrange
    let stream = from_iter(vec![1, 2, 3]).into_stream();

    // Act
    let items: Vec<_> = stream.collect().await;

    // Assert
    assert_eq!(items, vec![StreamItem::Value(1), StreamItem::Value(2), StreamItem::Value(3)]);
}

#[tokio::test]
async fn error_is_the_last_item() {
    // Arrange
    let mut stream = throw_error::<i32>(SharecastError::stream_error("boom")).into_stream();

    // Act
    let first = stream.next().await;
    let second = stream.next().await;

    // Assert
    assert!(matches!(first, Some(StreamItem::Error(_))));
    assert!(second.is_none());
}

#[tokio::test]
async fn pending_producer_keeps_the_stream_open() {
    let mut stream = never::<i32>().into_stream();

    let result = timeout(Duration::from_millis(20), stream.next()).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn values_arrive_as_they_are_pushed() -> anyhow::Result<()> {
    // Arrange
    let source = ManualProducer::<i32>::new();
    let mut stream = source.clone().into_stream();

    // Act
    source.emit(1);
    let first = timeout(Duration::from_millis(100), stream.next()).await?;
    source.emit(2);
    source.complete();
    let rest: Vec<_> = stream.collect().await;

    // Assert
    assert_eq!(first, Some(StreamItem::Value(1)));
    assert_eq!(rest, vec![StreamItem::Value(2)]);
    Ok(())
}

#[tokio::test]
async fn dropping_the_stream_unsubscribes() {
    // Arrange
    let source = ManualProducer::<i32>::new();
    let stream = source.clone().into_stream();
    assert_eq!(source.active_count(), 1);

    // Act
    drop(stream);

    // Assert
    assert_eq!(source.active_count(), 0);
}

#[tokio::test]
async fn late_consumer_of_a_shared_producer_sees_the_replay() {
    // Arrange
    let source = ManualProducer::<i32>::new();
    let shared = source.clone().share_replay(2);
    let early = shared.clone().into_stream();

    // Act
    source.emit(1);
    source.emit(2);
    source.emit(3);
    let late = shared.into_stream();
    source.emit(4);
    source.complete();
    let early: Vec<_> = early.collect().await;
    let late: Vec<_> = late.collect().await;

    // Assert
    assert_eq!(
        early,
        vec![
            StreamItem::Value(1),
            StreamItem::Value(2),
            StreamItem::Value(3),
            StreamItem::Value(4)
        ]
    );
    assert_eq!(
        late,
        vec![StreamItem::Value(2), StreamItem::Value(3), StreamItem::Value(4)]
    );
    assert_eq!(source.subscription_count(), 1);
}
