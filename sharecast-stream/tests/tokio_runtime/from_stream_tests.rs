// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::{stream, StreamExt};
use sharecast_core::{SharecastError, StreamItem};
use sharecast_replay::{ShareReplayConfig, ShareReplayExt};
use sharecast_stream::{from_stream_fn, IntoStreamExt};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn values(items: Vec<StreamItem<i32>>) -> Vec<i32> {
    items.into_iter().filter_map(StreamItem::ok).collect()
}

#[tokio::test]
async fn forwards_values_then_completes() {
    // Arrange
    let source = from_stream_fn(|| stream::iter(vec![1, 2, 3]).map(StreamItem::Value));

    // Act
    let items: Vec<_> = source.into_stream().collect().await;

    // Assert
    assert_eq!(values(items), vec![1, 2, 3]);
}

#[tokio::test]
async fn error_item_terminates_the_subscription() {
    // Arrange
    let source = from_stream_fn(|| {
        stream::iter(vec![
            StreamItem::Value(1),
            StreamItem::Error(SharecastError::stream_error("boom")),
            StreamItem::Value(2),
        ])
    });

    // Act
    let items: Vec<_> = source.into_stream().collect().await;

    // Assert
    assert_eq!(items.len(), 2);
    assert!(items[0].is_value());
    assert!(matches!(
        &items[1],
        StreamItem::Error(SharecastError::StreamProcessingError { context }) if context == "boom"
    ));
}

#[tokio::test]
async fn every_subscription_gets_a_fresh_stream() {
    // Arrange
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let source = Arc::new(from_stream_fn(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        stream::iter(vec![StreamItem::Value(7)])
    }));

    // Act
    let first: Vec<_> = source.clone().into_stream().collect().await;
    let second: Vec<_> = source.into_stream().collect().await;

    // Assert
    assert_eq!(values(first), vec![7]);
    assert_eq!(values(second), vec![7]);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn dropping_the_consumer_stops_the_stream() {
    // Arrange
    let produced = Arc::new(AtomicUsize::new(0));
    let counter = produced.clone();
    let source = from_stream_fn(move || {
        let counter = counter.clone();
        stream::unfold(0, move |n| {
            let counter = counter.clone();
            async move {
                tokio::task::yield_now().await;
                counter.fetch_add(1, Ordering::SeqCst);
                Some((StreamItem::Value(n), n + 1))
            }
        })
    });

    // Act
    let taken: Vec<_> = source.into_stream().take(3).collect().await;
    tokio::time::sleep(Duration::from_millis(20)).await;
    let after_drop = produced.load(Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(20)).await;

    // Assert
    assert_eq!(values(taken), vec![0, 1, 2]);
    assert_eq!(produced.load(Ordering::SeqCst), after_drop);
}

#[tokio::test]
async fn share_replay_runs_an_async_source_once() {
    // Arrange
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let shared = from_stream_fn(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        stream::iter(vec![1, 2, 3]).map(StreamItem::Value)
    })
    .share_replay(2);

    // Act
    let first: Vec<_> = shared.clone().into_stream().collect().await;
    let late: Vec<_> = shared.into_stream().collect().await;

    // Assert
    assert_eq!(values(first), vec![1, 2, 3]);
    assert_eq!(values(late), vec![2, 3]);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn share_replay_with_ref_count_restarts_an_abandoned_async_source() {
    // Arrange
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let shared = from_stream_fn(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        stream::unfold(0, |n| async move {
            tokio::task::yield_now().await;
            Some((StreamItem::Value(n), n + 1))
        })
    })
    .share_replay_with(ShareReplayConfig::buffered(1).with_ref_count(true));

    // Act
    let first: Vec<_> = shared.clone().into_stream().take(2).collect().await;
    let second: Vec<_> = shared.into_stream().take(2).collect().await;

    // Assert
    assert_eq!(values(first), vec![0, 1]);
    assert_eq!(values(second), vec![0, 1]);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}
