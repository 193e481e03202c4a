// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use sharecast_core::Clock;
use sharecast_replay::ShareReplayConfig;
use sharecast_test_utils::{of, TestScheduler};
use std::time::Duration;

#[test]
fn defaults_are_unbounded_without_ref_count() {
    // Act
    let config = ShareReplayConfig::default();

    // Assert
    assert_eq!(config.buffer_size(), None);
    assert_eq!(config.window_time(), None);
    assert!(!config.ref_count());
}

#[test]
fn zero_buffer_size_is_clamped_to_one() {
    // Act
    let config = ShareReplayConfig::new().with_buffer_size(0);

    // Assert
    assert_eq!(config.buffer_size(), Some(1));
}

#[test]
fn with_clock_keeps_the_other_settings() {
    // Arrange
    let scheduler = TestScheduler::new();

    // Act
    let config = ShareReplayConfig::buffered(3)
        .with_window_time(Duration::from_millis(50))
        .with_ref_count(true)
        .with_clock(scheduler.clone());

    // Assert
    assert_eq!(config.buffer_size(), Some(3));
    assert_eq!(config.window_time(), Some(Duration::from_millis(50)));
    assert!(config.ref_count());
    assert_eq!(config.clock().now(), Duration::ZERO);
    assert_eq!(scheduler.now_calls(), 1);
}

#[test]
fn apply_builds_an_operator_with_this_configuration() {
    // Act
    let shared = ShareReplayConfig::buffered(2).with_ref_count(true).apply(of(vec![1, 2, 3]));

    // Assert
    assert_eq!(shared.config().buffer_size(), Some(2));
    assert!(shared.config().ref_count());
    assert!(shared.current_hub().is_none());
}
