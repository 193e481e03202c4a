// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use sharecast_core::SystemClock;
use sharecast_replay::ReplayBuffer;
use sharecast_test_utils::TestScheduler;
use std::time::Duration;

#[test]
fn keeps_only_the_most_recent_values() {
    // Arrange
    let mut buffer = ReplayBuffer::new(Some(2), None, TestScheduler::new());

    // Act
    for value in 1..=5 {
        buffer.record(value);
    }

    // Assert
    assert_eq!(buffer.snapshot().into_iter().collect::<Vec<_>>(), vec![4, 5]);
}

#[test]
fn unbounded_buffer_keeps_everything() {
    // Arrange
    let mut buffer = ReplayBuffer::new(None, None, TestScheduler::new());

    // Act
    for value in 1..=100 {
        buffer.record(value);
    }

    // Assert
    assert_eq!(buffer.len(), 100);
}

#[test]
fn zero_capacity_is_treated_as_one() {
    // Arrange
    let mut buffer = ReplayBuffer::new(Some(0), None, TestScheduler::new());

    // Act
    buffer.record('a');
    buffer.record('b');

    // Assert
    assert_eq!(buffer.snapshot().into_iter().collect::<Vec<_>>(), vec!['b']);
}

#[test]
fn snapshot_can_be_iterated_repeatedly() {
    // Arrange
    let mut buffer = ReplayBuffer::new(None, None, TestScheduler::new());
    buffer.record(1);
    buffer.record(2);

    // Act
    let snapshot = buffer.snapshot();

    // Assert
    assert_eq!(snapshot.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!((&snapshot).into_iter().sum::<i32>(), 3);
    assert_eq!(snapshot.len(), 2);
}

#[test]
fn values_expire_when_the_window_elapses() {
    // Arrange
    let scheduler = TestScheduler::new();
    let mut buffer = ReplayBuffer::new(None, Some(Duration::from_millis(10)), scheduler.clone());

    buffer.record('a');
    scheduler.advance_to(5);
    buffer.record('b');

    // Act
    scheduler.advance_to(9);
    let before = buffer.snapshot();
    scheduler.advance_to(10);
    let at_expiry = buffer.snapshot();
    scheduler.advance_to(15);
    let after = buffer.snapshot();

    // Assert
    assert_eq!(before.into_iter().collect::<Vec<_>>(), vec!['a', 'b']);
    assert_eq!(at_expiry.into_iter().collect::<Vec<_>>(), vec!['b']);
    assert!(after.is_empty());
}

#[test]
fn capacity_and_window_apply_together() {
    // Arrange
    let scheduler = TestScheduler::new();
    let mut buffer = ReplayBuffer::new(Some(2), Some(Duration::from_millis(4)), scheduler.clone());

    // Act
    buffer.record(1);
    scheduler.advance_to(1);
    buffer.record(2);
    buffer.record(3);
    scheduler.advance_to(4);

    // Assert
    assert_eq!(buffer.snapshot().into_iter().collect::<Vec<_>>(), vec![2, 3]);
}

#[test]
fn sub_millisecond_window_is_raised_to_one_millisecond() {
    // Arrange
    let scheduler = TestScheduler::new();
    let mut buffer = ReplayBuffer::new(None, Some(Duration::ZERO), scheduler.clone());

    // Act
    buffer.record('a');
    let same_frame = buffer.snapshot();
    scheduler.advance_to(1);
    let next_frame = buffer.snapshot();

    // Assert
    assert_eq!(same_frame.len(), 1);
    assert!(next_frame.is_empty());
}

#[test]
fn maximal_window_never_expires() {
    // Arrange
    let scheduler = TestScheduler::new();
    scheduler.advance_to(7);
    let mut buffer = ReplayBuffer::new(None, Some(Duration::MAX), scheduler.clone());

    // Act
    buffer.record(1);
    buffer.record(2);
    scheduler.advance_to(u64::from(u32::MAX));
    let snapshot = buffer.snapshot();

    // Assert
    assert_eq!(snapshot.into_iter().collect::<Vec<_>>(), vec![1, 2]);
}

#[test]
fn maximal_window_works_with_the_system_clock() {
    // Arrange
    let mut buffer = ReplayBuffer::new(Some(2), Some(Duration::MAX), SystemClock);

    // Act
    buffer.record('a');
    buffer.record('b');
    buffer.record('c');

    // Assert
    assert_eq!(buffer.snapshot().into_iter().collect::<Vec<_>>(), vec!['b', 'c']);
}

#[test]
fn clock_is_never_read_without_a_window() {
    // Arrange
    let scheduler = TestScheduler::new();
    let mut buffer = ReplayBuffer::new(Some(1), None, scheduler.clone());

    // Act
    buffer.record(1);
    buffer.record(2);
    let _ = buffer.snapshot();

    // Assert
    assert_eq!(scheduler.now_calls(), 0);
}

#[test]
fn clock_is_read_once_per_recorded_value_with_a_window() {
    // Arrange
    let scheduler = TestScheduler::new();
    let mut buffer = ReplayBuffer::new(None, Some(Duration::from_secs(1)), scheduler.clone());

    // Act
    buffer.record(1);
    buffer.record(2);
    buffer.record(3);

    // Assert
    assert_eq!(scheduler.now_calls(), 3);
}

#[test]
fn sealed_buffer_ignores_new_values_but_keeps_history() {
    // Arrange
    let mut buffer = ReplayBuffer::new(Some(3), None, TestScheduler::new());
    buffer.record(1);
    buffer.record(2);

    // Act
    buffer.persist_complete();
    buffer.record(3);

    // Assert
    assert!(buffer.is_sealed());
    assert_eq!(buffer.snapshot().into_iter().collect::<Vec<_>>(), vec![1, 2]);
}

#[test]
fn clear_drops_every_value() {
    // Arrange
    let mut buffer = ReplayBuffer::new(None, None, TestScheduler::new());
    buffer.record(1);

    // Act
    buffer.clear();

    // Assert
    assert!(buffer.is_empty());
    assert!(buffer.snapshot().is_empty());
}
