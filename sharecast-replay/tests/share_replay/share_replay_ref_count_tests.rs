// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use sharecast_replay::{ShareReplayConfig, ShareReplayExt};
use sharecast_test_utils::{parse_marbles, parse_subscriptions, TestScheduler};

#[test]
fn does_not_restart_on_unsubscription_without_ref_count() {
    // Arrange
    let scheduler = TestScheduler::new();
    let source = scheduler.cold("a-b-c-d-e-f-g-h-i-j");
    let shared = source
        .clone()
        .share_replay_with(ShareReplayConfig::buffered(1).with_ref_count(false));

    // Act
    let first = scheduler.observe(shared.clone(), 0, Some(7));
    let second = scheduler.observe(shared, 11, None);
    scheduler.flush();

    // Assert
    assert_eq!(first.records(), parse_marbles("a-b-c-d-"));
    assert_eq!(second.records(), parse_marbles("-----------fg-h-i-j"));
    assert_eq!(
        source.subscriptions(),
        vec![parse_subscriptions("^------------------")]
    );
}

#[test]
fn restarts_on_unsubscription_with_ref_count() {
    // Arrange
    let scheduler = TestScheduler::new();
    let source = scheduler.cold("a-b-c-d-e-f-g-h-i-j");
    let shared = source
        .clone()
        .share_replay_with(ShareReplayConfig::buffered(1).with_ref_count(true));

    // Act
    let first = scheduler.observe(shared.clone(), 0, Some(7));
    let second = scheduler.observe(shared, 11, None);
    scheduler.flush();

    // Assert
    assert_eq!(first.records(), parse_marbles("a-b-c-d-"));
    assert_eq!(
        second.records(),
        parse_marbles("-----------a-b-c-d-e-f-g-h-i-j")
    );
    assert_eq!(
        source.subscriptions(),
        vec![
            parse_subscriptions("^------!----------------------"),
            parse_subscriptions("-----------^------------------"),
        ]
    );
}

#[test]
fn does_not_restart_a_completed_source_with_ref_count() {
    // Arrange
    let scheduler = TestScheduler::new();
    let source = scheduler.cold("a-(b|)         ");
    let shared = source
        .clone()
        .share_replay_with(ShareReplayConfig::buffered(1).with_ref_count(true));

    // Act
    let first = scheduler.observe(shared.clone(), 0, Some(7));
    let second = scheduler.observe(shared, 11, Some(12));
    scheduler.flush();

    // Assert
    assert_eq!(first.records(), parse_marbles("a-(b|)         "));
    assert_eq!(second.records(), parse_marbles("-----------(b|)"));
    assert_eq!(
        source.subscriptions(),
        vec![parse_subscriptions("^-!            ")]
    );
}

#[test]
fn ref_count_defaults_to_false() {
    // Arrange
    let scheduler = TestScheduler::new();
    let source = scheduler.cold("a-b-c-d-e-f-g-h-i-j");
    let shared = source.clone().share_replay(1);

    // Act
    let first = scheduler.observe(shared.clone(), 0, Some(7));
    let second = scheduler.observe(shared.clone(), 11, None);
    scheduler.flush();

    // Assert
    assert!(!shared.config().ref_count());
    assert_eq!(first.records(), parse_marbles("a-b-c-d-"));
    assert_eq!(second.records(), parse_marbles("-----------fg-h-i-j"));
    assert_eq!(
        source.subscriptions(),
        vec![parse_subscriptions("^------------------")]
    );
}

#[test]
fn ref_count_teardown_clears_the_current_hub() {
    // Arrange
    let scheduler = TestScheduler::new();
    let source = scheduler.cold("a-b-c-d");
    let shared = source
        .clone()
        .share_replay_with(ShareReplayConfig::buffered(1).with_ref_count(true));
    let _first = scheduler.observe(shared.clone(), 0, Some(3));

    // Act
    scheduler.advance_to(2);
    let before = shared.current_hub();
    scheduler.advance_to(3);
    let after = shared.current_hub();

    // Assert
    assert!(before.is_some());
    assert!(after.is_none());
}
