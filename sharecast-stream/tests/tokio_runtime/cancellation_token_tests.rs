// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use sharecast_stream::CancellationToken;
use std::time::Duration;
use tokio::time::timeout;

#[test]
fn new_token_is_not_cancelled() {
    let token = CancellationToken::new();
    assert!(!token.is_cancelled());
}

#[test]
fn cancel_is_idempotent_and_shared_by_clones() {
    // Arrange
    let token = CancellationToken::new();
    let clone = token.clone();

    // Act
    clone.cancel();
    clone.cancel();

    // Assert
    assert!(token.is_cancelled());
    assert!(clone.is_cancelled());
}

#[tokio::test]
async fn cancelled_resolves_immediately_when_already_cancelled() -> anyhow::Result<()> {
    // Arrange
    let token = CancellationToken::new();
    token.cancel();

    // Act & Assert
    timeout(Duration::from_millis(100), token.cancelled()).await?;
    Ok(())
}

#[tokio::test]
async fn cancelled_waits_for_cancel() -> anyhow::Result<()> {
    // Arrange
    let token = CancellationToken::new();
    let waiter = token.clone();
    let handle = tokio::spawn(async move {
        waiter.cancelled().await;
        true
    });
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(!handle.is_finished());

    // Act
    token.cancel();

    // Assert
    assert!(timeout(Duration::from_millis(500), handle).await??);
    Ok(())
}

#[tokio::test]
async fn cancel_wakes_every_waiter() -> anyhow::Result<()> {
    // Arrange
    let token = CancellationToken::new();
    let handles: Vec<_> = (0..5)
        .map(|_| {
            let waiter = token.clone();
            tokio::spawn(async move { waiter.cancelled().await })
        })
        .collect();
    tokio::time::sleep(Duration::from_millis(10)).await;

    // Act
    token.cancel();

    // Assert
    for handle in handles {
        timeout(Duration::from_millis(500), handle).await??;
    }
    Ok(())
}

#[tokio::test]
async fn cancelled_stays_pending_without_cancel() {
    let token = CancellationToken::new();

    let result = timeout(Duration::from_millis(20), token.cancelled()).await;

    assert!(result.is_err());
}
