use crate::logs::constants::MAX_DUMP_BUFFER_LINES;
use crate::logs::relay::{bounded, dump_capacity};
use pretty_assertions::assert_eq;
use std::time::Duration;

#[test]
fn dump_capacity_is_clamped() {
    // Act / Assert
    assert_eq!(dump_capacity(0), 1);
    assert_eq!(dump_capacity(20), 20);
    assert_eq!(dump_capacity(1_000_000), MAX_DUMP_BUFFER_LINES);
}

#[tokio::test(start_paused = true)]
async fn slow_consumer_receives_every_item_in_order() {
    // Arrange
    let (tx, mut rx) = bounded::<u32>(2);
    let producer = tokio::spawn(async move {
        for i in 0..50 {
            tx.push(i).await.unwrap();
        }
        tx.close();
    });

    // Act
    let mut received = Vec::new();
    while let Some(item) = rx.pop().await {
        tokio::time::sleep(Duration::from_millis(10)).await;
        received.push(item);
    }
    producer.await.unwrap();

    // Assert
    assert_eq!(received, (0..50).collect::<Vec<_>>());
}

#[tokio::test]
async fn push_fails_once_consumer_is_gone() {
    // Arrange
    let (tx, rx) = bounded::<&str>(4);
    drop(rx);

    // Act
    let err = tx.push("lost").await.unwrap_err();

    // Assert
    assert_eq!(err.0, "lost");
}
