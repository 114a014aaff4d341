use integration_tests::harness::{HttpStub, StubResponse};
use pretty_assertions::assert_eq;
use std::time::Duration;
use tailrelay_core::update::{UpdateCheck, UpdateOutcome};

const TIMEOUT: Duration = Duration::from_secs(2);

#[tokio::test]
async fn newer_release_is_reported() {
    // Arrange
    let stub = HttpStub::start(vec![("/version", StubResponse::text(200, "1.5.0\n"))]).await;

    // Act
    let outcome = UpdateCheck::spawn("1.4.2", &stub.url("/version"), TIMEOUT)
        .outcome()
        .await;

    // Assert
    assert_eq!(
        outcome,
        UpdateOutcome::Available {
            latest: "1.5.0".to_string()
        }
    );
}

#[tokio::test]
async fn matching_release_is_up_to_date() {
    // Arrange
    let stub = HttpStub::start(vec![("/version", StubResponse::text(200, " 1.4.2 "))]).await;

    // Act
    let outcome = UpdateCheck::spawn("1.4.2", &stub.url("/version"), TIMEOUT)
        .outcome()
        .await;

    // Assert
    assert_eq!(outcome, UpdateOutcome::UpToDate);
}

#[tokio::test]
async fn unreachable_endpoint_fails_quietly() {
    // Arrange
    let stub = HttpStub::start(vec![]).await;

    // Act
    let outcome = UpdateCheck::spawn("1.4.2", &stub.url("/version"), TIMEOUT)
        .outcome()
        .await;

    // Assert
    assert!(matches!(outcome, UpdateOutcome::Failed(_)));
}
