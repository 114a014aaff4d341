use crate::logs::envelope::{DecodeError, TailEvent, decode};
use pretty_assertions::assert_eq;

#[test]
fn ping_decodes_without_payload() {
    // Act
    let event = decode(r#"{"type":"ping"}"#).unwrap();

    // Assert
    assert_eq!(event, TailEvent::Ping);
}

#[test]
fn log_payload_is_decoded_from_data() {
    // Arrange
    let text = r#"{"type":"log","id":"dep-1","data":{"content":"hello\n","timestamp":"2024-03-01T10:00:00Z"}}"#;

    // Act
    let event = decode(text).unwrap();

    // Assert
    let TailEvent::Log(data) = event else {
        panic!("expected a log event");
    };
    assert_eq!(data.content, "hello\n");
    assert_eq!(data.deployment_id.as_deref(), Some("dep-1"));
    assert!(data.timestamp.is_some());
}

#[test]
fn legacy_log_frame_uses_top_level_line() {
    // Arrange
    let text = r#"{"event":"log","log":"2024-03-01 10:00:00 +0000 UTC [web-1] hi","timestamp":"2024-03-01T10:00:00Z"}"#;

    // Act
    let event = decode(text).unwrap();

    // Assert
    let TailEvent::Log(data) = event else {
        panic!("expected a log event");
    };
    assert_eq!(data.content, "2024-03-01 10:00:00 +0000 UTC [web-1] hi");
}

#[test]
fn status_and_new_deployment_payloads() {
    // Act
    let status = decode(r#"{"type":"status","id":"dep-1","data":{"status":"building"}}"#).unwrap();
    let new = decode(
        r#"{"type":"new","data":{"deployment":{"id":"dep-2","pusher":{"username":"ada"}}}}"#,
    )
    .unwrap();

    // Assert
    let TailEvent::Status(status) = status else {
        panic!("expected a status event");
    };
    assert_eq!(status.status, "building");
    assert_eq!(status.deployment_id.as_deref(), Some("dep-1"));

    let TailEvent::New(new) = new else {
        panic!("expected a new deployment event");
    };
    assert_eq!(new.deployment.id, "dep-2");
    assert_eq!(new.deployment.pusher.unwrap().username, "ada");
}

#[test]
fn unknown_type_is_kept_as_unknown() {
    // Act
    let event = decode(r#"{"type":"metrics","data":{"cpu":1}}"#).unwrap();

    // Assert
    assert_eq!(event, TailEvent::Unknown("metrics".to_string()));
}

#[test]
fn malformed_json_is_an_envelope_error() {
    // Act
    let err = decode("{not json").unwrap_err();

    // Assert
    assert!(matches!(err, DecodeError::Envelope(_)));
}

#[test]
fn wrong_payload_shape_only_fails_that_event() {
    // Act
    let err = decode(r#"{"type":"log","data":{"content":42}}"#).unwrap_err();
    let missing = decode(r#"{"type":"status"}"#).unwrap_err();

    // Assert
    assert!(matches!(err, DecodeError::Payload { ref kind, .. } if kind == "log"));
    assert!(matches!(missing, DecodeError::MissingPayload { ref kind } if kind == "status"));
}
