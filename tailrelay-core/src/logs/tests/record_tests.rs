use crate::logs::record::{LogRecord, ParsedLine};
use chrono::{Datelike, Timelike};
use pretty_assertions::assert_eq;

#[test]
fn well_formed_line_splits_into_date_source_and_content() {
    // Arrange
    let line = "2024-03-01 10:00:00.123456789 +0100 CET [web-1] Listening on port 8080";

    // Act
    let parsed = LogRecord::parse(line);

    // Assert
    let ParsedLine::Record(record) = parsed else {
        panic!("expected a record, got {parsed:?}");
    };
    assert_eq!(record.date, "2024-03-01 10:00:00.123456789 +0100 CET");
    assert_eq!(record.source, "web-1");
    assert_eq!(record.content, "Listening on port 8080");

    let ts = record.timestamp.expect("timestamp should parse");
    assert_eq!(ts.year(), 2024);
    assert_eq!(ts.hour(), 10);
    assert_eq!(ts.offset().local_minus_utc(), 3600);
}

#[test]
fn content_keeps_repeated_spaces() {
    // Arrange
    let line = "2024-03-01 10:00:00 +0000 UTC [worker-1] a  b   c";

    // Act
    let parsed = LogRecord::parse(line);

    // Assert
    let ParsedLine::Record(record) = parsed else {
        panic!("expected a record");
    };
    assert_eq!(record.content, "a  b   c");
}

#[test]
fn short_line_is_raw() {
    // Act
    let parsed = LogRecord::parse("hello world");

    // Assert
    assert_eq!(parsed, ParsedLine::Raw("hello world".to_string()));
}

#[test]
fn unbracketed_tag_is_raw() {
    // Arrange
    let line = "2024-03-01 10:00:00 +0000 UTC web-1 started";

    // Act
    let parsed = LogRecord::parse(line);

    // Assert
    assert_eq!(parsed, ParsedLine::Raw(line.to_string()));
}

#[test]
fn unparseable_date_keeps_record_without_timestamp() {
    // Arrange
    let line = "yesterday around noon ish [web-1] hi";

    // Act
    let parsed = LogRecord::parse(line);

    // Assert
    let ParsedLine::Record(record) = parsed else {
        panic!("expected a record");
    };
    assert_eq!(record.timestamp, None);
    assert_eq!(record.date, "yesterday around noon ish");
}
