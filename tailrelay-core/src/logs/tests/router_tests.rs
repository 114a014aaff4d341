use super::support::strip_ansi;
use crate::logs::highlight::router::{Segment, SegmentKind, colorize, scan};
use pretty_assertions::assert_eq;

fn seg(kind: SegmentKind, text: &str) -> Segment<'_> {
    Segment { kind, text }
}

#[test]
fn key_value_pairs_are_split_with_trailing_space_in_value() {
    // Act
    let segments = scan("status=200 method=");

    // Assert
    assert_eq!(
        segments,
        vec![
            seg(SegmentKind::Key, "status"),
            seg(SegmentKind::Separator, "="),
            seg(SegmentKind::Value, "200 "),
            seg(SegmentKind::Key, "method"),
            seg(SegmentKind::Separator, "="),
        ]
    );
}

#[test]
fn escaped_quote_does_not_close_the_string() {
    // Act
    let segments = scan(r#"path="/a\"b c" status=200"#);

    // Assert
    assert_eq!(
        segments,
        vec![
            seg(SegmentKind::Key, "path"),
            seg(SegmentKind::Separator, "="),
            seg(SegmentKind::Value, r#""/a\"b c" "#),
            seg(SegmentKind::Key, "status"),
            seg(SegmentKind::Separator, "="),
            seg(SegmentKind::Value, "200"),
        ]
    );
}

#[test]
fn pending_text_is_flushed_in_every_state() {
    // Act
    let in_name = scan("host");
    let in_text = scan("a=b");
    let in_quote = scan(r#"a="never closed"#);

    // Assert
    assert_eq!(in_name, vec![seg(SegmentKind::Key, "host")]);
    assert_eq!(
        in_text,
        vec![
            seg(SegmentKind::Key, "a"),
            seg(SegmentKind::Separator, "="),
            seg(SegmentKind::Value, "b"),
        ]
    );
    assert_eq!(in_quote.last(), Some(&seg(SegmentKind::Value, r#""never closed"#)));
}

#[test]
fn empty_content_has_no_segments() {
    // Act
    let segments = scan("");

    // Assert
    assert!(segments.is_empty());
}

#[test]
fn colorize_keeps_every_character() {
    // Arrange
    let content = r#"at=info method=GET path="/x y" host=app.example.com duration=0.012s"#;

    // Act
    let colored = colorize(content);

    // Assert
    assert_eq!(strip_ansi(&colored), content);
}
