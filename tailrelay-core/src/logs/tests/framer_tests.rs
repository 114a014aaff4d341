use crate::logs::framer::LineFramer;
use bytes::Bytes;
use futures_util::stream;
use pretty_assertions::assert_eq;
use std::io;
use tokio::io::BufReader;
use tokio_util::io::StreamReader;

async fn collect_lines<R>(mut framer: LineFramer<R>) -> Vec<String>
where
    R: tokio::io::AsyncBufRead + Unpin,
{
    let mut lines = Vec::new();
    while let Some(line) = framer.next_line().await.unwrap() {
        lines.push(line);
    }
    lines
}

#[tokio::test]
async fn splits_on_newlines_and_strips_crlf() {
    // Arrange
    let body: &[u8] = b"first\r\nsecond\nthird\n";

    // Act
    let lines = collect_lines(LineFramer::new(body)).await;

    // Assert
    assert_eq!(lines, vec!["first", "second", "third"]);
}

#[tokio::test]
async fn final_chunk_without_newline_is_emitted() {
    // Arrange
    let body: &[u8] = b"complete\npartial";

    // Act
    let lines = collect_lines(LineFramer::new(body)).await;

    // Assert
    assert_eq!(lines, vec!["complete", "partial"]);
}

#[tokio::test]
async fn line_split_across_reads_is_reassembled() {
    // Arrange
    let chunks: Vec<io::Result<Bytes>> = vec![
        Ok(Bytes::from_static(b"a long li")),
        Ok(Bytes::from_static(b"ne of text\nnext")),
        Ok(Bytes::from_static(b" one\n")),
    ];
    let reader = BufReader::with_capacity(4, StreamReader::new(stream::iter(chunks)));

    // Act
    let lines = collect_lines(LineFramer::new(reader)).await;

    // Assert
    assert_eq!(lines, vec!["a long line of text", "next one"]);
}

#[tokio::test]
async fn invalid_utf8_is_replaced() {
    // Arrange
    let body: &[u8] = b"ok \xff\n";

    // Act
    let lines = collect_lines(LineFramer::new(body)).await;

    // Assert
    assert_eq!(lines, vec!["ok \u{fffd}"]);
}

#[tokio::test]
async fn empty_body_yields_nothing() {
    // Arrange
    let body: &[u8] = b"";

    // Act
    let lines = collect_lines(LineFramer::new(body)).await;

    // Assert
    assert!(lines.is_empty());
}
