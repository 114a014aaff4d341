use integration_tests::harness::{HttpStub, SharedBuf, StubResponse};
use pretty_assertions::assert_eq;
use tailrelay_core::logs::highlight::Highlighter;
use tailrelay_core::logs::{DumpOutcome, DumpRequest, LineRenderer, StreamError, dump};
use tailrelay_core::transport::TransportError;
use tailrelay_core::transport::http::HttpDumpSource;

fn renderer() -> (LineRenderer, SharedBuf, SharedBuf) {
    let out = SharedBuf::default();
    let notices = SharedBuf::default();
    let renderer = LineRenderer::new(
        Box::new(out.clone()),
        Box::new(notices.clone()),
        Highlighter::new(false),
    );
    (renderer, out, notices)
}

#[tokio::test]
async fn dump_renders_body_lines_and_sends_query() {
    // Arrange
    let body = "2024-03-01 10:00:00 +0000 UTC [web-1] first\n\
                2024-03-01 10:00:01 +0000 UTC [web-1] second\n\
                trailing without newline";
    let stub = HttpStub::start(vec![("/logs", StubResponse::text(200, body))]).await;
    let source = HttpDumpSource::new(reqwest::Client::new(), &stub.url("/logs?token=abc")).unwrap();
    let (renderer, out, _notices) = renderer();
    let request = DumpRequest {
        lines: 5,
        filter: Some("web".to_string()),
    };

    // Act
    let outcome = dump(&source, &request, renderer).await.unwrap();

    // Assert
    assert_eq!(outcome, DumpOutcome::Rendered { lines: 3 });
    assert_eq!(
        out.lines(),
        vec![
            "2024-03-01 10:00:00 +0000 UTC [web-1] first",
            "2024-03-01 10:00:01 +0000 UTC [web-1] second",
            "trailing without newline",
        ]
    );
    assert_eq!(
        stub.requests()[0].target,
        "/logs?token=abc&n=5&filter=web"
    );
}

#[tokio::test]
async fn no_content_and_not_found_are_successful_outcomes() {
    // Arrange
    let stub = HttpStub::start(vec![("/empty", StubResponse::status(204))]).await;
    let client = reqwest::Client::new();
    let empty = HttpDumpSource::new(client.clone(), &stub.url("/empty")).unwrap();
    let missing = HttpDumpSource::new(client, &stub.url("/missing")).unwrap();
    let request = DumpRequest {
        lines: 20,
        filter: None,
    };

    // Act
    let (first, _, first_notices) = renderer();
    let no_content = dump(&empty, &request, first).await.unwrap();
    let (second, _, second_notices) = renderer();
    let not_found = dump(&missing, &request, second).await.unwrap();

    // Assert
    assert_eq!(no_content, DumpOutcome::NoContent);
    assert_eq!(first_notices.lines().len(), 1);
    assert_eq!(not_found, DumpOutcome::NotFound);
    assert_eq!(
        second_notices.lines()[0],
        " !     There is no log for this application"
    );
}

#[tokio::test]
async fn server_error_is_reported_with_status() {
    // Arrange
    let stub = HttpStub::start(vec![("/logs", StubResponse::text(500, "boom"))]).await;
    let source = HttpDumpSource::new(reqwest::Client::new(), &stub.url("/logs")).unwrap();
    let (renderer, out, _notices) = renderer();

    // Act
    let err = dump(
        &source,
        &DumpRequest {
            lines: 1,
            filter: None,
        },
        renderer,
    )
    .await
    .unwrap_err();

    // Assert
    assert!(matches!(
        err,
        StreamError::Connect(TransportError::Status { status: 500, .. })
    ));
    assert!(out.lines().is_empty());
}
