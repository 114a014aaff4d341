use crate::logs::error::StreamError;
use crate::logs::framer::LineFramer;
use crate::logs::relay::{self, RelayReceiver};
use crate::logs::render::LineRenderer;
use crate::transport::{DumpResponse, DumpSource, TransportError};

#[derive(Debug, Clone)]
pub struct DumpRequest {
    pub lines: usize,
    pub filter: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DumpOutcome {
    Rendered { lines: u64 },
    NoContent,
    NotFound,
}

/// Fetches up to `request.lines` historical lines and renders them in
/// arrival order.
///
/// The caller's task reads the body and pushes lines into the relay buffer
/// while a spawned task drains it into the renderer, so network reads and
/// terminal writes overlap. Returns once every line has been rendered.
pub async fn dump(
    source: &dyn DumpSource,
    request: &DumpRequest,
    mut renderer: LineRenderer,
) -> Result<DumpOutcome, StreamError> {
    let response = source
        .open_dump(request.lines, request.filter.as_deref())
        .await
        .map_err(StreamError::Connect)?;

    let body = match response {
        DumpResponse::Body(body) => body,
        DumpResponse::NotFound => {
            renderer.error_notice("There is no log for this application")?;
            renderer.notice("Ensure your application is writing to the standard output")?;
            return Ok(DumpOutcome::NotFound);
        }
        DumpResponse::NoContent => {
            renderer.notice("No log lines are available yet")?;
            return Ok(DumpOutcome::NoContent);
        }
    };

    let (tx, rx) = relay::bounded(relay::dump_capacity(request.lines));
    let consumer = tokio::spawn(render_lines(rx, renderer));

    let mut framer = LineFramer::new(body);
    let mut produced: u64 = 0;

    let read_result = loop {
        match framer.next_line().await {
            Ok(Some(line)) => {
                if tx.push(line).await.is_err() {
                    // Renderer is gone; its own error is reported below.
                    break Ok(());
                }
                produced += 1;
            }
            Ok(None) => break Ok(()),
            Err(e) => break Err(e),
        }
    };

    tx.close();
    let rendered = consumer.await??;

    match read_result.map_err(TransportError::from) {
        Ok(()) => {
            tracing::debug!(produced, rendered, "log dump complete");
            Ok(DumpOutcome::Rendered { lines: rendered })
        }
        // The service hanging up early still ends the dump cleanly.
        Err(e) if e.is_disconnect() => {
            tracing::debug!(produced, rendered, error = %e, "log dump cut short by remote");
            Ok(DumpOutcome::Rendered { lines: rendered })
        }
        Err(e) => Err(StreamError::Stream(e)),
    }
}

async fn render_lines(
    mut rx: RelayReceiver<String>,
    mut renderer: LineRenderer,
) -> Result<u64, StreamError> {
    let mut rendered = 0;
    while let Some(line) = rx.pop().await {
        renderer.render_line(&line)?;
        rendered += 1;
    }
    renderer.flush()?;
    Ok(rendered)
}
