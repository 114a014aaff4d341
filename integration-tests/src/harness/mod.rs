pub mod http;
pub mod sink;
pub mod tracing;
pub mod ws;

pub use http::{HttpStub, RecordedRequest, StubResponse};
pub use sink::SharedBuf;
pub use tracing::{CapturedEvent, captured_events, init_test_tracing};
pub use ws::{Handshake, WsSession, WsStub};

use tokio::net::TcpListener;

/// Listener on an ephemeral local port, so tests can run in parallel.
pub async fn free_listener() -> TcpListener {
    TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind a local port")
}
