use crate::harness::free_listener;
use futures_util::{SinkExt, StreamExt};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::net::TcpStream;
use tokio_tungstenite::accept_hdr_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};

/// What one accepted connection does.
pub struct WsSession {
    frames: Vec<String>,
    close: bool,
}

impl WsSession {
    /// Sends the frames, then closes the connection.
    pub fn closing(frames: Vec<String>) -> Self {
        Self {
            frames,
            close: true,
        }
    }

    /// Sends the frames, then keeps the connection open until the client leaves.
    pub fn holding(frames: Vec<String>) -> Self {
        Self {
            frames,
            close: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Handshake {
    pub target: String,
    pub origin: Option<String>,
}

/// WebSocket server that plays one scripted session per connection.
pub struct WsStub {
    url: String,
    handshakes: Arc<Mutex<Vec<Handshake>>>,
}

impl WsStub {
    pub async fn start(sessions: Vec<WsSession>) -> Self {
        let listener = free_listener().await;
        let port = listener.local_addr().unwrap().port();

        let sessions = Arc::new(Mutex::new(VecDeque::from(sessions)));
        let handshakes = Arc::new(Mutex::new(Vec::new()));

        let seen = handshakes.clone();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let session = sessions.lock().unwrap().pop_front();
                let seen = seen.clone();
                tokio::spawn(async move {
                    play(stream, session, seen).await;
                });
            }
        });

        Self {
            url: format!("http://127.0.0.1:{port}"),
            handshakes,
        }
    }

    /// Base URL with an `http` scheme, the way the API hands it out.
    pub fn http_url(&self, path: &str) -> String {
        format!("{}{}", self.url, path)
    }

    pub fn handshakes(&self) -> Vec<Handshake> {
        self.handshakes.lock().unwrap().clone()
    }
}

async fn play(stream: TcpStream, session: Option<WsSession>, seen: Arc<Mutex<Vec<Handshake>>>) {
    let record = seen.clone();
    let callback = move |req: &Request, resp: Response| -> Result<Response, ErrorResponse> {
        record.lock().unwrap().push(Handshake {
            target: req.uri().to_string(),
            origin: req
                .headers()
                .get("Origin")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
        });
        Ok(resp)
    };

    let Ok(mut socket) = accept_hdr_async(stream, callback).await else {
        return;
    };

    let session = session.unwrap_or_else(|| WsSession::holding(Vec::new()));
    for frame in session.frames {
        if socket.send(Message::Text(frame.into())).await.is_err() {
            return;
        }
    }

    if session.close {
        let _ = socket.close(None).await;
        return;
    }

    while let Some(Ok(_)) = socket.next().await {}
}
