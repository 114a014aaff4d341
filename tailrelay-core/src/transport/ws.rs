use crate::transport::{MessageStream, TailConnector, TransportError};
use async_trait::async_trait;
use futures_util::StreamExt;
use futures_util::future::ready;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::error::ProtocolError;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use url::Url;

/// Live tail over a WebSocket.
#[derive(Debug, Clone)]
pub struct WsTailConnector {
    url: Url,
    origin: String,
}

impl WsTailConnector {
    /// Logs stream derived from the logs URL: `http(s)` becomes `ws(s)` and
    /// `stream=true` plus the optional filter are added to the query.
    pub fn for_logs(logs_url: &str, filter: Option<&str>) -> Result<Self, TransportError> {
        let mut url = websocket_url(logs_url)?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("stream", "true");
            if let Some(filter) = filter.filter(|f| !f.is_empty()) {
                query.append_pair("filter", filter);
            }
        }
        Ok(Self::new(url))
    }

    /// Stream URL used as given, apart from the scheme.
    pub fn for_url(stream_url: &str) -> Result<Self, TransportError> {
        Ok(Self::new(websocket_url(stream_url)?))
    }

    fn new(url: Url) -> Self {
        Self {
            url,
            origin: format!("http://tailrelay.local/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

fn websocket_url(raw: &str) -> Result<Url, TransportError> {
    let mut url = Url::parse(raw).map_err(|e| TransportError::InvalidUrl {
        url: raw.to_string(),
        message: e.to_string(),
    })?;

    let scheme = match url.scheme() {
        "https" | "wss" => "wss",
        _ => "ws",
    };
    url.set_scheme(scheme)
        .map_err(|_| TransportError::InvalidUrl {
            url: raw.to_string(),
            message: format!("cannot use scheme {scheme}"),
        })?;
    Ok(url)
}

#[async_trait]
impl TailConnector for WsTailConnector {
    async fn connect(&self) -> Result<MessageStream, TransportError> {
        let mut request = self
            .url
            .as_str()
            .into_client_request()
            .map_err(|e| TransportError::connect(self.url.as_str(), e))?;

        let origin = HeaderValue::from_str(&self.origin)
            .map_err(|e| TransportError::connect(self.url.as_str(), e))?;
        request.headers_mut().insert("Origin", origin);

        let (socket, _) = connect_async(request)
            .await
            .map_err(|e| TransportError::connect(self.url.as_str(), e))?;

        tracing::debug!(url = %self.url, "tail connection established");

        let messages = socket
            .take_while(|frame| ready(!matches!(frame, Ok(Message::Close(_)))))
            .filter_map(|frame| async move {
                match frame {
                    Ok(Message::Text(text)) => Some(Ok(text.as_str().to_owned())),
                    Ok(Message::Binary(bytes)) => {
                        Some(Ok(String::from_utf8_lossy(&bytes).into_owned()))
                    }
                    Ok(_) => None,
                    Err(e) => Some(Err(classify(e))),
                }
            });

        Ok(messages.boxed())
    }
}

fn classify(err: WsError) -> TransportError {
    match err {
        WsError::ConnectionClosed
        | WsError::AlreadyClosed
        | WsError::Protocol(ProtocolError::ResetWithoutClosingHandshake) => {
            TransportError::Disconnected
        }
        WsError::Io(e) => TransportError::Io(e),
        other => TransportError::Protocol(other.to_string()),
    }
}
