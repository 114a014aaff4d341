use std::io;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("failed to connect to {url}: {message}")]
    Connect { url: String, message: String },

    #[error("unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("connection closed by remote")]
    Disconnected,

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("invalid url '{url}': {message}")]
    InvalidUrl { url: String, message: String },
}

impl TransportError {
    /// End-of-stream style closure initiated by the other side.
    pub fn is_disconnect(&self) -> bool {
        match self {
            TransportError::Disconnected => true,
            TransportError::Io(e) => matches!(
                e.kind(),
                io::ErrorKind::UnexpectedEof
                    | io::ErrorKind::ConnectionReset
                    | io::ErrorKind::ConnectionAborted
                    | io::ErrorKind::BrokenPipe
            ),
            _ => false,
        }
    }

    pub(crate) fn connect(url: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Connect {
            url: url.into(),
            message: err.to_string(),
        }
    }
}
