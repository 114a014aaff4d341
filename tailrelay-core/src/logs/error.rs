use crate::transport::TransportError;
use std::io;

/// Why a streaming session could not make forward progress.
///
/// The variant names the phase that failed.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    #[error("failed to connect to the log service: {0}")]
    Connect(#[source] TransportError),

    #[error("log stream interrupted: {0}")]
    Stream(#[source] TransportError),

    #[error("failed to write log output: {0}")]
    Render(#[source] io::Error),

    #[error("gave up after {attempts} reconnection attempts: {last}")]
    ReconnectLimit {
        attempts: u32,
        #[source]
        last: TransportError,
    },

    #[error("deployment {id} failed with status '{status}'")]
    DeploymentFailed { id: String, status: String },

    #[error("log renderer stopped unexpectedly: {0}")]
    Renderer(#[from] tokio::task::JoinError),
}
