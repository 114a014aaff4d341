//! Boundary with the remote log, deployment and migration services.
//!
//! The pipeline only talks to the traits in this module; `http`, `ws` and
//! `api` hold the network-backed implementations.

pub mod api;
mod error;
pub mod http;
pub mod ws;

pub use error::TransportError;

use crate::migration::RegionMigration;
use async_trait::async_trait;
use futures_util::stream::BoxStream;
use tokio::io::AsyncBufRead;

pub type DumpBody = Box<dyn AsyncBufRead + Send + Unpin>;

/// Answer to a historical dump request.
pub enum DumpResponse {
    Body(DumpBody),
    /// The service has nothing buffered yet (HTTP 204).
    NoContent,
    /// The resource never produced any output (HTTP 404).
    NotFound,
}

/// One inbound text frame, or the error that ended the connection.
pub type MessageStream = BoxStream<'static, Result<String, TransportError>>;

#[async_trait]
pub trait DumpSource: Send + Sync {
    async fn open_dump(
        &self,
        lines: usize,
        filter: Option<&str>,
    ) -> Result<DumpResponse, TransportError>;
}

#[async_trait]
pub trait TailConnector: Send + Sync {
    async fn connect(&self) -> Result<MessageStream, TransportError>;
}

#[async_trait]
pub trait MigrationSource: Send + Sync {
    async fn fetch(&self, app: &str, migration_id: &str)
    -> Result<RegionMigration, TransportError>;
}
