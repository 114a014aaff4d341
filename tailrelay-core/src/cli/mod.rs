pub mod conf;
pub mod deployment;
pub mod logs;
pub mod migration;

use crate::conf::ClientConfig;
use crate::transport::api::ApiClient;
use clap::Args;
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Which remote resource a streaming command reads from.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct Target {
    /// Stream URL to read from directly
    #[arg(long)]
    pub url: Option<String>,

    /// Application whose URL is looked up through the API
    #[arg(long)]
    pub app: Option<String>,
}

pub(crate) fn http_client() -> anyhow::Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(concat!("tailrelay/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

pub(crate) fn api_client(client: reqwest::Client, cfg: &ClientConfig) -> ApiClient {
    ApiClient::new(client, cfg.api.url.clone(), cfg.api.token.clone())
}

/// Drives `fut` unless `cancel` fires first. Covers the phases that have no
/// cancellation of their own, such as API lookups and the history dump.
pub(crate) async fn unless_cancelled<F>(cancel: &CancellationToken, fut: F) -> Option<F::Output>
where
    F: Future,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => None,
        out = fut => Some(out),
    }
}
