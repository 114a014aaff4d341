use crate::cli::{Target, api_client, http_client, unless_cancelled};
use crate::conf::ClientConfig;
use crate::logs::{DeploymentFollowHandler, LineRenderer, TailController};
use crate::transport::ws::WsTailConnector;
use anyhow::{Context, Result};
use clap::Args;
use tokio_util::sync::CancellationToken;

#[derive(Args, Debug)]
pub struct DeploymentFollowArgs {
    #[command(flatten)]
    pub target: Target,

    /// Follow one deployment and stop when it finishes
    #[arg(long)]
    pub deployment: Option<String>,
}

pub async fn run_deployment_follow(
    args: DeploymentFollowArgs,
    cfg: &ClientConfig,
    cancel: CancellationToken,
) -> Result<()> {
    let stream_url = match (args.target.url, args.target.app) {
        (Some(url), _) => url,
        (None, Some(app)) => {
            let api = api_client(http_client()?, cfg);
            let Some(found) = unless_cancelled(&cancel, api.deployments_stream_url(&app)).await
            else {
                return Ok(());
            };
            found.with_context(|| format!("failed to look up the deployment stream of {app}"))?
        }
        (None, None) => anyhow::bail!("either --url or --app is required"),
    };

    let connector = WsTailConnector::for_url(&stream_url)?;
    let renderer = LineRenderer::stdio(cfg.logs.color);
    let handler = DeploymentFollowHandler::new(renderer, args.deployment);
    let outcome = TailController::new(connector, cfg.logs.tail_options(), cancel)
        .run(handler)
        .await?;
    tracing::debug!(?outcome, "deployment stream closed");

    Ok(())
}
