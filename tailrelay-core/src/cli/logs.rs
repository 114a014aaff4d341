use crate::cli::{Target, api_client, http_client, unless_cancelled};
use crate::conf::ClientConfig;
use crate::logs::{
    DumpOutcome, DumpRequest, LineRenderer, LogLinesHandler, TailController, TailOutcome, dump,
};
use crate::transport::http::HttpDumpSource;
use crate::transport::ws::WsTailConnector;
use anyhow::{Context, Result};
use clap::Args;
use tokio_util::sync::CancellationToken;

#[derive(Args, Debug)]
pub struct LogsArgs {
    #[command(flatten)]
    pub target: Target,

    /// Number of historical lines to print
    #[arg(short = 'n', long)]
    pub lines: Option<usize>,

    /// Only show lines from matching sources
    #[arg(short = 'F', long)]
    pub filter: Option<String>,

    /// Keep streaming new lines after the history
    #[arg(short = 'f', long)]
    pub stream: bool,

    /// Disable highlighting
    #[arg(long)]
    pub no_color: bool,
}

pub async fn run_logs(
    args: LogsArgs,
    cfg: &ClientConfig,
    cancel: CancellationToken,
) -> Result<()> {
    let client = http_client()?;

    let logs_url = match (args.target.url, args.target.app) {
        (Some(url), _) => url,
        (None, Some(app)) => {
            let api = api_client(client.clone(), cfg);
            let Some(found) = unless_cancelled(&cancel, api.logs_url(&app)).await else {
                return Ok(());
            };
            found.with_context(|| format!("failed to look up logs of {app}"))?
        }
        (None, None) => anyhow::bail!("either --url or --app is required"),
    };

    let colors = cfg.logs.color && !args.no_color;
    let request = DumpRequest {
        lines: args.lines.unwrap_or(cfg.logs.default_lines),
        filter: args.filter.clone(),
    };

    let source = HttpDumpSource::new(client, &logs_url)?;
    let dumped = unless_cancelled(&cancel, dump(&source, &request, LineRenderer::stdio(colors)));
    let Some(outcome) = dumped.await else {
        tracing::debug!("log dump interrupted by operator");
        return Ok(());
    };
    let outcome = outcome?;
    if let DumpOutcome::Rendered { lines } = outcome {
        tracing::debug!(lines, "history dumped");
    }

    if !args.stream {
        return Ok(());
    }

    let connector = WsTailConnector::for_logs(&logs_url, args.filter.as_deref())?;
    let controller = TailController::new(connector, cfg.logs.tail_options(), cancel);
    let outcome = controller
        .run(LogLinesHandler::new(LineRenderer::stdio(colors)))
        .await?;
    if outcome == TailOutcome::Cancelled {
        tracing::debug!("log stream closed by operator");
    }

    Ok(())
}
