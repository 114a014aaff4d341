use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tailrelay_core::cli::conf::{ConfigCmd, check, dump};
use tailrelay_core::cli::deployment::{DeploymentFollowArgs, run_deployment_follow};
use tailrelay_core::cli::logs::{LogsArgs, run_logs};
use tailrelay_core::cli::migration::{MigrationCmd, run_migration};
use tailrelay_core::conf::{ClientConfig, load_config};
use tailrelay_core::logging::{LogFormat, default_log_format, init_logging};
use tailrelay_core::update::{UpdateCheck, UpdateOutcome};
use tokio_util::sync::CancellationToken;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(
    name = "tailrelay",
    version,
    about = "Tailrelay: stream application logs and follow deployments"
)]
struct Cli {
    /// Path to the client config file
    #[arg(long, global = true, default_value = "tailrelay.toml")]
    config: PathBuf,

    /// Emit diagnostics as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Configuration tooling
    Config {
        #[command(subcommand)]
        cmd: ConfigCmd,
    },

    #[command(flatten)]
    Stream(StreamCmd),
}

#[derive(Subcommand, Debug)]
enum StreamCmd {
    /// Print recent log lines, optionally followed by the live stream
    Logs(LogsArgs),

    /// Stream deployment events
    DeploymentFollow(DeploymentFollowArgs),

    /// Region migration tooling
    Migration {
        #[command(subcommand)]
        cmd: MigrationCmd,
    },
}

fn main() {
    let cli = Cli::parse();

    let format = if cli.json_logs {
        LogFormat::Json
    } else {
        default_log_format()
    };
    let _log_guard = init_logging(format);

    if let Err(err) = run(cli) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Config { cmd } => run_config(cmd, &cli.config),
        Command::Stream(cmd) => {
            let cfg = load_config(&cli.config).context("failed to load configuration")?;
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(run_stream(cmd, cfg))
        }
    }
}

fn run_config(cmd: ConfigCmd, path: &Path) -> Result<()> {
    match cmd {
        ConfigCmd::Check => check(path),
        ConfigCmd::Dump { json, yaml } => dump(path, json, yaml),
    }
}

async fn run_stream(cmd: StreamCmd, cfg: ClientConfig) -> Result<()> {
    let cancel = CancellationToken::new();

    // First interrupt closes the stream cleanly, a second one exits.
    let on_signal = cancel.clone();
    ctrlc::set_handler(move || {
        if on_signal.is_cancelled() {
            std::process::exit(130);
        }
        tracing::debug!("interrupt received, closing stream");
        on_signal.cancel();
    })?;

    let update = if cfg.update.enabled {
        UpdateCheck::spawn(
            VERSION,
            &cfg.update.url,
            Duration::from_millis(cfg.update.timeout_ms),
        )
    } else {
        UpdateCheck::disabled()
    };

    match cmd {
        StreamCmd::Logs(args) => run_logs(args, &cfg, cancel.clone()).await?,
        StreamCmd::DeploymentFollow(args) => {
            run_deployment_follow(args, &cfg, cancel.clone()).await?
        }
        StreamCmd::Migration { cmd } => run_migration(cmd, &cfg, cancel.clone()).await?,
    }

    if !cancel.is_cancelled() {
        report_update(update.outcome().await);
    }
    Ok(())
}

fn report_update(outcome: UpdateOutcome) {
    match outcome {
        UpdateOutcome::Available { latest } => {
            eprintln!(
                "Your tailrelay client ({VERSION}) is out-of-date: some features may not work correctly."
            );
            eprintln!("Please update to '{latest}'.");
        }
        UpdateOutcome::Failed(reason) => tracing::debug!(%reason, "update check failed"),
        UpdateOutcome::UpToDate | UpdateOutcome::Skipped => {}
    }
}
