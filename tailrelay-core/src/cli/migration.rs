use crate::cli::{api_client, http_client};
use crate::conf::ClientConfig;
use crate::migration::{MigrationStatus, Watcher, finished_message};
use anyhow::Result;
use clap::Subcommand;
use std::io;
use tokio_util::sync::CancellationToken;

#[derive(Subcommand, Debug)]
pub enum MigrationCmd {
    /// Follow a region migration until it stops
    Watch {
        /// Application being migrated
        #[arg(long)]
        app: String,

        /// Migration ID
        #[arg(long)]
        id: String,

        /// Also stop once this status is reached
        #[arg(long = "expect")]
        expect: Vec<MigrationStatus>,

        /// Do not show this step
        #[arg(long = "hide-step")]
        hide_step: Vec<String>,

        /// Explain what each status means
        #[arg(long)]
        hints: bool,
    },
}

pub async fn run_migration(
    cmd: MigrationCmd,
    cfg: &ClientConfig,
    cancel: CancellationToken,
) -> Result<()> {
    match cmd {
        MigrationCmd::Watch {
            app,
            id,
            expect,
            hide_step,
            hints,
        } => {
            let mut options = cfg.watch.watch_options();
            options.expected_statuses = expect;
            options.hidden_steps = hide_step;
            options.show_hints = hints;

            let source = api_client(http_client()?, cfg);
            let watcher = Watcher::new(source, app, id, options);
            let last = watcher.watch(Box::new(io::stdout()), cancel).await?;

            if let Some(message) = last.and_then(|m| finished_message(m.status)) {
                println!("{message}");
            }
            Ok(())
        }
    }
}
