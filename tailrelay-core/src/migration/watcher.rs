use crate::migration::frame::{FrameView, FrameWriter, RetryBanner, SPINNER};
use crate::migration::types::{MigrationStatus, RegionMigration};
use crate::transport::{MigrationSource, TransportError};
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinError;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Error)]
pub enum WatchError {
    #[error("failed to fetch migration {id}: {source}")]
    Fetch {
        id: String,
        #[source]
        source: TransportError,
    },

    #[error("failed to draw migration progress: {0}")]
    Render(#[source] io::Error),

    #[error("progress painter stopped unexpectedly: {0}")]
    Painter(#[from] JoinError),
}

#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Stop as soon as the migration reaches one of these, in addition to
    /// the terminal statuses. When empty, aborted and failed preflight
    /// migrations stop the watch too.
    pub expected_statuses: Vec<MigrationStatus>,
    pub hidden_steps: Vec<String>,
    pub show_hints: bool,
    pub poll_interval: Duration,
    pub repaint_interval: Duration,
    /// Consecutive fetch failures tolerated before giving up.
    pub fetch_retries: u32,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            expected_statuses: Vec::new(),
            hidden_steps: Vec::new(),
            show_hints: false,
            poll_interval: Duration::from_secs(1),
            repaint_interval: Duration::from_millis(100),
            fetch_retries: 0,
        }
    }
}

#[derive(Default)]
struct Shared {
    migration: Option<Arc<RegionMigration>>,
    retry: Option<RetryBanner>,
    stop: bool,
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct Watcher<S> {
    source: S,
    app: String,
    migration_id: String,
    options: WatchOptions,
}

impl<S> Watcher<S>
where
    S: MigrationSource,
{
    pub fn new(
        source: S,
        app: impl Into<String>,
        migration_id: impl Into<String>,
        options: WatchOptions,
    ) -> Self {
        Self {
            source,
            app: app.into(),
            migration_id: migration_id.into(),
            options,
        }
    }

    /// Polls and repaints until the migration stops, fetching fails for
    /// good, or `cancel` fires. Returns the last snapshot seen.
    pub async fn watch(
        &self,
        out: Box<dyn Write + Send>,
        cancel: CancellationToken,
    ) -> Result<Option<RegionMigration>, WatchError> {
        let shared = Arc::new(Mutex::new(Shared::default()));
        let view = FrameView {
            show_hints: self.options.show_hints,
            hidden_steps: self.options.hidden_steps.clone(),
        };
        let painter = tokio::spawn(paint_loop(
            shared.clone(),
            FrameWriter::new(out),
            view,
            self.options.repaint_interval,
        ));

        let polled = self.poll_loop(&shared, &cancel).await;
        let painted = painter.await?;
        polled?;
        painted?;

        let last = lock(&shared).migration.clone();
        Ok(last.map(|m| (*m).clone()))
    }

    fn should_stop(&self, status: MigrationStatus) -> bool {
        if self.options.expected_statuses.is_empty() {
            return status.is_settled();
        }
        status.is_terminal() || self.options.expected_statuses.contains(&status)
    }

    // Every return path leaves `stop` set so the painter can finish.
    async fn poll_loop(
        &self,
        shared: &Mutex<Shared>,
        cancel: &CancellationToken,
    ) -> Result<(), WatchError> {
        let mut failures: u32 = 0;

        loop {
            let fetched = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    lock(shared).stop = true;
                    return Ok(());
                }
                res = self.source.fetch(&self.app, &self.migration_id) => res,
            };

            match fetched {
                Ok(migration) => {
                    failures = 0;
                    let finished = self.should_stop(migration.status);
                    let mut state = lock(shared);
                    state.migration = Some(Arc::new(migration));
                    state.retry = None;
                    state.stop |= finished;
                    if state.stop {
                        return Ok(());
                    }
                }
                Err(e) if failures < self.options.fetch_retries => {
                    failures += 1;
                    tracing::debug!(
                        attempt = failures,
                        error = %e,
                        "migration fetch failed, retrying"
                    );
                    let mut state = lock(shared);
                    state.retry = Some(RetryBanner {
                        attempt: failures,
                        max: self.options.fetch_retries,
                    });
                    if state.stop {
                        return Ok(());
                    }
                }
                Err(source) => {
                    lock(shared).stop = true;
                    return Err(WatchError::Fetch {
                        id: self.migration_id.clone(),
                        source,
                    });
                }
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    lock(shared).stop = true;
                    return Ok(());
                }
                _ = tokio::time::sleep(self.options.poll_interval) => {}
            }
        }
    }
}

async fn paint_loop(
    shared: Arc<Mutex<Shared>>,
    mut writer: FrameWriter,
    view: FrameView,
    interval: Duration,
) -> Result<(), WatchError> {
    let mut tick: usize = 0;

    loop {
        // Snapshot and stop flag are read together so the frame painted on
        // the way out is the final state.
        let (migration, retry, stop) = {
            let state = lock(&shared);
            (state.migration.clone(), state.retry, state.stop)
        };

        let frame = view.render(migration.as_deref(), retry, SPINNER[tick % SPINNER.len()]);
        tick = tick.wrapping_add(1);

        if let Err(e) = writer.paint(&frame) {
            lock(&shared).stop = true;
            return Err(WatchError::Render(e));
        }
        if stop {
            return Ok(());
        }

        tokio::time::sleep(interval).await;
    }
}
