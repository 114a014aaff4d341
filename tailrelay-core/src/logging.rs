use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, fmt};

pub const LOG_FILE_ENV: &str = "TAILRELAY_LOG_FILE";

/// Diagnostics stay quiet unless asked for: the terminal belongs to the
/// rendered log lines.
const DEFAULT_FILTER: &str = "warn";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

pub fn default_log_format() -> LogFormat {
    if io::stderr().is_terminal() {
        LogFormat::Pretty
    } else {
        LogFormat::Json
    }
}

/// Keeps the file writer alive; dropping it flushes pending diagnostics.
pub struct LogGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Initialize diagnostics with environment-based filtering
///
/// - Uses `RUST_LOG` for filtering, defaulting to "warn"
/// - Writes to stderr, or to a daily-rotated file when `TAILRELAY_LOG_FILE` is set
/// - JSON output flattens event fields
pub fn init_logging(format: LogFormat) -> LogGuard {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    match std::env::var_os(LOG_FILE_ENV).map(PathBuf::from) {
        Some(path) => {
            let (dir, prefix) = split_log_path(&path);
            let appender = tracing_appender::rolling::daily(dir, prefix);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            install(filter, format, writer, false);
            LogGuard {
                _file_guard: Some(guard),
            }
        }
        None => {
            install(filter, format, io::stderr, io::stderr().is_terminal());
            LogGuard { _file_guard: None }
        }
    }
}

fn install<W>(filter: EnvFilter, format: LogFormat, writer: W, ansi: bool)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi);

    match format {
        LogFormat::Json => builder.json().flatten_event(true).init(),
        LogFormat::Pretty => builder.compact().init(),
    }
}

pub(crate) fn split_log_path(path: &Path) -> (PathBuf, String) {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let prefix = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "tailrelay.log".to_owned());
    (dir, prefix)
}
