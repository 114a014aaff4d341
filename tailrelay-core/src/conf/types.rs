use crate::logs::TailOptions;
use crate::logs::constants::{DEFAULT_DUMP_LINES, DEFAULT_TAIL_BUFFER_EVENTS};
use crate::migration::WatchOptions;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.tailrelay.dev";
pub const DEFAULT_UPDATE_URL: &str = "https://dl.tailrelay.dev/version";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    pub api: ApiConfig,
    pub logs: LogsConfig,
    pub watch: WatchConfig,
    pub update: UpdateConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_API_URL.to_owned(),
            token: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogsConfig {
    pub default_lines: usize,
    pub color: bool,
    pub reconnect_delay_ms: u64,
    /// Unset retries forever.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_reconnect_attempts: Option<u32>,
    pub tail_buffer_events: usize,
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            default_lines: DEFAULT_DUMP_LINES,
            color: true,
            reconnect_delay_ms: 1000,
            max_reconnect_attempts: None,
            tail_buffer_events: DEFAULT_TAIL_BUFFER_EVENTS,
        }
    }
}

impl LogsConfig {
    pub fn tail_options(&self) -> TailOptions {
        TailOptions {
            reconnect_delay: Duration::from_millis(self.reconnect_delay_ms),
            max_reconnect_attempts: self.max_reconnect_attempts,
            buffer_events: self.tail_buffer_events,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WatchConfig {
    pub poll_interval_ms: u64,
    pub repaint_interval_ms: u64,
    pub fetch_retries: u32,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1000,
            repaint_interval_ms: 100,
            fetch_retries: 0,
        }
    }
}

impl WatchConfig {
    pub fn watch_options(&self) -> WatchOptions {
        WatchOptions {
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            repaint_interval: Duration::from_millis(self.repaint_interval_ms),
            fetch_retries: self.fetch_retries,
            ..WatchOptions::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UpdateConfig {
    pub enabled: bool,
    pub url: String,
    pub timeout_ms: u64,
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: DEFAULT_UPDATE_URL.to_owned(),
            timeout_ms: 4000,
        }
    }
}
