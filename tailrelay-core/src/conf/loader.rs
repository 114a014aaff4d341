use crate::conf::error::ConfigError;
use crate::conf::types::ClientConfig;
use std::fs;
use std::path::Path;
use url::Url;

pub const API_URL_ENV: &str = "TAILRELAY_API_URL";
pub const API_TOKEN_ENV: &str = "TAILRELAY_API_TOKEN";
pub const DISABLE_UPDATE_CHECKER_ENV: &str = "TAILRELAY_DISABLE_UPDATE_CHECKER";

const REDACTED: &str = "<redacted>";

/// Loads the config file at `path`, applies environment overrides and
/// validates the result. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<ClientConfig, ConfigError> {
    let mut cfg = load_file(path)?;
    apply_env_overrides(&mut cfg, |key| std::env::var(key).ok());
    validate(&cfg)?;
    Ok(cfg)
}

pub fn load_file(path: &Path) -> Result<ClientConfig, ConfigError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(ClientConfig::default());
    }

    let raw = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    toml::from_str(&raw).map_err(|e| ConfigError::parse(path, e))
}

pub fn apply_env_overrides<F>(cfg: &mut ClientConfig, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = env(API_URL_ENV).filter(|v| !v.is_empty()) {
        cfg.api.url = url;
    }
    if let Some(token) = env(API_TOKEN_ENV).filter(|v| !v.is_empty()) {
        cfg.api.token = Some(token);
    }
    if let Some(flag) = env(DISABLE_UPDATE_CHECKER_ENV) {
        if is_truthy(&flag) {
            cfg.update.enabled = false;
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

pub fn validate(cfg: &ClientConfig) -> Result<(), ConfigError> {
    Url::parse(&cfg.api.url).map_err(|e| ConfigError::invalid("api.url", e.to_string()))?;

    if cfg.logs.default_lines == 0 {
        return Err(ConfigError::invalid("logs.default_lines", "must be at least 1"));
    }
    if cfg.logs.tail_buffer_events == 0 {
        return Err(ConfigError::invalid(
            "logs.tail_buffer_events",
            "must be at least 1",
        ));
    }
    if cfg.logs.reconnect_delay_ms == 0 {
        return Err(ConfigError::invalid(
            "logs.reconnect_delay_ms",
            "must be greater than zero",
        ));
    }
    if cfg.watch.poll_interval_ms == 0 {
        return Err(ConfigError::invalid(
            "watch.poll_interval_ms",
            "must be greater than zero",
        ));
    }
    if cfg.watch.repaint_interval_ms == 0 {
        return Err(ConfigError::invalid(
            "watch.repaint_interval_ms",
            "must be greater than zero",
        ));
    }
    if cfg.update.enabled {
        Url::parse(&cfg.update.url)
            .map_err(|e| ConfigError::invalid("update.url", e.to_string()))?;
    }

    Ok(())
}

/// Copy of `cfg` that is safe to print.
pub fn redacted(cfg: &ClientConfig) -> ClientConfig {
    let mut out = cfg.clone();
    if out.api.token.is_some() {
        out.api.token = Some(REDACTED.to_owned());
    }
    out
}
