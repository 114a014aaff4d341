use crate::conf::{
    API_TOKEN_ENV, API_URL_ENV, ClientConfig, ConfigError, DISABLE_UPDATE_CHECKER_ENV,
    apply_env_overrides, load_config, load_file, redacted,
};
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn missing_file_yields_defaults() {
    // Arrange
    let dir = tempdir().unwrap();

    // Act
    let cfg = load_file(&dir.path().join("absent.toml")).unwrap();

    // Assert
    assert_eq!(cfg, ClientConfig::default());
    assert_eq!(cfg.logs.default_lines, 20);
    assert_eq!(cfg.logs.tail_buffer_events, 1024);
    assert_eq!(cfg.watch.repaint_interval_ms, 100);
}

#[test]
fn partial_file_keeps_defaults_for_missing_fields() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("tailrelay.toml");
    fs::write(
        &path,
        r#"
[api]
url = "http://127.0.0.1:9000"

[logs]
max_reconnect_attempts = 5
color = false
"#,
    )
    .unwrap();

    // Act
    let cfg = load_file(&path).unwrap();

    // Assert
    assert_eq!(cfg.api.url, "http://127.0.0.1:9000");
    assert_eq!(cfg.logs.max_reconnect_attempts, Some(5));
    assert!(!cfg.logs.color);
    assert_eq!(cfg.logs.reconnect_delay_ms, 1000);
    assert!(cfg.update.enabled);
}

#[test]
fn tail_options_follow_logs_section() {
    // Arrange
    let mut cfg = ClientConfig::default();
    cfg.logs.reconnect_delay_ms = 250;
    cfg.logs.max_reconnect_attempts = Some(3);

    // Act
    let options = cfg.logs.tail_options();

    // Assert
    assert_eq!(options.reconnect_delay, Duration::from_millis(250));
    assert_eq!(options.max_reconnect_attempts, Some(3));
    assert_eq!(options.buffer_events, 1024);
}

#[test]
fn malformed_toml_is_a_parse_error() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("tailrelay.toml");
    fs::write(&path, "[logs\ndefault_lines = ").unwrap();

    // Act
    let err = load_file(&path).unwrap_err();

    // Assert
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn unknown_field_is_rejected() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("tailrelay.toml");
    fs::write(&path, "[logs]\nlines = 10\n").unwrap();

    // Act
    let err = load_file(&path).unwrap_err();

    // Assert
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn zero_default_lines_fails_validation() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("tailrelay.toml");
    fs::write(&path, "[logs]\ndefault_lines = 0\n").unwrap();

    // Act
    let err = load_config(&path).unwrap_err();

    // Assert
    assert!(matches!(
        err,
        ConfigError::Invalid {
            field: "logs.default_lines",
            ..
        }
    ));
}

#[test]
fn zero_reconnect_delay_fails_validation() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("tailrelay.toml");
    fs::write(&path, "[logs]\nreconnect_delay_ms = 0\n").unwrap();

    // Act
    let err = load_config(&path).unwrap_err();

    // Assert
    assert!(matches!(
        err,
        ConfigError::Invalid {
            field: "logs.reconnect_delay_ms",
            ..
        }
    ));
}

#[test]
fn env_overrides_replace_file_values() {
    // Arrange
    let mut cfg = ClientConfig::default();
    let env = env_from(&[
        (API_URL_ENV, "http://localhost:4000"),
        (API_TOKEN_ENV, "tk-123"),
        (DISABLE_UPDATE_CHECKER_ENV, "true"),
    ]);

    // Act
    apply_env_overrides(&mut cfg, env);

    // Assert
    assert_eq!(cfg.api.url, "http://localhost:4000");
    assert_eq!(cfg.api.token.as_deref(), Some("tk-123"));
    assert!(!cfg.update.enabled);
}

#[test]
fn falsy_disable_flag_keeps_update_checker() {
    // Arrange
    let mut cfg = ClientConfig::default();

    // Act
    apply_env_overrides(&mut cfg, env_from(&[(DISABLE_UPDATE_CHECKER_ENV, "0")]));

    // Assert
    assert!(cfg.update.enabled);
}

#[test]
fn redacted_config_hides_token() {
    // Arrange
    let mut cfg = ClientConfig::default();
    cfg.api.token = Some("secret".to_string());

    // Act
    let shown = redacted(&cfg);

    // Assert
    assert_eq!(shown.api.token.as_deref(), Some("<redacted>"));
    assert_eq!(cfg.api.token.as_deref(), Some("secret"));
}
