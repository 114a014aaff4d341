use crate::conf::{ConfigError, load_config};
use std::path::Path;

pub fn check(path: &Path) -> anyhow::Result<()> {
    match load_config(path) {
        Ok(cfg) => {
            println!("✔ Config loaded successfully");
            println!("✔ API at {}", cfg.api.url);
            println!(
                "✔ API token {}",
                if cfg.api.token.is_some() { "set" } else { "not set" }
            );
            match cfg.logs.max_reconnect_attempts {
                Some(max) => println!("✔ Reconnects capped at {max} attempts"),
                None => println!("✔ Reconnects retry forever"),
            }
            println!(
                "✔ Update checker {}",
                if cfg.update.enabled { "enabled" } else { "disabled" }
            );
            Ok(())
        }
        Err(err) => {
            if let Some(hint) = config_error_hint(&err) {
                eprintln!("{hint}");
            }
            Err(err.into())
        }
    }
}

pub fn config_error_hint(err: &ConfigError) -> Option<&'static str> {
    match err {
        ConfigError::Invalid {
            field: "api.url", ..
        } => Some(
            "The API URL must be absolute.\n\
             \n\
             Example:\n\
             \n\
             [api]\n\
             url = \"https://api.tailrelay.dev\"",
        ),
        ConfigError::Parse { .. } => Some(
            "Known sections are [api], [logs], [watch] and [update].",
        ),
        _ => None,
    }
}
