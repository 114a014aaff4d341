use crate::conf::{load_config, redacted};
use serde::Serialize;
use std::path::Path;

pub fn dump(path: &Path, json: bool, yaml: bool) -> anyhow::Result<()> {
    let cfg = redacted(&load_config(path)?);
    if yaml && !json {
        dump_yaml(&cfg)
    } else {
        dump_json(&cfg)
    }
}

fn dump_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    println!("{s}");
    Ok(())
}

fn dump_yaml<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let s = serde_yaml::to_string(value)?;
    println!("{s}");
    Ok(())
}
