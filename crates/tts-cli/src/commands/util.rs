use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tts_cli::{PolicyArg, TtsConfig};
use tts_core::ConservatorPolicy;

/// Command-line path if given, otherwise the configured one.
pub fn pick_path(flag: Option<&Path>, configured: &str) -> PathBuf {
    flag.map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(configured))
}

pub fn records_path(flag: Option<&Path>, config: &TtsConfig) -> PathBuf {
    pick_path(flag, &config.data.records)
}

pub fn table_path(flag: Option<&Path>, config: &TtsConfig) -> PathBuf {
    pick_path(flag, &config.data.parameter_table)
}

pub fn policy(flag: Option<PolicyArg>, config: &TtsConfig) -> ConservatorPolicy {
    flag.map(ConservatorPolicy::from)
        .unwrap_or(config.classification.conservator_policy)
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    serde_json::to_writer_pretty(io::stdout(), value).context("serializing output to JSON")?;
    println!();
    Ok(())
}
