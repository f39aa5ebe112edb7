//! Configuration for the tts command line.
//! The default location is ~/.tts/config/tts.toml, or $TTS_HOME/config/tts.toml.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tts_core::ConservatorPolicy;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TtsConfig {
    /// Input file locations
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub classification: ClassificationConfig,
    #[serde(default)]
    pub batch: BatchConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataConfig {
    /// Transformer record CSV
    #[serde(default = "default_records")]
    pub records: String,
    /// Parameter table JSON
    #[serde(default = "default_parameter_table")]
    pub parameter_table: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            records: default_records(),
            parameter_table: default_parameter_table(),
        }
    }
}

fn default_records() -> String {
    "data/updated_data.csv".to_string()
}

fn default_parameter_table() -> String {
    "data/parameters.json".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ClassificationConfig {
    /// `ignore` or `exclude-ehv`
    #[serde(default)]
    pub conservator_policy: ConservatorPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchConfig {
    /// Worker threads (0 = all cores)
    #[serde(default)]
    pub threads: usize,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            threads: 0,
            output_dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> String {
    "out/batch".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TtsConfig {
    /// Configured log level. [`load_config`] rejects unparseable levels, so
    /// the `info` fallback only applies to hand-built configs.
    pub fn log_level(&self) -> tracing::Level {
        self.logging.level.parse().unwrap_or(tracing::Level::INFO)
    }

    pub fn validate(&self) -> Result<()> {
        self.logging.level.parse::<tracing::Level>().map_err(|_| {
            anyhow!(
                "invalid [logging] level '{}' (expected trace, debug, info, warn or error)",
                self.logging.level
            )
        })?;
        Ok(())
    }
}

/// The tts home directory: `$TTS_HOME`, else `~/.tts`.
pub fn tts_home() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os("TTS_HOME") {
        return Ok(PathBuf::from(home));
    }
    dirs::home_dir()
        .ok_or_else(|| anyhow!("Cannot determine home directory"))
        .map(|h| h.join(".tts"))
}

/// Location: <tts home>/config/tts.toml
pub fn default_config_path() -> Result<PathBuf> {
    Ok(tts_home()?.join("config").join("tts.toml"))
}

/// Load from `explicit`, or from the default path.
///
/// A missing default file yields defaults; a missing explicit file is an error.
pub fn load_config(explicit: Option<&Path>) -> Result<TtsConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let path = default_config_path()?;
            if !path.exists() {
                return Ok(TtsConfig::default());
            }
            path
        }
    };
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("reading config '{}'", path.display()))?;
    let config: TtsConfig = toml::from_str(&contents)
        .with_context(|| format!("parsing config '{}'", path.display()))?;
    config
        .validate()
        .with_context(|| format!("checking config '{}'", path.display()))?;
    Ok(config)
}

pub fn save_config(path: &Path, config: &TtsConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating config directory '{}'", parent.display()))?;
    }
    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)
        .with_context(|| format!("writing config '{}'", path.display()))?;
    Ok(())
}
