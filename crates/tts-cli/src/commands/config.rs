use std::path::Path;

use anyhow::Result;
use tracing::info;
use tts_cli::config::{default_config_path, save_config};
use tts_cli::{ConfigCommands, TtsConfig};

pub fn handle(command: &ConfigCommands, explicit: Option<&Path>, config: &TtsConfig) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            print!("{}", toml::to_string_pretty(config)?);
            Ok(())
        }
        ConfigCommands::Init { force } => {
            let path = match explicit {
                Some(path) => path.to_path_buf(),
                None => default_config_path()?,
            };
            if path.exists() && !force {
                println!("Config already exists at {}", path.display());
                return Ok(());
            }
            save_config(&path, &TtsConfig::default())?;
            info!("wrote default config");
            println!("Wrote config to {}", path.display());
            Ok(())
        }
    }
}
