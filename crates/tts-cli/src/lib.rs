pub mod cli;
pub mod config;

pub use cli::{
    build_cli_command, Cli, Commands, ConfigCommands, OutputFormat, PolicyArg,
};
pub use config::{load_config, TtsConfig};
