use clap::{CommandFactory, Parser, Subcommand, ValueEnum, ValueHint};
use clap_complete::Shell;
use std::path::PathBuf;
use tts_core::ConservatorPolicy;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Set the logging level (defaults to the configured level)
    #[arg(long)]
    pub log_level: Option<tracing::Level>,

    /// Use this configuration file instead of ~/.tts/config/tts.toml
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify one transformer and estimate its test schedule
    Classify {
        /// Transformer identifier (order code)
        id: String,
        /// Record CSV file
        #[arg(long, value_hint = ValueHint::FilePath)]
        records: Option<PathBuf>,
        /// Parameter table JSON file
        #[arg(long, value_hint = ValueHint::FilePath)]
        table: Option<PathBuf>,
        /// How conservator presence affects the EHV rule
        #[arg(long, value_enum)]
        policy: Option<PolicyArg>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Classify every record of a file in parallel and write a manifest
    Batch {
        #[arg(long, value_hint = ValueHint::FilePath)]
        records: Option<PathBuf>,
        #[arg(long, value_hint = ValueHint::FilePath)]
        table: Option<PathBuf>,
        /// Output directory for batch_manifest.json
        #[arg(short, long, value_hint = ValueHint::DirPath)]
        out: Option<PathBuf>,
        /// Worker threads (0 = all cores)
        #[arg(long)]
        threads: Option<usize>,
        #[arg(long, value_enum)]
        policy: Option<PolicyArg>,
    },
    /// Compare classifications against the labels of a record file
    Evaluate {
        #[arg(long, value_hint = ValueHint::FilePath)]
        records: Option<PathBuf>,
        #[arg(long, value_enum)]
        policy: Option<PolicyArg>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Check a record file and parameter table for gaps
    Validate {
        #[arg(long, value_hint = ValueHint::FilePath)]
        records: Option<PathBuf>,
        /// Also check table coverage
        #[arg(long, value_hint = ValueHint::FilePath)]
        table: Option<PathBuf>,
    },
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
        /// Write output to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
    /// Write the default configuration file if it does not exist
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    Ignore,
    ExcludeEhv,
}

impl From<PolicyArg> for ConservatorPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Ignore => ConservatorPolicy::Ignore,
            PolicyArg::ExcludeEhv => ConservatorPolicy::ExcludeEhv,
        }
    }
}

pub fn build_cli_command() -> clap::Command {
    Cli::command()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        build_cli_command().debug_assert();
    }

    #[test]
    fn classify_parses_policy_and_format() {
        let cli = Cli::try_parse_from([
            "tts-cli",
            "classify",
            "T-1",
            "--policy",
            "exclude-ehv",
            "--format",
            "json",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Classify {
                id, policy, format, ..
            }) => {
                assert_eq!(id, "T-1");
                assert_eq!(policy, Some(PolicyArg::ExcludeEhv));
                assert_eq!(format, OutputFormat::Json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn log_level_is_optional() {
        let cli = Cli::try_parse_from(["tts-cli", "--log-level", "debug", "config", "show"]).unwrap();
        assert_eq!(cli.log_level, Some(tracing::Level::DEBUG));
    }
}
