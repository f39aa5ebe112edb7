use clap::Parser;
use std::process;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;
use tts_cli::{load_config, Cli, Commands};

use crate::commands::util::{policy, records_path, table_path};

mod commands;

fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("failed to load configuration: {err:#}");
            process::exit(2);
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level.unwrap_or_else(|| config.log_level()))
        .with_writer(std::io::stderr)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("setting default subscriber failed: {err}");
    }

    let result = match &cli.command {
        Some(Commands::Classify {
            id,
            records,
            table,
            policy: policy_flag,
            format,
        }) => commands::classify::handle(
            id,
            &records_path(records.as_deref(), &config),
            &table_path(table.as_deref(), &config),
            policy(*policy_flag, &config),
            *format,
        ),
        Some(Commands::Batch {
            records,
            table,
            out,
            threads,
            policy: policy_flag,
        }) => {
            let out = out
                .clone()
                .unwrap_or_else(|| config.batch.output_dir.clone().into());
            commands::batch::handle(
                &records_path(records.as_deref(), &config),
                &table_path(table.as_deref(), &config),
                &out,
                threads.unwrap_or(config.batch.threads),
                policy(*policy_flag, &config),
            )
        }
        Some(Commands::Evaluate {
            records,
            policy: policy_flag,
            format,
        }) => commands::evaluate::handle(
            &records_path(records.as_deref(), &config),
            policy(*policy_flag, &config),
            *format,
        ),
        Some(Commands::Validate { records, table }) => {
            commands::validate::handle(&records_path(records.as_deref(), &config), table.as_deref())
        }
        Some(Commands::Config { command }) => {
            commands::config::handle(command, cli.config.as_deref(), &config)
        }
        Some(Commands::Completions { shell, out }) => {
            commands::completions::handle(*shell, out.as_deref())
        }
        None => {
            info!("No subcommand provided. Use `tts-cli --help` for more information.");
            Ok(())
        }
    };

    if let Err(err) = result {
        error!("{err:#}");
        process::exit(1);
    }
}
