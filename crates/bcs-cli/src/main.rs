//! BCS CLI - Main entry point

use bcs_cli::commands;
use bcs_cli::{Cli, CliConfig, Commands};
use bcs_common::logging::{init_logging, LogConfig, LogOutput};
use clap::Parser;
use std::process;
use tracing::error;

#[tokio::main]
async fn main() {
    // Load .env before parsing so it can supply flag defaults
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if cli.version {
        commands::version::run();
        return;
    }

    // Ensure a command is provided
    let Some(command) = cli.command.as_ref() else {
        eprintln!("Error: A subcommand is required");
        eprintln!();
        eprintln!("For more information, try '--help'.");
        process::exit(2);
    };

    let config = CliConfig::from_cli(&cli);

    let log_config = LogConfig::builder()
        .level(config.log_level())
        .output(LogOutput::Console)
        .log_file_prefix("bcs-cli")
        .build();

    // Environment variables take precedence over the defaults above
    let log_config = log_config.clone().with_env_overrides().unwrap_or(log_config);

    // The CLI works without logging, so a failed init is not fatal
    let _ = init_logging(&log_config);

    if let Err(e) = execute_command(&config, command).await {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Execute the CLI command
async fn execute_command(config: &CliConfig, command: &Commands) -> bcs_cli::Result<()> {
    match command {
        Commands::Download {
            id,
            api_key,
            filename,
            timeout_secs,
        } => {
            commands::download::run(
                config,
                id.clone(),
                api_key.clone(),
                filename.clone(),
                *timeout_secs,
            )
            .await
        },

        Commands::Parse {
            filename,
            max_line_bytes,
            json,
        } => commands::parse::run(filename.clone(), *max_line_bytes, json.clone()).await,

        Commands::Version => {
            commands::version::run();
            Ok(())
        },
    }
}
