//! Tagsift CLI entry point.

use anyhow::Result;
use clap::Parser;

use tagsift::cli::{commands, handle_error, Cli, Commands, EXIT_FAILURE};
use tagsift::domain::models::Config;
use tagsift::infrastructure::config::ConfigLoader;
use tagsift::infrastructure::logging::{LogConfig, LoggerImpl};

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            handle_error(&err, cli.json);
            std::process::exit(EXIT_FAILURE);
        }
    };

    let logger = match LoggerImpl::init(&LogConfig::from(&config.logging)) {
        Ok(logger) => logger,
        Err(err) => {
            handle_error(&err, cli.json);
            std::process::exit(EXIT_FAILURE);
        }
    };

    let result = match cli.command {
        Commands::Browse(args) => commands::browse::execute(args, &config, cli.json).await,
        Commands::Sync(args) => commands::sync::execute(args, &config, cli.json).await,
        Commands::Report(args) => commands::report::execute(args, &config, cli.json).await,
    };

    let code = match result {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "command failed");
            handle_error(&err, cli.json);
            EXIT_FAILURE
        }
    };

    // Flush the file appender before exiting
    drop(logger);
    std::process::exit(code);
}
