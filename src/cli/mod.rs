//! CLI module for course-api
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing with clap
//! - Configuration merging (CLI args + config files)
//! - Command execution and validation
//! - Command handlers for serve and migrate operations

pub mod config_merger;
pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

pub use config_merger::ConfigurationMerger;
pub use executor::execute_command;
pub use parser::{Cli, Commands, Environment, LogLevel};

use anyhow::Context;
use clap::Parser;

use crate::config::Settings;
use crate::logger::init_logger;

/// Parse arguments, load configuration, start logging and run the command
///
/// # Errors
/// Returns error if configuration loading, logger setup or the command fails
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let merger = ConfigurationMerger::from_cli(&cli).context("Failed to load configuration")?;
    let settings = merger
        .merge_cli_args(&cli)
        .context("Invalid configuration")?;

    init_logger_from_settings(&settings)?;
    tracing::debug!(environment = %merger.environment(), "Configuration loaded");

    execute_command(&cli, settings, merger.environment()).await
}

/// Initialize logger from settings
///
/// # Errors
/// Returns error if the logger settings are invalid or a subscriber is
/// already installed
pub fn init_logger_from_settings(settings: &Settings) -> anyhow::Result<()> {
    let logger_config = settings
        .logger
        .clone()
        .into_logger_config()
        .context("Logger configuration error")?;
    init_logger(logger_config).context("Logger initialization error")
}
