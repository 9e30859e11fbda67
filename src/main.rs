//! dedot - clean the header line of delimited text files.

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use dedot::apply::ApplyMode;
use dedot::cli::{self, Cli, Commands};
use dedot::config::AppConfig;
use dedot::{core, logger};

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    if let Commands::Init { dry } = &cli.command {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        return cli::init::write_config(&cwd.join(&cli.config), *dry);
    }

    let config = AppConfig::load(&cli)?;

    match &cli.command {
        Commands::Run { args } => cli::process::process_command(&config, args, ApplyMode::Write),
        Commands::Check { args } => cli::process::process_command(&config, args, ApplyMode::DryRun),
        Commands::Header { lines, .. } => cli::header::print_cleaned(&config, lines),
        Commands::Init { .. } => Ok(()),
    }
}
