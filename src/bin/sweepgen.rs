//! Sweepgen CLI Binary
//!
//! Command-line interface for generating parameter-sweep scripts.

use clap::Parser;
use std::process::ExitCode;
use sweepgen::cli::{map_error, Cli, RunContext};
use sweepgen::config::ConfigLoader;
use sweepgen::error::SweepError;
use sweepgen::logging::{init_logging, LoggingConfig};
use tracing::{debug, error};

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(Some(&build_logging_config(&cli))) {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "sweepgen failed");
            eprintln!("{}", map_error(&e));
            ExitCode::FAILURE
        }
    }
}

/// Load configuration for the selected workspace and dispatch the subcommand.
fn run(cli: &Cli) -> Result<String, SweepError> {
    debug!(
        workspace = %cli.workspace.display(),
        config = ?cli.config,
        "Loading sweep configuration"
    );
    let context = RunContext::new(cli.workspace.clone(), cli.config.clone())?;
    context.execute(&cli.command)
}

/// Build logging configuration from CLI args and config file.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let loaded = match cli.config {
        Some(ref config_path) => ConfigLoader::load_from_file(config_path),
        None => ConfigLoader::load(&cli.workspace),
    };
    let mut config = loaded.map(|c| c.logging).unwrap_or_default();

    if cli.quiet {
        config.enabled = false;
    }
    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
    }

    config
}
