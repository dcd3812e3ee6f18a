//! CLI parse: clap types for sweepgen. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Sweepgen CLI - generate sequential parameter-sweep scripts
#[derive(Parser)]
#[command(name = "sweepgen")]
#[command(about = "Generate shell scripts that run filtered parameter sweeps")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace directory (config lookup and default script location)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the sweep script and mark it executable
    Generate {
        /// Script path (default: output_template under the workspace)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Index the run loop starts from
        #[arg(long)]
        start: Option<usize>,
        /// Label substituted into the output file name
        #[arg(long)]
        label: Option<String>,
        /// Print the script instead of writing it
        #[arg(long)]
        dry_run: bool,
    },
    /// List surviving combinations and the rules that removed the rest
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Summarize a status file written by a generated script
    Status {
        /// Path to the commands_status-<n>.csv file
        path: PathBuf,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Inspect the effective configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
    /// Validate variants, exclusion rules, and masks
    Validate,
}
