//! CLI command-name contract for logging spans.

use crate::cli::parse::{Commands, ConfigCommands};

/// Command name string for log spans (e.g. "generate", "config.show").
pub fn command_name(command: &Commands) -> String {
    match command {
        Commands::Generate { .. } => "generate".to_string(),
        Commands::List { .. } => "list".to_string(),
        Commands::Status { .. } => "status".to_string(),
        Commands::Config { command } => format!("config.{}", config_command_name(command)),
    }
}

pub fn config_command_name(command: &ConfigCommands) -> &'static str {
    match command {
        ConfigCommands::Show => "show",
        ConfigCommands::Validate => "validate",
    }
}
