//! CLI route: single route table and run context. Dispatches to the sweep planner, the
//! script emitter, and presentation.

use crate::cli::help::command_name;
use crate::cli::parse::{Commands, ConfigCommands};
use crate::cli::presentation::{
    format_config_valid, format_generate_summary, format_plan_json, format_plan_text,
    format_status_report_json, format_status_report_text,
};
use crate::config::{ConfigLoader, SweepConfig};
use crate::error::SweepError;
use crate::script::{write_script, StatusReport};
use crate::sweep::plan::SweepPlan;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info_span};

/// Runtime context for CLI execution: workspace root and loaded configuration.
pub struct RunContext {
    workspace_root: PathBuf,
    config: SweepConfig,
}

impl RunContext {
    /// Create run context from workspace root and optional config path. Uses ConfigLoader only.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, SweepError> {
        let config = match config_path {
            Some(ref cfg_path) => ConfigLoader::load_from_file(cfg_path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };
        Ok(Self::with_config(workspace_root, config))
    }

    pub fn with_config(workspace_root: PathBuf, config: SweepConfig) -> Self {
        Self {
            workspace_root,
            config,
        }
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, SweepError> {
        let _span = info_span!("command", command = %command_name(command)).entered();
        let started = Instant::now();
        let result = self.execute_inner(command);
        debug!(
            ok = result.is_ok(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        result
    }

    fn execute_inner(&self, command: &Commands) -> Result<String, SweepError> {
        match command {
            Commands::Generate {
                output,
                start,
                label,
                dry_run,
            } => self.handle_generate(output.as_deref(), *start, label.as_deref(), *dry_run),
            Commands::List { format } => {
                let plan = SweepPlan::build(&self.config)?;
                if format == "json" {
                    format_plan_json(&plan)
                } else {
                    Ok(format_plan_text(&plan, &self.config))
                }
            }
            Commands::Status { path, format } => {
                let text = std::fs::read_to_string(path)?;
                let report = StatusReport::from_csv(&text)?;
                if format == "json" {
                    format_status_report_json(&report)
                } else {
                    Ok(format_status_report_text(&report))
                }
            }
            Commands::Config { command } => self.handle_config_command(command),
        }
    }

    fn handle_generate(
        &self,
        output: Option<&Path>,
        start: Option<usize>,
        label: Option<&str>,
        dry_run: bool,
    ) -> Result<String, SweepError> {
        let mut config = self.config.clone();
        if let Some(start) = start {
            config.start_index = start;
        }
        if let Some(label) = label {
            config.label = label.to_string();
        }

        let (plan, script) = crate::generate_script(&config)?;
        if dry_run {
            return Ok(script);
        }

        let path = match output {
            Some(path) => path.to_path_buf(),
            None => config.output_path(&self.workspace_root),
        };
        write_script(&path, &script)?;
        Ok(format_generate_summary(&path, &plan))
    }

    fn handle_config_command(&self, command: &ConfigCommands) -> Result<String, SweepError> {
        match command {
            ConfigCommands::Show => Ok(toml::to_string_pretty(&self.config)?),
            ConfigCommands::Validate => {
                self.config.validate().map_err(|errors| {
                    let error_msgs: Vec<String> =
                        errors.iter().map(|e| format!("  - {}", e)).collect();
                    SweepError::ConfigError(format!(
                        "Configuration validation failed:\n{}",
                        error_msgs.join("\n")
                    ))
                })?;
                Ok(format_config_valid(&self.config))
            }
        }
    }
}
