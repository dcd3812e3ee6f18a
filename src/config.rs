//! Configuration System
//!
//! Everything the generator reads lives in [`SweepConfig`]: job resources, the base
//! invocation, script file naming, the variant list, and the rules applied to it. Every
//! field defaults to the sweep the tool was built for, so an empty config file is valid.

use crate::logging::LoggingConfig;
use crate::sweep::rules::{default_exclusions, default_masks, ExclusionRule, RenderMask};
use crate::sweep::variant::{default_variants, Variant};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Label substituted into `output_template`
    #[serde(default = "default_label")]
    pub label: String,

    /// Script file name; `{label}` is replaced with `label`
    #[serde(default = "default_output_template")]
    pub output_template: String,

    /// Index the generated run loop starts from (resume point)
    #[serde(default)]
    pub start_index: usize,

    #[serde(default)]
    pub job: JobConfig,

    #[serde(default)]
    pub invocation: InvocationConfig,

    #[serde(default)]
    pub script: ScriptConfig,

    /// Variants in product order (first varies slowest)
    #[serde(default = "default_variants")]
    pub variants: Vec<Variant>,

    #[serde(default = "default_exclusions")]
    pub exclusions: Vec<ExclusionRule>,

    #[serde(default = "default_masks")]
    pub masks: Vec<RenderMask>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_label() -> String {
    "llama-7b".to_string()
}

fn default_output_template() -> String {
    "sweep-not-291-{label}.sh".to_string()
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            label: default_label(),
            output_template: default_output_template(),
            start_index: 0,
            job: JobConfig::default(),
            invocation: InvocationConfig::default(),
            script: ScriptConfig::default(),
            variants: default_variants(),
            exclusions: default_exclusions(),
            masks: default_masks(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Batch scheduler resources written into the script header
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    #[serde(default = "default_nodes")]
    pub nodes: u32,

    /// GPUs per node; also passed to every command as `--num_gpus`
    #[serde(default = "default_gpus")]
    pub gpus: u32,

    #[serde(default = "default_time")]
    pub time: String,

    #[serde(default = "default_partition")]
    pub partition: String,

    #[serde(default = "default_job_name")]
    pub job_name: String,
}

fn default_nodes() -> u32 {
    1
}

fn default_gpus() -> u32 {
    5
}

fn default_time() -> String {
    "2-0".to_string()
}

fn default_partition() -> String {
    "single".to_string()
}

fn default_job_name() -> String {
    "elk_sweep_alpha".to_string()
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            nodes: default_nodes(),
            gpus: default_gpus(),
            time: default_time(),
            partition: default_partition(),
            job_name: default_job_name(),
        }
    }
}

/// Fixed part of every generated command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvocationConfig {
    #[serde(default = "default_program")]
    pub program: String,

    #[serde(default = "default_subcommand")]
    pub subcommand: String,

    #[serde(default = "default_models")]
    pub models: Vec<String>,

    #[serde(default = "default_datasets")]
    pub datasets: Vec<String>,

    #[serde(default = "default_true")]
    pub binarize: bool,
}

fn default_program() -> String {
    "elk".to_string()
}

fn default_subcommand() -> String {
    "sweep".to_string()
}

fn default_models() -> Vec<String> {
    vec!["huggyllama/llama-7b".to_string()]
}

fn default_datasets() -> Vec<String> {
    [
        "ag_news",
        "amazon_polarity",
        "dbpedia_14",
        "glue:qnli",
        "imdb",
        "piqa",
        "super_glue:boolq",
        "super_glue:copa",
        "super_glue:rte",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_true() -> bool {
    true
}

impl Default for InvocationConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            subcommand: default_subcommand(),
            models: default_models(),
            datasets: default_datasets(),
            binarize: default_true(),
        }
    }
}

impl InvocationConfig {
    /// `--models a b`
    pub fn models_flag(&self) -> String {
        let mut flag = "--models".to_string();
        for model in &self.models {
            flag.push(' ');
            flag.push_str(model);
        }
        flag
    }

    /// `--datasets 'a' 'b'`
    pub fn datasets_flag(&self) -> String {
        let mut flag = "--datasets".to_string();
        for dataset in &self.datasets {
            flag.push_str(&format!(" '{}'", dataset));
        }
        flag
    }
}

/// Names and side channels used by the generated script at run time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptConfig {
    /// Run log is `<log_prefix>-<n>.txt` for the first unused `n`
    #[serde(default = "default_log_prefix")]
    pub log_prefix: String,

    /// Status file is `<status_prefix>-<n>.csv` for the first unused `n`
    #[serde(default = "default_status_prefix")]
    pub status_prefix: String,

    /// Endpoint for `curl -d` notifications; none are sent when unset
    #[serde(default = "default_notify_endpoint")]
    pub notify_endpoint: Option<String>,

    /// Directory hint echoed as a comment before the command list
    #[serde(default = "default_workdir_hint")]
    pub workdir_hint: Option<String>,

    /// Name recorded in the provenance comment
    #[serde(default = "default_generator")]
    pub generator: String,
}

fn default_log_prefix() -> String {
    "not-133-sweep-out".to_string()
}

fn default_status_prefix() -> String {
    "commands_status".to_string()
}

fn default_notify_endpoint() -> Option<String> {
    Some("ntfy.sh/derpy".to_string())
}

fn default_workdir_hint() -> Option<String> {
    Some("../elk".to_string())
}

fn default_generator() -> String {
    "sweepgen".to_string()
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            log_prefix: default_log_prefix(),
            status_prefix: default_status_prefix(),
            notify_endpoint: default_notify_endpoint(),
            workdir_hint: default_workdir_hint(),
            generator: default_generator(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Variant(String, String),
    Exclusion(String, String),
    Mask(String, String),
    Script(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Variant(name, msg) => write!(f, "Variant '{}': {}", name, msg),
            ValidationError::Exclusion(name, msg) => write!(f, "Exclusion '{}': {}", name, msg),
            ValidationError::Mask(key, msg) => write!(f, "Mask on '{}': {}", key, msg),
            ValidationError::Script(msg) => write!(f, "Script: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl SweepConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        let mut keys = HashSet::new();
        for variant in &self.variants {
            if let Err(e) = variant.validate() {
                errors.push(ValidationError::Variant(variant.name.clone(), e));
            }
            if !keys.insert(variant.key()) {
                errors.push(ValidationError::Variant(
                    variant.name.clone(),
                    format!("Duplicate variant key '{}'", variant.key()),
                ));
            }
        }

        for rule in &self.exclusions {
            if rule.when.is_empty() {
                errors.push(ValidationError::Exclusion(
                    rule.name.clone(),
                    "Rule must have at least one condition".to_string(),
                ));
            }
            for key in rule.keys() {
                if !keys.contains(key) {
                    errors.push(ValidationError::Exclusion(
                        rule.name.clone(),
                        format!("Unknown variant key '{}'", key),
                    ));
                }
            }
        }

        for mask in &self.masks {
            for key in [mask.when.key.as_str(), mask.suppress.as_str()] {
                if !keys.contains(key) {
                    errors.push(ValidationError::Mask(
                        mask.suppress.clone(),
                        format!("Unknown variant key '{}'", key),
                    ));
                }
            }
        }

        if self.script.log_prefix.trim().is_empty() {
            errors.push(ValidationError::Script("Log prefix cannot be empty".to_string()));
        }
        if self.script.status_prefix.trim().is_empty() {
            errors.push(ValidationError::Script(
                "Status prefix cannot be empty".to_string(),
            ));
        }
        if self.output_template.trim().is_empty() {
            errors.push(ValidationError::Script(
                "Output template cannot be empty".to_string(),
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Script file name with `{label}` substituted.
    pub fn output_file_name(&self) -> String {
        self.output_template.replace("{label}", &self.label)
    }

    /// Script path under `dir`.
    pub fn output_path(&self, dir: &Path) -> PathBuf {
        dir.join(self.output_file_name())
    }
}
