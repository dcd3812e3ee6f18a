//! Sweep planning: validate the configuration, enumerate, filter, and render every
//! surviving combination into a numbered command.

use crate::config::SweepConfig;
use crate::error::SweepError;
use crate::script::status::{Status, StatusRecord};
use crate::sweep::combination::{checked_product_size, enumerate, Combination};
use crate::sweep::render::CommandRenderer;
use crate::sweep::rules::{filter, ExclusionCount};
use serde::Serialize;
use tracing::{debug, info, warn};

/// A surviving combination and the command rendered from it.
#[derive(Debug, Clone, Serialize)]
pub struct SweepEntry {
    pub index: usize,
    pub combination: Combination,
    pub command: String,
}

/// The full sweep: every surviving combination, rendered, in product order.
#[derive(Debug, Clone, Serialize)]
pub struct SweepPlan {
    pub entries: Vec<SweepEntry>,
    pub product_size: usize,
    pub exclusions: Vec<ExclusionCount>,
    pub start_index: usize,
}

impl SweepPlan {
    /// Validate `config`, enumerate, filter, and render.
    pub fn build(config: &SweepConfig) -> Result<Self, SweepError> {
        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            SweepError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;

        let product_size = checked_product_size(&config.variants).ok_or_else(|| {
            SweepError::ConfigError(format!(
                "Sweep over {} variant(s) has more combinations than can be enumerated",
                config.variants.len()
            ))
        })?;
        let outcome = filter(enumerate(&config.variants), &config.exclusions);
        for count in &outcome.excluded {
            debug!(rule = %count.rule, excluded = count.excluded, "Exclusion rule applied");
        }
        let excluded = outcome.total_excluded();

        let renderer = CommandRenderer::from_config(config);
        let entries: Vec<SweepEntry> = outcome
            .survivors
            .into_iter()
            .enumerate()
            .map(|(index, combination)| SweepEntry {
                index,
                command: renderer.render(&combination),
                combination,
            })
            .collect();

        info!(
            product = product_size,
            excluded,
            commands = entries.len(),
            "Sweep planned"
        );
        if config.start_index > 0 && config.start_index >= entries.len() {
            warn!(
                start_index = config.start_index,
                commands = entries.len(),
                "Start index is past the last command; the generated script will run nothing"
            );
        }

        Ok(Self {
            entries,
            product_size,
            exclusions: outcome.excluded,
            start_index: config.start_index,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn commands(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.command.as_str())
    }

    pub fn total_excluded(&self) -> usize {
        self.product_size - self.entries.len()
    }

    /// Rows the generated script writes to a fresh status file.
    pub fn initial_status_rows(&self) -> Vec<StatusRecord> {
        self.entries
            .iter()
            .map(|e| StatusRecord {
                index: e.index,
                status: Status::NotStarted,
                command: e.command.clone(),
            })
            .collect()
    }
}
