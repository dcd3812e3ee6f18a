//! CLI presentation: text and json formatting of plans, status reports, and config checks.

use crate::config::SweepConfig;
use crate::error::SweepError;
use crate::script::status::StatusReport;
use crate::sweep::plan::SweepPlan;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde_json::json;
use std::path::Path;

pub fn format_generate_summary(path: &Path, plan: &SweepPlan) -> String {
    format!(
        "Wrote {} command(s) to {}\n  Combinations: {}\n  Excluded: {}\n  Start index: {}",
        plan.len(),
        path.display(),
        plan.product_size,
        plan.total_excluded(),
        plan.start_index
    )
}

pub fn format_plan_text(plan: &SweepPlan, config: &SweepConfig) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    let mut header = vec!["#".to_string()];
    header.extend(config.variants.iter().map(|v| v.key().to_string()));
    table.set_header(header);
    for entry in &plan.entries {
        let mut row = vec![entry.index.to_string()];
        row.extend(
            entry
                .combination
                .choices()
                .iter()
                .map(|choice| choice.value.to_string()),
        );
        table.add_row(row);
    }

    let mut output = table.to_string();
    output.push_str(&format!(
        "\n\nCommands: {} of {} combination(s)\n",
        plan.len(),
        plan.product_size
    ));
    if !plan.exclusions.is_empty() {
        output.push_str("Excluded by rule:\n");
        for count in &plan.exclusions {
            output.push_str(&format!("  {:<40} {}\n", count.rule, count.excluded));
        }
    }
    output
}

pub fn format_plan_json(plan: &SweepPlan) -> Result<String, SweepError> {
    let entries: Vec<_> = plan
        .entries
        .iter()
        .map(|entry| {
            let values: serde_json::Map<String, serde_json::Value> = entry
                .combination
                .choices()
                .iter()
                .map(|choice| {
                    let value = match choice.value.as_str() {
                        Some(v) => json!(v),
                        None => serde_json::Value::Null,
                    };
                    (choice.key.clone(), value)
                })
                .collect();
            json!({
                "index": entry.index,
                "values": values,
                "command": entry.command,
            })
        })
        .collect();
    let out = json!({
        "commands": entries,
        "total": plan.len(),
        "combinations": plan.product_size,
        "excluded": plan.exclusions,
        "start_index": plan.start_index,
    });
    Ok(serde_json::to_string_pretty(&out)?)
}

pub fn format_status_report_text(report: &StatusReport) -> String {
    let mut output = format!("Status: {} command(s)\n", report.rows.len());
    output.push_str(&format!("  {:<12} {}\n", "DONE".green(), report.done));
    output.push_str(&format!("  {:<12} {}\n", "RUNNING".yellow(), report.running));
    output.push_str(&format!("  {:<12} {}\n", "ERROR".red(), report.error));
    output.push_str(&format!("  {:<12} {}\n", "NOT STARTED", report.not_started));

    if let Some(index) = report.failed_index {
        let command = report
            .rows
            .iter()
            .find(|r| r.index == index)
            .map(|r| r.command.as_str())
            .unwrap_or_default();
        output.push_str(&format!("\nFailed at index {}: {}\n", index, command));
    }
    if report.is_complete() {
        output.push_str(&format!("\n{}\n", "All commands completed.".green()));
    } else if let Some(index) = report.resume_index {
        output.push_str(&format!(
            "\nResume with: sweepgen generate --start {}\n",
            index
        ));
    }
    output
}

pub fn format_status_report_json(report: &StatusReport) -> Result<String, SweepError> {
    Ok(serde_json::to_string_pretty(report)?)
}

pub fn format_config_valid(config: &SweepConfig) -> String {
    format!(
        "Configuration valid:\n  Variants: {}\n  Exclusion rules: {}\n  Render masks: {}",
        config.variants.len(),
        config.exclusions.len(),
        config.masks.len()
    )
}
