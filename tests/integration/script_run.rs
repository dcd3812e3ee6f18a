//! Integration tests that execute a generated script under bash
//!
//! A stand-in `elk` on PATH fails for `--net=eigen` and succeeds otherwise, so the
//! status file shows how the run loop records progress and stops.

#![cfg(target_os = "linux")]

use std::fs;
use std::path::Path;
use std::process::Command;
use sweepgen::script::{write_script, Status, StatusReport};
use sweepgen::sweep::{Variant, OMIT_SENTINEL};
use sweepgen::{generate_script, SweepConfig};
use tempfile::TempDir;

use crate::integration::sweepgen_command;

const FAKE_ELK: &str = r#"#!/bin/bash
case "$*" in
    *--net=eigen*) exit 1 ;;
esac
exit 0
"#;

fn run_config(start_index: usize, nets: &[&str]) -> SweepConfig {
    let mut config = SweepConfig {
        start_index,
        variants: vec![
            Variant::new("net", "--net", nets.iter().copied()),
            Variant::new("norm", "--norm", ["burns", OMIT_SENTINEL]),
        ],
        exclusions: vec![],
        masks: vec![],
        ..SweepConfig::default()
    };
    config.script.notify_endpoint = None;
    config
}

/// Write the script and a fake `elk` into `dir`, run it there, return the status file.
fn run_script(dir: &Path, config: &SweepConfig) -> String {
    let bin_dir = dir.join("bin");
    write_script(&bin_dir.join("elk"), FAKE_ELK).unwrap();

    let (_, script) = generate_script(config).unwrap();
    let script_path = dir.join("sweep.sh");
    write_script(&script_path, &script).unwrap();

    let path = format!(
        "{}:{}",
        bin_dir.display(),
        std::env::var("PATH").unwrap_or_default()
    );
    let status = Command::new("bash")
        .arg(&script_path)
        .current_dir(dir)
        .env("PATH", path)
        .status()
        .unwrap();
    assert!(status.success(), "script exited with {:?}", status);

    let log = fs::read_to_string(dir.join("not-133-sweep-out-0.txt")).unwrap();
    assert!(log.contains("All combinations completed."), "log={}", log);

    fs::read_to_string(dir.join("commands_status-0.csv")).unwrap()
}

#[test]
fn test_late_start_stops_at_first_failure() {
    let test_dir = TempDir::new().unwrap();
    let csv = run_script(test_dir.path(), &run_config(1, &["ccs", "eigen"]));

    let report = StatusReport::from_csv(&csv).unwrap();
    let statuses: Vec<Status> = report.rows.iter().map(|r| r.status).collect();
    assert_eq!(
        statuses,
        vec![
            Status::NotStarted,
            Status::Done,
            Status::Error,
            Status::NotStarted
        ]
    );
    assert_eq!(report.failed_index, Some(2));
    assert_eq!(report.resume_index, Some(2));
    assert!(report.rows[2].command.contains("--net=eigen --norm=burns"));
}

#[test]
fn test_late_start_completion_reports_nothing_left() {
    let test_dir = TempDir::new().unwrap();
    let csv = run_script(test_dir.path(), &run_config(1, &["ccs"]));

    let report = StatusReport::from_csv(&csv).unwrap();
    assert_eq!(report.done, 1);
    assert_eq!(report.not_started, 1);
    assert!(report.is_complete());
}

#[test]
fn test_status_command_on_executed_run() {
    let test_dir = TempDir::new().unwrap();
    let run_dir = test_dir.path().join("run");
    fs::create_dir_all(&run_dir).unwrap();
    run_script(&run_dir, &run_config(1, &["ccs", "eigen"]));

    let output = sweepgen_command(&test_dir)
        .arg("--workspace")
        .arg(test_dir.path())
        .arg("status")
        .arg(run_dir.join("commands_status-0.csv"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Failed at index 2"), "{}", stdout);
    assert!(stdout.contains("sweepgen generate --start 2"), "{}", stdout);
    assert!(!stdout.contains("--start 0"), "{}", stdout);
}
