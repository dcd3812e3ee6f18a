//! Integration tests for configuration loading

use sweepgen::config::{ConfigLoader, SweepConfig};
use sweepgen::error::SweepError;
use sweepgen::sweep::{FlagValue, SweepPlan};
use tempfile::TempDir;

use crate::integration::with_sweep_env;

const SMALL_SWEEP: &str = r#"
label = "gpt2"
start_index = 2
masks = []

[job]
gpus = 2
partition = "gpu"

[invocation]
models = ["gpt2"]
datasets = ["imdb"]
binarize = false

[[variants]]
name = "net"
flag = "--net"
values = ["ccs", "eigen"]

[[variants]]
name = "norm"
flag = "--norm"
values = ["burns", "<omit>"]

[[exclusions]]
name = "eigen-burns"
when = [{ key = "net", value = "eigen" }, { key = "norm", value = "burns" }]
"#;

#[test]
fn test_empty_workspace_uses_defaults() {
    let test_dir = TempDir::new().unwrap();
    with_sweep_env(&test_dir, &[], || {
        let config = ConfigLoader::load(test_dir.path()).unwrap();
        assert_eq!(config.label, "llama-7b");
        assert_eq!(config.job.gpus, 5);
        assert_eq!(config.variants, SweepConfig::default().variants);
        assert_eq!(config.exclusions.len(), 5);
        assert_eq!(config.script.notify_endpoint.as_deref(), Some("ntfy.sh/derpy"));
    });
}

#[test]
fn test_workspace_file_replaces_lists() {
    let test_dir = TempDir::new().unwrap();
    std::fs::write(test_dir.path().join("sweepgen.toml"), SMALL_SWEEP).unwrap();

    with_sweep_env(&test_dir, &[], || {
        let config = ConfigLoader::load(test_dir.path()).unwrap();
        assert_eq!(config.label, "gpt2");
        assert_eq!(config.start_index, 2);
        assert_eq!(config.job.gpus, 2);
        assert_eq!(config.job.partition, "gpu");
        assert_eq!(config.job.time, "2-0");
        assert_eq!(config.variants.len(), 2);
        assert_eq!(config.variants[1].values[1], FlagValue::Omit);
        assert!(config.masks.is_empty());

        let plan = SweepPlan::build(&config).unwrap();
        let commands: Vec<&str> = plan.commands().collect();
        assert_eq!(
            commands,
            vec![
                "elk sweep --models gpt2 --datasets 'imdb' --net=ccs --norm=burns --num_gpus 2",
                "elk sweep --models gpt2 --datasets 'imdb' --net=ccs --num_gpus 2",
                "elk sweep --models gpt2 --datasets 'imdb' --net=eigen --num_gpus 2",
            ]
        );
    });
}

#[test]
fn test_env_specific_file_and_variables_override() {
    let test_dir = TempDir::new().unwrap();
    std::fs::write(test_dir.path().join("sweepgen.toml"), SMALL_SWEEP).unwrap();
    std::fs::write(
        test_dir.path().join("sweepgen.cluster.toml"),
        "label = \"cluster\"\n",
    )
    .unwrap();

    with_sweep_env(
        &test_dir,
        &[("SWEEPGEN_ENV", "cluster"), ("SWEEPGEN_JOB__GPUS", "8")],
        || {
            let config = ConfigLoader::load(test_dir.path()).unwrap();
            assert_eq!(config.label, "cluster");
            assert_eq!(config.job.gpus, 8);
            assert_eq!(config.variants.len(), 2);
        },
    );
}

#[cfg(target_os = "linux")]
#[test]
fn test_global_file_is_lowest_precedence_file() {
    let test_dir = TempDir::new().unwrap();
    let global_dir = test_dir.path().join("config").join("sweepgen");
    std::fs::create_dir_all(&global_dir).unwrap();
    std::fs::write(
        global_dir.join("config.toml"),
        "label = \"global\"\n[job]\nnodes = 2\n",
    )
    .unwrap();
    std::fs::write(test_dir.path().join("sweepgen.toml"), "label = \"local\"\n").unwrap();

    with_sweep_env(&test_dir, &[], || {
        let config = ConfigLoader::load(test_dir.path()).unwrap();
        assert_eq!(config.label, "local");
        assert_eq!(config.job.nodes, 2);
    });
}

#[test]
fn test_explicit_file_skips_workspace_files() {
    let test_dir = TempDir::new().unwrap();
    std::fs::write(test_dir.path().join("sweepgen.toml"), "label = \"ignored\"\n").unwrap();
    let explicit = test_dir.path().join("small.conf");
    std::fs::write(&explicit, SMALL_SWEEP).unwrap();

    with_sweep_env(&test_dir, &[], || {
        let config = ConfigLoader::load_from_file(&explicit).unwrap();
        assert_eq!(config.label, "gpt2");
    });
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let test_dir = TempDir::new().unwrap();
    with_sweep_env(&test_dir, &[], || {
        let err = ConfigLoader::load_from_file(&test_dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, SweepError::ConfigError(ref msg) if msg.contains("not found")));
    });
}

#[test]
fn test_rule_on_unknown_key_fails_plan() {
    let test_dir = TempDir::new().unwrap();
    std::fs::write(
        test_dir.path().join("sweepgen.toml"),
        r#"
[[variants]]
name = "net"
flag = "--net"
values = ["ccs", "eigen"]
"#,
    )
    .unwrap();

    with_sweep_env(&test_dir, &[], || {
        // Default rules still mention norm, loss, and friends.
        let config = ConfigLoader::load(test_dir.path()).unwrap();
        let err = SweepPlan::build(&config).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Unknown variant key 'norm'"), "{}", msg);
    });
}
