//! Property-based tests for sweep counts, token masking, and script agreement

use proptest::prelude::*;
use proptest::sample::subsequence;
use std::collections::BTreeSet;
use sweepgen::sweep::rules::{default_exclusions, default_masks};
use sweepgen::sweep::{enumerate, product_size, Variant, OMIT_SENTINEL};
use sweepgen::{generate_script, SweepConfig, SweepPlan};

/// Key, flag, and the pool of values a variant may draw from.
const AXES: &[(&str, &[&str])] = &[
    ("net", &["ccs", "eigen"]),
    ("norm", &["burns", OMIT_SENTINEL]),
    ("probe_per_prompt", &["True", "False"]),
    ("prompt_indices", &[OMIT_SENTINEL, "1", "0,1"]),
    ("neg_cov_weight", &[OMIT_SENTINEL, "0", "0.5", "1"]),
    ("loss", &["ccs_prompt_var", OMIT_SENTINEL]),
    ("erase_prompt", &["False", "True"]),
];

/// Every axis present, each with a non-empty subset of its pool, in declaration order.
fn variants_strategy() -> impl Strategy<Value = Vec<Variant>> {
    let axes: Vec<_> = AXES
        .iter()
        .map(|&(key, pool)| {
            let pool: Vec<&'static str> = pool.to_vec();
            let len = pool.len();
            subsequence(pool, 1..=len).prop_map(move |values| {
                Variant::new(key, &format!("--{}", key), values)
            })
        })
        .collect();
    axes
}

fn config_for(variants: Vec<Variant>) -> SweepConfig {
    SweepConfig {
        variants,
        ..SweepConfig::default()
    }
}

/// Survivor labels as a set of sorted key=value lists, independent of variant order.
fn survivor_set(plan: &SweepPlan) -> BTreeSet<Vec<String>> {
    plan.entries
        .iter()
        .map(|entry| {
            let mut pairs: Vec<String> = entry
                .combination
                .choices()
                .iter()
                .map(|c| format!("{}={}", c.key, c.value))
                .collect();
            pairs.sort();
            pairs
        })
        .collect()
}

/// Test that the command count is the product minus matched combinations
#[test]
fn test_count_is_product_minus_excluded() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&variants_strategy(), |variants| {
            let rules = default_exclusions();
            let matched = enumerate(&variants)
                .iter()
                .filter(|combo| rules.iter().any(|rule| rule.matches(combo)))
                .count();

            let plan = SweepPlan::build(&config_for(variants.clone())).unwrap();
            prop_assert_eq!(plan.product_size, product_size(&variants));
            prop_assert_eq!(plan.len(), product_size(&variants) - matched);
            Ok(())
        })
        .unwrap();
}

/// Test that omitted and masked variants never render a token
#[test]
fn test_omitted_and_masked_tokens_never_rendered() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&variants_strategy(), |variants| {
            let plan = SweepPlan::build(&config_for(variants)).unwrap();
            let masks = default_masks();
            for entry in &plan.entries {
                for choice in entry.combination.choices() {
                    let token = format!("{}=", choice.flag);
                    let masked = masks.iter().any(|m| m.hides(&choice.key, &entry.combination));
                    if choice.value.is_omitted() || masked {
                        prop_assert!(!entry.command.contains(&token), "{}", entry.command);
                    } else {
                        let expected = format!("{}{} ", token, choice.value);
                        prop_assert!(entry.command.contains(&expected), "{}", entry.command);
                    }
                }
                match entry.combination.value("net") {
                    Some("eigen") => prop_assert!(!entry.command.contains("--norm=")),
                    Some("ccs") => prop_assert!(!entry.command.contains("--erase_prompt=")),
                    _ => {}
                }
                prop_assert!(!(entry.command.contains("--loss=ccs_prompt_var")
                    && entry.command.contains("--prompt_indices=1 ")));
                prop_assert!(!(entry.command.contains("--net=eigen")
                    && entry.combination.value("norm") == Some("burns")));
            }
            Ok(())
        })
        .unwrap();
}

/// Test that the script's array and status initialization agree with the plan
#[test]
fn test_script_array_matches_plan() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&variants_strategy(), |variants| {
            let (plan, script) = generate_script(&config_for(variants)).unwrap();
            let entry_lines: Vec<&str> = script
                .lines()
                .filter(|line| line.starts_with("\"elk sweep "))
                .collect();
            prop_assert_eq!(entry_lines.len(), plan.len());
            prop_assert_eq!(plan.initial_status_rows().len(), plan.len());
            for (line, command) in entry_lines.iter().zip(plan.commands()) {
                let expected = format!("\"{}\"", command);
                prop_assert!(line.starts_with(&expected));
            }
            Ok(())
        })
        .unwrap();
}

/// Test that reordering variants keeps the same survivors
#[test]
fn test_survivors_independent_of_variant_order() {
    let mut runner = proptest::test_runner::TestRunner::default();
    let strategy = variants_strategy().prop_flat_map(|variants| {
        (Just(variants.clone()), Just(variants).prop_shuffle())
    });

    runner
        .run(&strategy, |(ordered, shuffled)| {
            let a = SweepPlan::build(&config_for(ordered)).unwrap();
            let b = SweepPlan::build(&config_for(shuffled)).unwrap();
            prop_assert_eq!(survivor_set(&a), survivor_set(&b));
            Ok(())
        })
        .unwrap();
}

#[test]
fn test_net_norm_pair_never_eigen_burns() {
    let variants = vec![
        Variant::new("net", "--net", ["ccs", "eigen"]),
        Variant::new("norm", "--norm", ["burns", OMIT_SENTINEL]),
        Variant::new("probe_per_prompt", "--probe_per_prompt", ["True"]),
        Variant::new("prompt_indices", "--prompt_indices", ["1"]),
        Variant::new("neg_cov_weight", "--neg_cov_weight", [OMIT_SENTINEL, "0.5"]),
        Variant::new("loss", "--loss", ["ccs_prompt_var", OMIT_SENTINEL]),
        Variant::new("erase_prompt", "--erase_prompt", ["False"]),
    ];
    let plan = SweepPlan::build(&config_for(variants)).unwrap();
    assert!(!plan.is_empty());
    for entry in &plan.entries {
        let combo = &entry.combination;
        assert!(!(combo.value("net") == Some("eigen") && combo.value("norm") == Some("burns")));
        assert_ne!(combo.value("loss"), Some("ccs_prompt_var"));
        assert!(!entry.command.contains("--loss=ccs_prompt_var"));
    }
}
