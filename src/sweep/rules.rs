//! Exclusion rules and render masks.
//!
//! Both are expressed as keyed conditions on a [`Combination`], so reordering the
//! variant list never changes what they match.

use crate::sweep::combination::Combination;
use crate::sweep::variant::{FlagValue, OMIT_SENTINEL};
use serde::{Deserialize, Serialize};
use std::fmt;

/// `key` is (or, with `negate`, is not) `value`.
///
/// A condition on a key the combination does not contain never holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub key: String,
    pub value: FlagValue,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub negate: bool,
}

impl Condition {
    pub fn is(key: &str, value: &str) -> Self {
        Self {
            key: key.to_string(),
            value: FlagValue::from(value),
            negate: false,
        }
    }

    pub fn omitted(key: &str) -> Self {
        Self::is(key, OMIT_SENTINEL)
    }

    pub fn present(key: &str) -> Self {
        Self {
            negate: true,
            ..Self::omitted(key)
        }
    }

    pub fn holds(&self, combo: &Combination) -> bool {
        match combo.get(&self.key) {
            Some(value) => (value == &self.value) != self.negate,
            None => false,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = if self.negate { "!=" } else { "==" };
        write!(f, "{} {} {}", self.key, op, self.value)
    }
}

/// Drops every combination for which all `when` conditions hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionRule {
    pub name: String,
    pub when: Vec<Condition>,
}

impl ExclusionRule {
    pub fn new(name: &str, when: Vec<Condition>) -> Self {
        Self {
            name: name.to_string(),
            when,
        }
    }

    pub fn matches(&self, combo: &Combination) -> bool {
        !self.when.is_empty() && self.when.iter().all(|c| c.holds(combo))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.when.iter().map(|c| c.key.as_str())
    }
}

/// Hides the `suppress` token at render time while `when` holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderMask {
    pub when: Condition,
    pub suppress: String,
}

impl RenderMask {
    pub fn new(when: Condition, suppress: &str) -> Self {
        Self {
            when,
            suppress: suppress.to_string(),
        }
    }

    pub fn hides(&self, key: &str, combo: &Combination) -> bool {
        self.suppress == key && self.when.holds(combo)
    }
}

pub fn default_exclusions() -> Vec<ExclusionRule> {
    vec![
        ExclusionRule::new(
            "eigen-without-burns-norm",
            vec![Condition::is("net", "eigen"), Condition::is("norm", "burns")],
        ),
        ExclusionRule::new(
            "eigen-without-prompt-var-loss",
            vec![
                Condition::is("net", "eigen"),
                Condition::is("loss", "ccs_prompt_var"),
            ],
        ),
        ExclusionRule::new(
            "ccs-without-neg-cov-weight",
            vec![Condition::is("net", "ccs"), Condition::present("neg_cov_weight")],
        ),
        ExclusionRule::new(
            "eigen-requires-neg-cov-weight",
            vec![Condition::is("net", "eigen"), Condition::omitted("neg_cov_weight")],
        ),
        // A single prompt gives the variance loss nothing to compare.
        ExclusionRule::new(
            "prompt-var-needs-multiple-prompts",
            vec![
                Condition::is("loss", "ccs_prompt_var"),
                Condition::is("prompt_indices", "1"),
            ],
        ),
    ]
}

pub fn default_masks() -> Vec<RenderMask> {
    vec![
        RenderMask::new(Condition::is("net", "eigen"), "norm"),
        // TODO: drop once ccs accepts --erase_prompt.
        RenderMask::new(Condition::is("net", "ccs"), "erase_prompt"),
    ]
}

/// How many combinations a rule removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExclusionCount {
    pub rule: String,
    pub excluded: usize,
}

/// Survivors in product order, with per-rule tallies.
#[derive(Debug, Clone)]
pub struct FilterOutcome {
    pub survivors: Vec<Combination>,
    pub excluded: Vec<ExclusionCount>,
}

impl FilterOutcome {
    pub fn total_excluded(&self) -> usize {
        self.excluded.iter().map(|c| c.excluded).sum()
    }
}

/// Remove every combination matched by any rule. The first matching rule is credited.
pub fn filter(combinations: Vec<Combination>, rules: &[ExclusionRule]) -> FilterOutcome {
    let mut excluded: Vec<ExclusionCount> = rules
        .iter()
        .map(|rule| ExclusionCount {
            rule: rule.name.clone(),
            excluded: 0,
        })
        .collect();

    let survivors = combinations
        .into_iter()
        .filter(|combo| match rules.iter().position(|rule| rule.matches(combo)) {
            Some(index) => {
                excluded[index].excluded += 1;
                false
            }
            None => true,
        })
        .collect();

    FilterOutcome {
        survivors,
        excluded,
    }
}
