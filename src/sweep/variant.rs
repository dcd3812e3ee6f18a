//! Variants: named axes of variation and the values each may take.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Config spelling of the omission sentinel.
pub const OMIT_SENTINEL: &str = "<omit>";

/// One permissible value of a variant.
///
/// `Omit` means the flag is left off the command line entirely. In configuration files it
/// is written as [`OMIT_SENTINEL`]; every other string is taken verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FlagValue {
    Omit,
    Value(String),
}

impl FlagValue {
    pub fn value(value: impl Into<String>) -> Self {
        FlagValue::Value(value.into())
    }

    pub fn is_omitted(&self) -> bool {
        matches!(self, FlagValue::Omit)
    }

    /// The rendered value, or `None` for the sentinel.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FlagValue::Omit => None,
            FlagValue::Value(v) => Some(v.as_str()),
        }
    }
}

impl From<String> for FlagValue {
    fn from(raw: String) -> Self {
        if raw == OMIT_SENTINEL {
            FlagValue::Omit
        } else {
            FlagValue::Value(raw)
        }
    }
}

impl From<&str> for FlagValue {
    fn from(raw: &str) -> Self {
        FlagValue::from(raw.to_string())
    }
}

impl From<FlagValue> for String {
    fn from(value: FlagValue) -> Self {
        match value {
            FlagValue::Omit => OMIT_SENTINEL.to_string(),
            FlagValue::Value(v) => v,
        }
    }
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagValue::Omit => f.write_str(OMIT_SENTINEL),
            FlagValue::Value(v) => f.write_str(v),
        }
    }
}

/// A named axis of variation: a flag and the ordered values it sweeps over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// Stable key used by exclusion rules and render masks.
    /// Defaults to the flag with its leading dashes stripped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// Human-readable name, echoed into the script's provenance comments.
    pub name: String,

    /// Command-line flag, e.g. `--net`.
    pub flag: String,

    pub values: Vec<FlagValue>,
}

impl Variant {
    pub fn new<V>(name: &str, flag: &str, values: impl IntoIterator<Item = V>) -> Self
    where
        V: Into<FlagValue>,
    {
        Self {
            key: None,
            name: name.to_string(),
            flag: flag.to_string(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Override the derived key.
    pub fn with_key(mut self, key: &str) -> Self {
        self.key = Some(key.to_string());
        self
    }

    pub fn key(&self) -> &str {
        match self.key.as_deref() {
            Some(key) => key,
            None => self.flag.trim_start_matches('-'),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.flag.trim().is_empty() {
            return Err("Flag cannot be empty".to_string());
        }
        if self.key().is_empty() {
            return Err(format!("Flag '{}' does not yield a usable key", self.flag));
        }
        if self.values.is_empty() {
            return Err("Variant must list at least one value".to_string());
        }
        Ok(())
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values: Vec<String> = self.values.iter().map(ToString::to_string).collect();
        write!(f, "{} {} [{}]", self.name, self.flag, values.join(", "))
    }
}

/// The sweep the generator was built for, in declaration order.
pub fn default_variants() -> Vec<Variant> {
    vec![
        Variant::new("net", "--net", ["ccs", "eigen"]),
        Variant::new("norm", "--norm", ["burns", OMIT_SENTINEL]),
        Variant::new("per probe prompt", "--probe_per_prompt", ["True", "False"]),
        Variant::new("prompt indices", "--prompt_indices", [OMIT_SENTINEL]),
        Variant::new("neg_cov_weight", "--neg_cov_weight", [OMIT_SENTINEL, "0", "0.5", "1"]),
        Variant::new("loss", "--loss", ["ccs_prompt_var", OMIT_SENTINEL]),
        Variant::new("erase_prompt", "--erase_prompt", ["False", "True"]),
        Variant::new("visualize", "--visualize", ["True"]),
    ]
}
