//! Cartesian product of variant values.

use crate::sweep::variant::{FlagValue, Variant};
use serde::Serialize;

/// The value one variant takes within a combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub key: String,
    pub flag: String,
    pub value: FlagValue,
}

/// One assignment of a value to every variant, in variant declaration order.
///
/// Rules address choices by key, never by position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Combination {
    choices: Vec<Choice>,
}

impl Combination {
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    pub fn get(&self, key: &str) -> Option<&FlagValue> {
        self.choices
            .iter()
            .find(|choice| choice.key == key)
            .map(|choice| &choice.value)
    }

    /// Rendered value for `key`; `None` when the key is absent or omitted.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(FlagValue::as_str)
    }

    /// Short label such as `net=eigen norm=<omit>`.
    pub fn label(&self) -> String {
        self.choices
            .iter()
            .map(|choice| format!("{}={}", choice.key, choice.value))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Number of combinations in the full product (before exclusions).
pub fn product_size(variants: &[Variant]) -> usize {
    variants.iter().map(|v| v.values.len()).product()
}

/// [`product_size`], or `None` when it does not fit in a `usize`.
pub fn checked_product_size(variants: &[Variant]) -> Option<usize> {
    variants
        .iter()
        .try_fold(1usize, |size, v| size.checked_mul(v.values.len()))
}

/// Enumerate the full product. The first variant varies slowest.
///
/// No variants yields a single empty combination; any variant without values yields none.
pub fn enumerate(variants: &[Variant]) -> Vec<Combination> {
    if variants.iter().any(|v| v.values.is_empty()) {
        return Vec::new();
    }

    let mut combinations = Vec::with_capacity(checked_product_size(variants).unwrap_or(0));
    let mut cursor = vec![0usize; variants.len()];

    loop {
        let choices = variants
            .iter()
            .zip(&cursor)
            .map(|(variant, &i)| Choice {
                key: variant.key().to_string(),
                flag: variant.flag.clone(),
                value: variant.values[i].clone(),
            })
            .collect();
        combinations.push(Combination { choices });

        // Odometer step from the last variant.
        let mut position = variants.len();
        loop {
            if position == 0 {
                return combinations;
            }
            position -= 1;
            cursor[position] += 1;
            if cursor[position] < variants[position].values.len() {
                break;
            }
            cursor[position] = 0;
        }
    }
}
