//! Sweep enumeration: variants, their product, exclusion rules, and command rendering.

pub mod combination;
pub mod plan;
pub mod render;
pub mod rules;
pub mod variant;

pub use combination::{checked_product_size, enumerate, product_size, Choice, Combination};
pub use plan::{SweepEntry, SweepPlan};
pub use render::CommandRenderer;
pub use rules::{Condition, ExclusionCount, ExclusionRule, RenderMask};
pub use variant::{FlagValue, Variant, OMIT_SENTINEL};
