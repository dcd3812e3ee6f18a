//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with scalar defaults applied.
/// List-valued defaults (variants, rules, datasets) come from serde defaults, so a
/// file that sets them replaces the list instead of merging element-wise.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("label", "llama-7b")?
        .set_default("output_template", "sweep-not-291-{label}.sh")?
        .set_default("start_index", 0)?
        .set_default("job.nodes", 1)?
        .set_default("job.gpus", 5)
}
