//! Environment source: SWEEPGEN_<KEY>, nested keys joined with `__`
//! (e.g. SWEEPGEN_JOB__GPUS=8).

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix("SWEEPGEN")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    )
}
