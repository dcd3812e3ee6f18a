//! Config loading facade: assembles sources in precedence order and deserializes.

use crate::config::merge::builder_with_defaults;
use crate::config::sources::{environment, global_file, workspace_file};
use crate::config::SweepConfig;
use crate::error::SweepError;
use config::{File, FileFormat};
use std::path::Path;
use tracing::debug;

/// Loads [`SweepConfig`] from defaults, files, and the environment.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Defaults, then the global file, then workspace files, then `SWEEPGEN_*` variables.
    pub fn load(workspace_root: &Path) -> Result<SweepConfig, SweepError> {
        let builder = builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = environment::add_to_builder(builder);

        let config: SweepConfig = builder.build()?.try_deserialize()?;
        debug!(
            workspace = %workspace_root.display(),
            variants = config.variants.len(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Defaults, then exactly `path` (TOML, must exist), then `SWEEPGEN_*` variables.
    pub fn load_from_file(path: &Path) -> Result<SweepConfig, SweepError> {
        if !path.exists() {
            return Err(SweepError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        let builder = builder_with_defaults()?
            .add_source(File::from(path).format(FileFormat::Toml).required(true));
        let builder = environment::add_to_builder(builder);

        let config: SweepConfig = builder.build()?.try_deserialize()?;
        debug!(config_path = %path.display(), "Configuration loaded from file");
        Ok(config)
    }
}
