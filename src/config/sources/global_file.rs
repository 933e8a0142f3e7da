//! Global config file: `$XDG_CONFIG_HOME/tree-ai/config.toml`

use crate::config::paths::xdg_root;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File, FileFormat};

/// Add the global file when it exists. An undeterminable config home is not an error.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    match xdg_root::global_config_path() {
        Ok(path) if path.is_file() => {
            tracing::debug!(path = %path.display(), "loading global config");
            Ok(builder.add_source(File::from(path).format(FileFormat::Toml)))
        }
        Ok(_) => Ok(builder),
        Err(e) => {
            tracing::debug!(error = %e, "no global config location");
            Ok(builder)
        }
    }
}
