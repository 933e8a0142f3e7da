//! MergeService: orchestrates sources, applies merge policy, deserializes to TreeAiConfig.

use crate::config::sources::{environment, global_file, workspace_file};
use crate::config::TreeAiConfig;
use config::{ConfigError, File, FileFormat};
use std::path::Path;

use super::merge_policy;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Load config for a traversal root.
    /// Precedence: global file (lowest) -> root `.tree-ai.toml` -> environment (highest).
    pub fn load(root: &Path) -> Result<TreeAiConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, root)?;
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Load config from a specific file with environment overlay.
    ///
    /// The file must exist; the global and root-local files are not consulted.
    pub fn load_from_file(path: &Path) -> Result<TreeAiConfig, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let builder = merge_policy::builder_with_defaults()?;
        let builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }
}
