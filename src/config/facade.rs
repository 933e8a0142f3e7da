//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::TreeAiConfig;
use config::ConfigError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the global file, the root-local file and environment.
    pub fn load(root: &Path) -> Result<TreeAiConfig, ConfigError> {
        MergeService::load(root)
    }

    /// Load configuration from a specific file, with environment overlay.
    pub fn load_from_file(path: &Path) -> Result<TreeAiConfig, ConfigError> {
        MergeService::load_from_file(path)
    }

    /// Create default configuration.
    pub fn default() -> TreeAiConfig {
        TreeAiConfig::default()
    }
}
