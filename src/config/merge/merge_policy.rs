//! Merge policy: later sources override earlier ones key by key.
//!
//! Defaults are not registered as a source. Every config struct carries
//! `#[serde(default)]`, so keys absent from all sources take their built-in value.

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError};

/// Start an empty builder.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(config::Config::builder())
}
