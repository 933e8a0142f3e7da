//! Environment variable source: TREE_AI__* prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Prefix for config overlay variables, e.g. `TREE_AI__DESCRIBE__MODEL`.
pub const ENV_PREFIX: &str = "TREE_AI";

/// List-valued keys; their variables hold comma-separated items.
pub const LIST_KEYS: &[&str] = &["tree.ignore_files", "describe.local.args"];

/// Environment overlay source.
/// Uses `TREE_AI` as prefix and `__` as separator, so only double-underscore
/// variables are read here; `TREE_AI_API_KEY` and friends are left alone.
pub fn source() -> Environment {
    LIST_KEYS.iter().fold(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .list_separator(",")
            .try_parsing(true),
        |env, key| env.with_list_parse_key(key),
    )
}

/// Add environment variable overlay to builder.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder.add_source(source()))
}
