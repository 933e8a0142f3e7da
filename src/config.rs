//! Configuration
//!
//! Run-wide settings, read once at startup and passed explicitly to the walker,
//! describer and renderer. Layered by [`ConfigLoader`]: defaults, global file,
//! root-local file, `TREE_AI__*` environment overlay, then CLI flags.

pub mod facade;
pub mod merge;
pub mod paths;
pub mod sources;

pub use facade::ConfigLoader;
pub use paths::xdg_root as xdg;

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::tree::ignore::DEFAULT_IGNORE_FILES;
use crate::tree::walker::{DepthLimit, WalkerConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Bearer token attached to health and completion requests.
pub const API_KEY_ENV: &str = "TREE_AI_API_KEY";

/// Default completion endpoint when none is configured.
pub const ENDPOINT_ENV: &str = "TREE_AI_ENDPOINT";

/// Overrides the local inference cache directory.
pub const CACHE_DIR_ENV: &str = "TREE_AI_CACHE_DIR";

pub const DEFAULT_MODEL: &str = "granite-3-1-8b-instruct-w4a16";

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeAiConfig {
    pub tree: TreeConfig,
    pub describe: DescribeConfig,
    pub render: RenderConfig,
    pub logging: LoggingConfig,
}

impl TreeAiConfig {
    pub fn validate(&self) -> Result<(), ApiError> {
        self.describe.validate().map_err(ApiError::ConfigError)
    }
}

/// Traversal settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Negative: unlimited. Zero: immediate children only. Otherwise inclusive ceiling.
    pub max_depth: i64,
    pub include_files: bool,
    pub include_dotfiles: bool,
    pub follow_symlinks: bool,
    /// Ignore-file names read from the traversal root.
    pub ignore_files: Vec<String>,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: -1,
            include_files: true,
            include_dotfiles: false,
            follow_symlinks: false,
            ignore_files: DEFAULT_IGNORE_FILES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl TreeConfig {
    pub fn walker_config(&self) -> WalkerConfig {
        WalkerConfig {
            max_depth: DepthLimit::from_flag(self.max_depth),
            include_files: self.include_files,
            include_dotfiles: self.include_dotfiles,
            follow_symlinks: self.follow_symlinks,
            ignore_files: self.ignore_files.clone(),
        }
    }
}

/// Description pipeline settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DescribeConfig {
    /// When false no descriptions are generated at all.
    pub enabled: bool,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Replaces the default instruction when non-blank.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,
    /// Keep only the first sentence of each description.
    pub truncate: bool,
    pub health_timeout_ms: u64,
    pub local: LocalInferenceConfig,
}

impl Default for DescribeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            model: DEFAULT_MODEL.to_string(),
            endpoint: None,
            instruction: None,
            truncate: false,
            health_timeout_ms: 2000,
            local: LocalInferenceConfig::default(),
        }
    }
}

impl DescribeConfig {
    /// Explicit endpoint, else `TREE_AI_ENDPOINT`, else none.
    pub fn resolved_endpoint(&self) -> Option<String> {
        resolve_endpoint(self.endpoint.as_deref(), std::env::var(ENDPOINT_ENV).ok())
    }

    pub fn api_key(&self) -> Option<String> {
        std::env::var(API_KEY_ENV).ok().filter(|k| !k.trim().is_empty())
    }

    pub fn health_timeout(&self) -> Duration {
        Duration::from_millis(self.health_timeout_ms)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("Model name cannot be empty".to_string());
        }
        if let Some(endpoint) = self.endpoint.as_deref().filter(|e| !e.trim().is_empty()) {
            if !endpoint_url_is_valid(endpoint) {
                return Err(format!("Invalid endpoint URL: {}", endpoint));
            }
        }
        if self.health_timeout_ms == 0 {
            return Err("Health check timeout must be positive".to_string());
        }
        if self.local.enabled && self.local.program.trim().is_empty() {
            return Err("Local inference program cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Pick the first non-blank endpoint.
pub fn resolve_endpoint(explicit: Option<&str>, from_env: Option<String>) -> Option<String> {
    explicit
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(str::to_string)
        .or_else(|| {
            from_env
                .map(|e| e.trim().to_string())
                .filter(|e| !e.is_empty())
        })
}

/// An http(s) URL with a non-empty host and no whitespace.
pub fn endpoint_url_is_valid(endpoint: &str) -> bool {
    let endpoint = endpoint.trim();
    let Some(rest) = endpoint
        .strip_prefix("http://")
        .or_else(|| endpoint.strip_prefix("https://"))
    else {
        return false;
    };
    if rest.is_empty() || rest.chars().any(char::is_whitespace) {
        return false;
    }

    let authority = rest.split('/').next().unwrap_or_default();
    let host_port = authority.rsplit('@').next().unwrap_or(authority);
    let host = if host_port.starts_with('[') {
        match host_port.find(']') {
            Some(end) => &host_port[1..end],
            None => return false,
        }
    } else {
        host_port.split(':').next().unwrap_or_default()
    };
    !host.is_empty()
}

/// Local inference subprocess settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalInferenceConfig {
    pub enabled: bool,
    pub program: String,
    pub args: Vec<String>,
    pub cache_dir: PathBuf,
    /// Environment variable the cache directory is passed in.
    pub cache_env: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<PathBuf>,
    /// Skip the subprocess when the cache holds no downloaded model.
    pub require_cached_model: bool,
}

impl Default for LocalInferenceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            program: ".venv/bin/python".to_string(),
            args: vec!["model/granite_infer.py".to_string()],
            cache_dir: PathBuf::from(".hf-cache"),
            cache_env: "TRANSFORMERS_CACHE".to_string(),
            working_dir: None,
            require_cached_model: false,
        }
    }
}

impl LocalInferenceConfig {
    /// `TREE_AI_CACHE_DIR` when set, else the configured directory.
    pub fn resolved_cache_dir(&self) -> PathBuf {
        std::env::var(CACHE_DIR_ENV)
            .ok()
            .filter(|d| !d.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| self.cache_dir.clone())
    }
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub color: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

impl RenderConfig {
    /// Color unless disabled here or by a non-empty `NO_COLOR`.
    pub fn color_enabled(&self) -> bool {
        self.color
            && std::env::var("NO_COLOR")
                .map(|v| v.is_empty())
                .unwrap_or(true)
    }
}
