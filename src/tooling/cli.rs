//! CLI Tooling
//!
//! Flags overlay the loaded configuration; `CliContext::run` performs one
//! collect-describe-render pass.

use crate::config::{ConfigLoader, TreeAiConfig};
use crate::describe::Describer;
use crate::error::ApiError;
use crate::render::{RenderOptions, TreeRenderer};
use crate::tree::walker;
use clap::{ArgAction, Parser};
use std::io::Write;
use std::path::{Path, PathBuf};

/// tree-ai - directory tree annotated with model-generated descriptions
#[derive(Parser, Debug)]
#[command(name = "tree-ai")]
#[command(about = "Print a directory tree with a one-line description of every entry")]
#[command(version)]
pub struct Cli {
    /// Root directory to list
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Disable descriptions
    #[arg(long)]
    pub no_ai: bool,

    /// Model identifier sent to the completion endpoint
    #[arg(long)]
    pub model: Option<String>,

    /// Completion endpoint URL (default: $TREE_AI_ENDPOINT)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Maximum depth; negative for unlimited, 0 for immediate children only
    #[arg(long, allow_negative_numbers = true)]
    pub max_depth: Option<i64>,

    /// Include files, not just directories
    #[arg(long, action = ArgAction::Set, value_name = "BOOL")]
    pub include_files: Option<bool>,

    /// Include entries whose name starts with a dot
    #[arg(short = 'a', long)]
    pub include_dotfiles: bool,

    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Keep only the first sentence of each description
    #[arg(long)]
    pub truncate: bool,

    /// Custom instruction replacing the default prompt task
    #[arg(long)]
    pub instruction: Option<String>,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file"); takes precedence over TREE_AI_LOG_FILE
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Overlay flags that were given onto `config`.
    pub fn apply_to(&self, config: &mut TreeAiConfig) {
        if self.no_ai {
            config.describe.enabled = false;
        }
        if let Some(model) = &self.model {
            config.describe.model = model.clone();
        }
        if let Some(endpoint) = &self.endpoint {
            config.describe.endpoint = Some(endpoint.clone());
        }
        if let Some(instruction) = &self.instruction {
            config.describe.instruction = Some(instruction.clone());
        }
        if self.truncate {
            config.describe.truncate = true;
        }

        if let Some(depth) = self.max_depth {
            config.tree.max_depth = depth;
        }
        if let Some(include_files) = self.include_files {
            config.tree.include_files = include_files;
        }
        if self.include_dotfiles {
            config.tree.include_dotfiles = true;
        }

        if self.no_color {
            config.render.color = false;
            config.logging.color = false;
        }

        if self.verbose {
            config.logging.level = "debug".to_string();
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.logging.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.logging.output = output.clone();
        }
    }
}

/// CLI context for one run
pub struct CliContext {
    root: PathBuf,
    config: TreeAiConfig,
}

impl CliContext {
    /// Load layered configuration for `cli.root`, then apply flags.
    pub fn new(cli: &Cli) -> Result<Self, ApiError> {
        let mut config = match &cli.config {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&cli.root)?,
        };
        cli.apply_to(&mut config);
        config.validate()?;
        Ok(Self::from_config(cli.root.clone(), config))
    }

    pub fn from_config(root: PathBuf, config: TreeAiConfig) -> Self {
        Self { root, config }
    }

    pub fn config(&self) -> &TreeAiConfig {
        &self.config
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Collect, describe and render into `out`. Returns the number of nodes rendered.
    pub fn run<W: Write>(&self, out: &mut W) -> Result<usize, ApiError> {
        let nodes = walker::collect(&self.root, &self.config.tree.walker_config())?;
        tracing::info!(root = %self.root.display(), nodes = nodes.len(), "collected tree");

        let options = RenderOptions {
            color: self.config.render.color_enabled(),
        };
        let rendered = if self.config.describe.enabled {
            let describer = Describer::from_config(&self.config.describe);
            tracing::debug!(backends = ?describer.backend_names(), "description chain ready");
            TreeRenderer::new(options)
                .with_describer(&describer)
                .render(&nodes, out)?
        } else {
            TreeRenderer::new(options).render(&nodes, out)?
        };
        Ok(rendered)
    }
}
