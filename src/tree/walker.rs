//! Depth-first collection of filesystem nodes

use crate::error::ApiError;
use crate::tree::ignore::{IgnoreSet, DEFAULT_IGNORE_FILES};
use crate::tree::node::{relative_depth, Node};
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// How deep below the root traversal may go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthLimit {
    Unlimited,
    /// Inclusive ceiling on node depth; always at least 1.
    Levels(usize),
}

impl DepthLimit {
    /// Interpret a `--max-depth` style value.
    ///
    /// Negative values mean unlimited. Zero means "immediate children only",
    /// the same as 1. Larger values are inclusive ceilings.
    pub fn from_flag(max_depth: i64) -> Self {
        if max_depth < 0 {
            DepthLimit::Unlimited
        } else {
            DepthLimit::Levels((max_depth as usize).max(1))
        }
    }

    pub fn allows(&self, depth: usize) -> bool {
        match self {
            DepthLimit::Unlimited => true,
            DepthLimit::Levels(limit) => depth <= *limit,
        }
    }
}

impl Default for DepthLimit {
    fn default() -> Self {
        DepthLimit::Unlimited
    }
}

/// Walker configuration
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    pub max_depth: DepthLimit,
    pub include_files: bool,
    pub include_dotfiles: bool,
    pub follow_symlinks: bool,
    /// Ignore-file names read from the root at the start of each walk.
    pub ignore_files: Vec<String>,
}

impl WalkerConfig {
    pub fn new(max_depth: i64, include_files: bool, include_dotfiles: bool) -> Self {
        Self {
            max_depth: DepthLimit::from_flag(max_depth),
            include_files,
            include_dotfiles,
            ..Self::default()
        }
    }
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            max_depth: DepthLimit::Unlimited,
            include_files: true,
            include_dotfiles: false,
            follow_symlinks: false,
            ignore_files: DEFAULT_IGNORE_FILES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Collect every visible node under `root`, excluding `root` itself.
///
/// Errors on individual entries are skipped. Failing to read the root is fatal.
pub fn collect(root: &Path, config: &WalkerConfig) -> Result<Vec<Node>, ApiError> {
    let metadata = std::fs::metadata(root).map_err(|source| ApiError::RootNotAccessible {
        path: root.to_path_buf(),
        source,
    })?;
    if !metadata.is_dir() {
        return Err(ApiError::NotADirectory(root.to_path_buf()));
    }
    std::fs::read_dir(root).map_err(|source| ApiError::RootNotAccessible {
        path: root.to_path_buf(),
        source,
    })?;

    let ignore = IgnoreSet::load(root, &config.ignore_files);
    let mut walk = WalkDir::new(root)
        .min_depth(1)
        .follow_links(config.follow_symlinks)
        .sort_by_file_name();
    if let DepthLimit::Levels(limit) = config.max_depth {
        walk = walk.max_depth(limit);
    }

    let mut nodes = Vec::new();
    for entry in walk
        .into_iter()
        .filter_entry(|entry| admit(root, entry, config, &ignore))
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("filesystem loop at root"));
                return Err(ApiError::RootNotAccessible {
                    path: root.to_path_buf(),
                    source,
                });
            }
            Err(e) => {
                tracing::debug!(error = %e, "skipping unreadable entry");
                continue;
            }
        };

        let is_dir = entry.file_type().is_dir();
        if is_dir || config.include_files {
            let depth = relative_depth(root, entry.path());
            nodes.push(Node::new(entry.into_path(), is_dir, depth));
        }
    }

    tracing::debug!(root = %root.display(), count = nodes.len(), "collected nodes");
    Ok(nodes)
}

/// Whether an entry is visited at all. Returning false for a directory prunes
/// its subtree.
fn admit(root: &Path, entry: &DirEntry, config: &WalkerConfig, ignore: &IgnoreSet) -> bool {
    if entry.depth() == 0 {
        return true;
    }
    if !config.max_depth.allows(relative_depth(root, entry.path())) {
        return false;
    }
    if !config.include_dotfiles && entry.file_name().to_string_lossy().starts_with('.') {
        return false;
    }
    match entry.path().strip_prefix(root) {
        Ok(relative) => !ignore.is_ignored(relative),
        Err(_) => true,
    }
}
