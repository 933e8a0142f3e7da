//! Node value produced by traversal

use std::path::{Path, PathBuf};

/// One filesystem entry surfaced by traversal.
///
/// `depth` is 1 for entries directly under the root and grows by one per
/// directory level. It is computed once from the root-relative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub path: PathBuf,
    pub is_dir: bool,
    pub depth: usize,
}

impl Node {
    pub fn new(path: PathBuf, is_dir: bool, depth: usize) -> Self {
        Self {
            path,
            is_dir,
            depth,
        }
    }

    /// Base name for display; falls back to the full path for odd inputs like `..`.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// "directory" or "file", as used in prompts and templates.
    pub fn kind(&self) -> &'static str {
        kind_label(self.is_dir)
    }

    /// Path relative to `root`, or the full path when it is not under `root`.
    pub fn relative_to<'a>(&'a self, root: &Path) -> &'a Path {
        self.path.strip_prefix(root).unwrap_or(&self.path)
    }
}

pub fn kind_label(is_dir: bool) -> &'static str {
    if is_dir {
        "directory"
    } else {
        "file"
    }
}

/// Depth of `path` below `root`, counted in path components.
pub fn relative_depth(root: &Path, path: &Path) -> usize {
    path.strip_prefix(root)
        .map(|rel| rel.components().count())
        .unwrap_or(0)
}
