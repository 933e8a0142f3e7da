//! Ignore-file patterns
//!
//! Reads the recognized ignore files at the traversal root and compiles their
//! lines into a single matcher over root-relative paths. Patterns are anchored
//! at the root: `*` does not cross `/`, `**` does.

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::path::Path;

/// Ignore files read from the traversal root when none are configured.
pub const DEFAULT_IGNORE_FILES: &[&str] = &[".gitignore", ".dockerignore", ".ignore"];

/// Read-only set of root-relative paths excluded from traversal.
#[derive(Debug, Clone)]
pub struct IgnoreSet {
    globs: GlobSet,
    patterns: Vec<String>,
}

impl IgnoreSet {
    pub fn empty() -> Self {
        Self {
            globs: GlobSet::empty(),
            patterns: Vec::new(),
        }
    }

    /// Load patterns from each of `file_names` found directly under `root`.
    ///
    /// Missing or unreadable ignore files are skipped.
    pub fn load<S: AsRef<str>>(root: &Path, file_names: &[S]) -> Self {
        let mut lines = Vec::new();
        for name in file_names {
            let path = root.join(name.as_ref());
            match std::fs::read_to_string(&path) {
                Ok(content) => {
                    tracing::debug!(file = %path.display(), "loaded ignore file");
                    lines.extend(content.lines().map(str::to_string));
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::debug!(file = %path.display(), error = %e, "skipping unreadable ignore file");
                }
            }
        }
        Self::from_patterns(lines)
    }

    /// Compile raw ignore-file lines. Comments, blanks, negations and invalid
    /// globs are dropped.
    pub fn from_patterns<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GlobSetBuilder::new();
        let mut patterns = Vec::new();
        for line in lines {
            let Some(pattern) = normalize_pattern(line.as_ref()) else {
                continue;
            };
            match GlobBuilder::new(&pattern).literal_separator(true).build() {
                Ok(glob) => {
                    builder.add(glob);
                    patterns.push(pattern);
                }
                Err(e) => {
                    tracing::warn!(pattern = %pattern, error = %e, "skipping invalid ignore pattern");
                }
            }
        }

        match builder.build() {
            Ok(globs) => Self { globs, patterns },
            Err(e) => {
                tracing::warn!(error = %e, "failed to compile ignore patterns, ignoring none");
                Self::empty()
            }
        }
    }

    /// Whether a root-relative path is excluded.
    pub fn is_ignored(&self, relative: &Path) -> bool {
        !self.patterns.is_empty() && self.globs.is_match(relative)
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Default for IgnoreSet {
    fn default() -> Self {
        Self::empty()
    }
}

fn normalize_pattern(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    if line.starts_with('!') {
        tracing::debug!(pattern = %line, "negated ignore patterns are not supported");
        return None;
    }
    let pattern = line.trim_start_matches('/').trim_end_matches('/');
    if pattern.is_empty() {
        return None;
    }
    Some(pattern.to_string())
}
