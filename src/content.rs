//! Bounded content sampling
//!
//! Gathers the text a description prompt is built from: a single file, or the
//! concatenated non-binary files under a directory. Every read failure is
//! swallowed; the sampler only ever returns (possibly empty) text.

use crate::tree::Node;
use std::io::Read;
use std::path::Path;
use walkdir::WalkDir;

/// Maximum bytes of sampled content before the truncation marker.
pub const SAMPLE_BUDGET: usize = 6000;

/// Bytes inspected by the binary heuristic.
pub const BINARY_PROBE_LEN: usize = 800;

/// Appended when sampling stops early because the budget was exceeded.
pub const TRUNCATION_MARKER: &str = "\n...[truncated]\n";

/// Reads bounded textual content for a node.
#[derive(Debug, Clone)]
pub struct ContentSampler {
    budget: usize,
}

impl ContentSampler {
    pub fn new() -> Self {
        Self {
            budget: SAMPLE_BUDGET,
        }
    }

    pub fn with_budget(budget: usize) -> Self {
        Self { budget }
    }

    pub fn budget(&self) -> usize {
        self.budget
    }

    pub fn sample_node(&self, node: &Node) -> String {
        self.sample(&node.path, node.is_dir)
    }

    /// Sample `path`. Output never exceeds the budget plus `TRUNCATION_MARKER`.
    pub fn sample(&self, path: &Path, is_dir: bool) -> String {
        let mut out = String::new();
        if is_dir {
            self.sample_directory(path, &mut out);
        } else if let Some(section) = read_text_section(path, self.read_limit()) {
            out.push_str(&section);
        }
        self.cap(out)
    }

    fn sample_directory(&self, dir: &Path, out: &mut String) {
        let files = WalkDir::new(dir)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::debug!(error = %e, "skipping unreadable entry while sampling");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file());

        for entry in files {
            if out.len() > self.budget {
                break;
            }
            if let Some(section) = read_text_section(entry.path(), self.read_limit()) {
                out.push_str(&section);
            }
        }
    }

    /// Reading past this point cannot change the capped output.
    fn read_limit(&self) -> u64 {
        self.budget as u64 + 1
    }

    fn cap(&self, mut text: String) -> String {
        if text.len() <= self.budget {
            return text;
        }
        let mut cut = self.budget;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        text.truncate(cut);
        text.push_str(TRUNCATION_MARKER);
        text
    }
}

impl Default for ContentSampler {
    fn default() -> Self {
        Self::new()
    }
}

/// Null byte within the first `BINARY_PROBE_LEN` bytes.
pub fn looks_binary(bytes: &[u8]) -> bool {
    bytes.iter().take(BINARY_PROBE_LEN).any(|&b| b == 0)
}

/// Read up to `limit` bytes of one file as a `--- <name> ---` tagged section,
/// or None if it is binary or unreadable.
fn read_text_section(path: &Path, limit: u64) -> Option<String> {
    let mut file = match std::fs::File::open(path) {
        Ok(file) => file,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "skipping unreadable file");
            return None;
        }
    };
    let mut bytes = Vec::new();
    if let Err(e) = file.by_ref().take(limit).read_to_end(&mut bytes) {
        tracing::debug!(path = %path.display(), error = %e, "skipping unreadable file");
        return None;
    }
    if looks_binary(&bytes) {
        tracing::trace!(path = %path.display(), "skipping binary file");
        return None;
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let body = String::from_utf8_lossy(&bytes);
    let mut section = format!("--- {} ---\n{}", name, body);
    if !section.ends_with('\n') {
        section.push('\n');
    }
    Some(section)
}
