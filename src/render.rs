//! Tree rendering
//!
//! Sorts the collected nodes, draws connectors from depth alone, and writes one
//! line per node: `<prefix><icon> <name>[ <description>]`.

use crate::describe::Describer;
use crate::tree::Node;
use owo_colors::OwoColorize;
use std::io::{self, Write};

const BRANCH: &str = "├── ";
const CORNER: &str = "└── ";
const VERTICAL: &str = "│   ";

const DIR_ICON: &str = "💼";
const FILE_ICON: &str = "📄";

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub color: bool,
}

pub struct TreeRenderer<'a> {
    options: RenderOptions,
    describer: Option<&'a Describer>,
}

impl<'a> TreeRenderer<'a> {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            describer: None,
        }
    }

    /// Annotate nodes with this describer. Without one, lines carry no description.
    pub fn with_describer(mut self, describer: &'a Describer) -> Self {
        self.describer = Some(describer);
        self
    }

    /// Render `nodes` in path order. Returns the number of lines written.
    ///
    /// Nodes are described one at a time, so a slow backend stalls output at
    /// that line.
    pub fn render<W: Write>(&self, nodes: &[Node], out: &mut W) -> io::Result<usize> {
        let mut sorted: Vec<&Node> = nodes.iter().collect();
        sorted.sort_by(|a, b| a.path.cmp(&b.path));

        let total = sorted.len();
        for (index, node) in sorted.iter().enumerate() {
            let last = is_last(&sorted, index);
            let label = self.label(node);

            let description = match self.describer {
                // The walk and the render are not atomic; vanished entries stay undescribed.
                Some(describer) if node.path.exists() => {
                    tracing::debug!(index = index + 1, total, path = %node.path.display(), "describing");
                    describer.describe_node(node)
                }
                Some(_) => {
                    tracing::debug!(path = %node.path.display(), "entry vanished before render");
                    String::new()
                }
                None => String::new(),
            };

            let prefix = connector_prefix(node.depth, last);
            if description.is_empty() {
                writeln!(out, "{}{}", prefix, label)?;
            } else {
                writeln!(out, "{}{} {}", prefix, label, description)?;
            }
        }
        out.flush()?;
        Ok(total)
    }

    fn label(&self, node: &Node) -> String {
        let icon = if node.is_dir { DIR_ICON } else { FILE_ICON };
        let text = format!("{} {}", icon, node.name());
        match (self.options.color, node.is_dir) {
            (false, _) => text,
            (true, true) => text.blue().bold().to_string(),
            (true, false) => text.green().bold().to_string(),
        }
    }
}

/// A node closes its group when it is the final node or the next node is not deeper.
///
/// This reads siblings off the sorted order rather than the real hierarchy, so a
/// node followed by a sibling is also drawn with a corner.
pub fn is_last(sorted: &[&Node], index: usize) -> bool {
    match sorted.get(index + 1) {
        None => true,
        Some(next) => next.depth <= sorted[index].depth,
    }
}

/// One vertical bar per level above the first, then a branch or corner.
pub fn connector_prefix(depth: usize, last: bool) -> String {
    let mut prefix = VERTICAL.repeat(depth.saturating_sub(1));
    prefix.push_str(if last { CORNER } else { BRANCH });
    prefix
}
