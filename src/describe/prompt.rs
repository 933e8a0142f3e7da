//! Prompt construction

use crate::tree::node::kind_label;

/// Fixed role preamble placed at the top of every prompt.
pub const ROLE_PREAMBLE: &str = "You are a senior software engineer annotating a repository tree. \
Each entry gets one short line explaining what it is for.";

/// Instruction used when the caller supplies none.
pub fn default_instruction(is_dir: bool, target: &str) -> String {
    format!(
        "For {} named '{}' read everything underneath it and tell me a specific detail that is \
         most important as it relates to this entire repo. No more than 100 characters",
        kind_label(is_dir),
        target
    )
}

/// A non-blank custom instruction is used verbatim; otherwise the default.
pub fn resolve_instruction(custom: Option<&str>, is_dir: bool, target: &str) -> String {
    match custom {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        _ => default_instruction(is_dir, target),
    }
}

/// Everything one description attempt needs. Built per node and dropped after use.
#[derive(Debug, Clone)]
pub struct DescriptionRequest {
    pub target: String,
    pub is_dir: bool,
    pub content: String,
    pub instruction: String,
    prompt: String,
}

impl DescriptionRequest {
    pub fn new(target: String, is_dir: bool, content: String, instruction: String) -> Self {
        let prompt = build_prompt(&target, is_dir, &content, &instruction);
        Self {
            target,
            is_dir,
            content,
            instruction,
            prompt,
        }
    }

    pub fn kind(&self) -> &'static str {
        kind_label(self.is_dir)
    }

    /// Full prompt text sent to model backends.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}

fn build_prompt(target: &str, is_dir: bool, content: &str, instruction: &str) -> String {
    let mut prompt = String::new();
    prompt.push_str(ROLE_PREAMBLE);
    prompt.push_str("\n\n");
    prompt.push_str(&format!("Item: {} '{}'\n\n", kind_label(is_dir), target));
    prompt.push_str("Contents:\n");
    if content.trim().is_empty() {
        prompt.push_str("(no readable text content)\n");
    } else {
        prompt.push_str(content);
        if !content.ends_with('\n') {
            prompt.push('\n');
        }
    }
    prompt.push('\n');
    prompt.push_str("Task: ");
    prompt.push_str(instruction);
    prompt
}
