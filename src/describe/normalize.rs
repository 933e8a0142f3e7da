//! Model output cleanup
//!
//! Turns whatever a backend returned into one readable line. The rules, in order:
//!
//! 1. Collapse every whitespace run (newlines included) to a single space and trim.
//! 2. If the text echoes the full prompt, keep only what follows its last
//!    occurrence; otherwise do the same for the instruction.
//! 3. Drop a leading `Answer:`, `Description:`, `Response:`, `Output:` or
//!    `Summary:` label.
//! 4. Drop a leading self-reference: `[The] [file|directory|folder] <name>`, the
//!    name optionally quoted, followed by an optional `is`, `:` or `-`.
//! 5. Strip leading punctuation and quotes, then uppercase the first character.
//! 6. If rules 2-5 leave nothing, fall back to the rule 1 text.
//! 7. With truncation on, keep only the first sentence.
//!
//! Returns None only when rule 1 yields an empty string.

use regex::Regex;
use std::sync::OnceLock;

/// What the cleanup rules need to know about the request.
#[derive(Debug, Clone, Copy)]
pub struct NormalizeContext<'a> {
    pub target: &'a str,
    pub prompt: &'a str,
    pub instruction: &'a str,
    pub truncate: bool,
}

pub fn normalize(raw: &str, ctx: &NormalizeContext<'_>) -> Option<String> {
    let collapsed = collapse_whitespace(raw);
    if collapsed.is_empty() {
        return None;
    }

    let cleaned = clean(&collapsed, ctx);
    let line = if cleaned.is_empty() {
        tracing::debug!(text = %collapsed, "cleanup removed everything, keeping collapsed text");
        collapsed
    } else {
        cleaned
    };

    if ctx.truncate {
        Some(first_sentence(&line).to_string())
    } else {
        Some(line)
    }
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn clean(collapsed: &str, ctx: &NormalizeContext<'_>) -> String {
    let text = strip_echo(collapsed, ctx);
    let text = strip_label(text);
    let text = strip_self_reference(text, ctx.target);
    let text = text.trim_start_matches(|c: char| {
        c.is_whitespace() || matches!(c, ':' | '-' | ',' | '.' | ';' | '"' | '\'' | '`' | '*')
    });
    capitalize_first(text.trim_end())
}

fn strip_echo<'t>(text: &'t str, ctx: &NormalizeContext<'_>) -> &'t str {
    for needle in [ctx.prompt, ctx.instruction] {
        let needle = collapse_whitespace(needle);
        if needle.is_empty() {
            continue;
        }
        if let Some(pos) = text.rfind(&needle) {
            return &text[pos + needle.len()..];
        }
    }
    text
}

fn strip_label(text: &str) -> &str {
    static LABEL: OnceLock<Regex> = OnceLock::new();
    let label = LABEL.get_or_init(|| {
        Regex::new(r"(?i)^\s*(?:answer|description|response|output|summary)\s*:\s*")
            .expect("label pattern is valid")
    });
    match label.find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    }
}

fn strip_self_reference<'t>(text: &'t str, target: &str) -> &'t str {
    if target.is_empty() {
        return text;
    }
    let pattern = format!(
        r#"(?i)^\s*(?:the\s+)?(?:(?:file|directory|folder)\s+)?['"`]?{}['"`]?(?:\s+is\b|\s*:|\s+-|\s*$)"#,
        regex::escape(target)
    );
    match Regex::new(&pattern) {
        Ok(re) => match re.find(text) {
            Some(m) => &text[m.end()..],
            None => text,
        },
        Err(e) => {
            tracing::debug!(error = %e, "self-reference pattern rejected");
            text
        }
    }
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Text up to and including the first `.`, `!` or `?` that ends a sentence.
pub fn first_sentence(text: &str) -> &str {
    let mut iter = text.char_indices().peekable();
    while let Some((i, c)) = iter.next() {
        if matches!(c, '.' | '!' | '?') {
            let at_boundary = match iter.peek() {
                None => true,
                Some((_, next)) => next.is_whitespace(),
            };
            if at_boundary {
                return &text[..i + c.len_utf8()];
            }
        }
    }
    text
}
