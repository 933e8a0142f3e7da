//! Integration tests for tree-ai

mod cli_flags;
mod describe_chain;
mod render_tree;
mod support;
