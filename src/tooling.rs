//! Tooling & Integration Layer
//!
//! Command-line surface: flag parsing and the context that turns flags plus
//! layered configuration into a rendered tree.

pub mod cli;

pub use cli::{Cli, CliContext};
