//! tree-ai: Directory Trees With Descriptions
//!
//! Walks a directory, then prints it as a tree where every entry carries a
//! one-line description. Descriptions come from a remote completion endpoint
//! when one is healthy, otherwise from a local inference subprocess, otherwise
//! from a fixed template, so a line is always produced.

pub mod config;
pub mod content;
pub mod describe;
pub mod error;
pub mod logging;
pub mod render;
pub mod tooling;
pub mod tree;
