//! Config sources, listed from lowest to highest precedence.

pub mod environment;
pub mod global_file;
pub mod workspace_file;
