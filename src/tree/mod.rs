//! Filesystem traversal
//!
//! Walks a root directory and produces the flat, unordered set of nodes the
//! renderer draws. Depth limiting, dotfile exclusion and ignore-file filtering
//! all happen here, before any node is emitted.

pub mod ignore;
pub mod node;
pub mod walker;

pub use ignore::IgnoreSet;
pub use node::Node;
pub use walker::{collect, DepthLimit, WalkerConfig};
