//! Config composition: source ordering and deserialization.

pub mod merge_policy;
pub mod service;
