//! Description backend seam
//!
//! The describer walks an ordered chain of backends and takes the first text
//! that normalizes to something non-empty.

use crate::describe::prompt::DescriptionRequest;
use crate::error::BackendError;

/// One tier of the description chain.
pub trait DescriptionBackend: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Produce raw model text for `request`, or the reason this tier gave up.
    fn attempt(&self, request: &DescriptionRequest) -> Result<String, BackendError>;
}
