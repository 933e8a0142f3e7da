//! Terminal static template tier

use crate::describe::backend::DescriptionBackend;
use crate::describe::prompt::DescriptionRequest;
use crate::error::BackendError;
use std::path::Path;

/// Templated sentence naming the target and its kind. Never empty.
pub fn template_description(target: &str, is_dir: bool, model: &str) -> String {
    if is_dir {
        format!("(Directory for managing {} using model {})", target, model)
    } else {
        let stem = Path::new(target)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| target.to_string());
        format!("(File handling {} functionality using model {})", stem, model)
    }
}

/// Always succeeds with `template_description`.
#[derive(Debug, Clone)]
pub struct StaticTemplateBackend {
    model: String,
}

impl StaticTemplateBackend {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }
}

impl DescriptionBackend for StaticTemplateBackend {
    fn name(&self) -> &'static str {
        "template"
    }

    fn attempt(&self, request: &DescriptionRequest) -> Result<String, BackendError> {
        Ok(template_description(
            &request.target,
            request.is_dir,
            &self.model,
        ))
    }
}
