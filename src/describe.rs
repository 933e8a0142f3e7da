//! Description pipeline
//!
//! For each node: sample its content, build a prompt, walk the backend chain
//! (remote endpoint, local subprocess, static template) until one produces
//! text, then normalize that text to a single line. `Describer::describe`
//! always returns a non-empty line; every failure along the way is logged and
//! absorbed.

pub mod backend;
pub mod local;
pub mod normalize;
pub mod prompt;
pub mod remote;
pub mod template;

pub use backend::DescriptionBackend;
pub use local::LocalInferenceBackend;
pub use normalize::{normalize, NormalizeContext};
pub use prompt::{resolve_instruction, DescriptionRequest};
pub use remote::RemoteCompletionBackend;
pub use template::{template_description, StaticTemplateBackend};

use crate::config::DescribeConfig;
use crate::content::ContentSampler;
use crate::tree::Node;
use std::path::Path;

/// Prefixed to every description.
pub const DESCRIPTION_MARKER: &str = "» ";

pub struct Describer {
    backends: Vec<Box<dyn DescriptionBackend>>,
    sampler: ContentSampler,
    model: String,
    instruction: Option<String>,
    truncate: bool,
}

impl Describer {
    /// Assemble the standard chain from configuration.
    ///
    /// The remote tier is included only when an endpoint resolves (explicit
    /// setting, then `TREE_AI_ENDPOINT`). The static template always closes the chain.
    pub fn from_config(config: &DescribeConfig) -> Self {
        let mut backends: Vec<Box<dyn DescriptionBackend>> = Vec::new();

        match config.resolved_endpoint() {
            Some(endpoint) => {
                match RemoteCompletionBackend::new(&endpoint, &config.model, config.api_key()) {
                    Ok(remote) => {
                        backends.push(Box::new(remote.with_health_timeout(config.health_timeout())))
                    }
                    Err(e) => {
                        tracing::warn!(endpoint = %endpoint, error = %e, "remote backend unavailable")
                    }
                }
            }
            None => tracing::debug!("no completion endpoint configured, using local fallback"),
        }

        if config.local.enabled {
            backends.push(Box::new(LocalInferenceBackend::from_config(&config.local)));
        }
        backends.push(Box::new(StaticTemplateBackend::new(config.model.clone())));

        Self::with_backends(backends, config.model.clone())
            .with_instruction(config.instruction.clone())
            .with_truncate(config.truncate)
    }

    /// Use an explicit backend chain, tried in order.
    pub fn with_backends(backends: Vec<Box<dyn DescriptionBackend>>, model: impl Into<String>) -> Self {
        Self {
            backends,
            sampler: ContentSampler::new(),
            model: model.into(),
            instruction: None,
            truncate: false,
        }
    }

    pub fn with_instruction(mut self, instruction: Option<String>) -> Self {
        self.instruction = instruction;
        self
    }

    pub fn with_truncate(mut self, truncate: bool) -> Self {
        self.truncate = truncate;
        self
    }

    pub fn with_sampler(mut self, sampler: ContentSampler) -> Self {
        self.sampler = sampler;
        self
    }

    pub fn backend_names(&self) -> Vec<&'static str> {
        self.backends.iter().map(|b| b.name()).collect()
    }

    pub fn describe_node(&self, node: &Node) -> String {
        self.describe(&node.path, node.is_dir)
    }

    /// One-line description of `path`. Never empty, never multi-line.
    pub fn describe(&self, path: &Path, is_dir: bool) -> String {
        let target = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let instruction = resolve_instruction(self.instruction.as_deref(), is_dir, &target);
        let content = self.sampler.sample(path, is_dir);
        let request = DescriptionRequest::new(target, is_dir, content, instruction);
        let ctx = NormalizeContext {
            target: &request.target,
            prompt: request.prompt(),
            instruction: &request.instruction,
            truncate: self.truncate,
        };

        for backend in &self.backends {
            match backend.attempt(&request) {
                Ok(raw) => match normalize(&raw, &ctx) {
                    Some(line) => {
                        tracing::debug!(backend = backend.name(), path = %path.display(), "description produced");
                        return format!("{}{}", DESCRIPTION_MARKER, line);
                    }
                    None => {
                        tracing::debug!(backend = backend.name(), path = %path.display(), "backend returned blank text");
                    }
                },
                Err(e) => {
                    tracing::debug!(backend = backend.name(), path = %path.display(), error = %e, "description backend failed");
                }
            }
        }

        // Chains built with `with_backends` may lack the template tier.
        let fallback = template_description(&request.target, is_dir, &self.model);
        format!("{}{}", DESCRIPTION_MARKER, fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DescribeConfig, LocalInferenceConfig};
    use crate::error::BackendError;
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tempfile::TempDir;

    struct Scripted {
        reply: Result<&'static str, ()>,
        calls: Arc<AtomicUsize>,
    }

    impl DescriptionBackend for Scripted {
        fn name(&self) -> &'static str {
            "scripted"
        }

        fn attempt(&self, _request: &DescriptionRequest) -> Result<String, BackendError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply
                .map(str::to_string)
                .map_err(|_| BackendError::Unavailable("scripted failure".to_string()))
        }
    }

    fn scripted(reply: Result<&'static str, ()>) -> (Box<dyn DescriptionBackend>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Box::new(Scripted {
                reply,
                calls: Arc::clone(&calls),
            }),
            calls,
        )
    }

    #[test]
    fn first_successful_backend_wins() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("server.rs");
        fs::write(&file, "fn serve() {}").unwrap();

        let (failing, failing_calls) = scripted(Err(()));
        let (good, good_calls) = scripted(Ok("Runs the\nHTTP server"));
        let (later, later_calls) = scripted(Ok("never used"));
        let describer = Describer::with_backends(vec![failing, good, later], "m");

        assert_eq!(describer.describe(&file, false), "» Runs the HTTP server");
        assert_eq!(failing_calls.load(Ordering::SeqCst), 1);
        assert_eq!(good_calls.load(Ordering::SeqCst), 1);
        assert_eq!(later_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn blank_output_falls_through() {
        let (blank, _) = scripted(Ok("  \n "));
        let (good, _) = scripted(Ok("Useful"));
        let describer = Describer::with_backends(vec![blank, good], "m");
        assert_eq!(describer.describe(Path::new("/tmp/x.txt"), false), "» Useful");
    }

    #[test]
    fn exhausted_chain_uses_template() {
        let (failing, _) = scripted(Err(()));
        let describer = Describer::with_backends(vec![failing], "granite");
        assert_eq!(
            describer.describe(Path::new("/tmp/app"), true),
            "» (Directory for managing app using model granite)"
        );
    }

    #[test]
    fn truncation_applies_to_backend_text() {
        let (good, _) = scripted(Ok("First sentence. Second sentence."));
        let describer = Describer::with_backends(vec![good], "m").with_truncate(true);
        assert_eq!(
            describer.describe(Path::new("/tmp/a.md"), false),
            "» First sentence."
        );
    }

    #[test]
    fn unreachable_everything_still_describes() {
        let config = DescribeConfig {
            endpoint: Some("http://127.0.0.1:9/v1/completions".to_string()),
            health_timeout_ms: 300,
            local: LocalInferenceConfig {
                program: "/definitely/not/a/python".to_string(),
                ..LocalInferenceConfig::default()
            },
            ..DescribeConfig::default()
        };
        let describer = Describer::from_config(&config);
        assert_eq!(describer.backend_names(), ["remote", "local", "template"]);

        let out = describer.describe(Path::new("/tmp/config.yaml"), false);
        assert_eq!(
            out,
            format!(
                "» (File handling config functionality using model {})",
                config.model
            )
        );
        assert!(!out.contains('\n'));
    }

    #[test]
    fn local_tier_can_be_disabled() {
        let config = DescribeConfig {
            endpoint: Some("http://127.0.0.1:9/v1/completions".to_string()),
            local: LocalInferenceConfig {
                enabled: false,
                ..LocalInferenceConfig::default()
            },
            ..DescribeConfig::default()
        };
        assert_eq!(
            Describer::from_config(&config).backend_names(),
            ["remote", "template"]
        );
    }

    #[test]
    fn no_endpoint_goes_straight_to_local_tier() {
        if std::env::var(crate::config::ENDPOINT_ENV).is_ok() {
            return;
        }
        let config = DescribeConfig {
            endpoint: None,
            ..DescribeConfig::default()
        };
        assert_eq!(
            Describer::from_config(&config).backend_names(),
            ["local", "template"]
        );
    }
}
