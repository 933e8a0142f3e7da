//! Local inference subprocess tier
//!
//! Contract with the external program:
//! - invoked as `<program> <args..> --prompt <prompt>`
//! - the model cache directory is passed in the `cache_env` variable
//! - a zero exit with non-blank stdout is a description; anything else is a failure
//!
//! No timeout is applied; the program runs to completion.

use crate::config::LocalInferenceConfig;
use crate::describe::backend::DescriptionBackend;
use crate::describe::prompt::DescriptionRequest;
use crate::error::BackendError;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Longest stderr excerpt kept in a failure report.
const STDERR_EXCERPT: usize = 512;

#[derive(Debug, Clone)]
pub struct LocalInferenceBackend {
    program: String,
    args: Vec<String>,
    cache_dir: PathBuf,
    cache_env: String,
    working_dir: Option<PathBuf>,
    require_cached_model: bool,
}

impl LocalInferenceBackend {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        let defaults = LocalInferenceConfig::default();
        Self {
            program: program.into(),
            args,
            cache_dir: defaults.cache_dir,
            cache_env: defaults.cache_env,
            working_dir: None,
            require_cached_model: false,
        }
    }

    pub fn from_config(config: &LocalInferenceConfig) -> Self {
        Self {
            program: config.program.clone(),
            args: config.args.clone(),
            cache_dir: config.resolved_cache_dir(),
            cache_env: config.cache_env.clone(),
            working_dir: config.working_dir.clone(),
            require_cached_model: config.require_cached_model,
        }
    }

    pub fn with_cache_dir(mut self, cache_dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = cache_dir.into();
        self
    }

    pub fn with_cache_env(mut self, cache_env: impl Into<String>) -> Self {
        self.cache_env = cache_env.into();
        self
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn require_cached_model(mut self, required: bool) -> Self {
        self.require_cached_model = required;
        self
    }

    /// Cache directory as the child process will see it.
    pub fn cache_dir(&self) -> PathBuf {
        match &self.working_dir {
            Some(dir) if self.cache_dir.is_relative() => dir.join(&self.cache_dir),
            _ => self.cache_dir.clone(),
        }
    }

    /// Whether the cache holds at least one downloaded model (`models--*` entry).
    pub fn model_is_cached(&self) -> bool {
        model_cache_populated(&self.cache_dir())
    }
}

fn model_cache_populated(cache_dir: &Path) -> bool {
    let Ok(entries) = std::fs::read_dir(cache_dir) else {
        return false;
    };
    entries
        .filter_map(Result::ok)
        .any(|entry| entry.file_name().to_string_lossy().starts_with("models--"))
}

impl DescriptionBackend for LocalInferenceBackend {
    fn name(&self) -> &'static str {
        "local"
    }

    fn attempt(&self, request: &DescriptionRequest) -> Result<String, BackendError> {
        if self.require_cached_model && !self.model_is_cached() {
            return Err(BackendError::ModelNotCached(self.cache_dir()));
        }

        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .arg("--prompt")
            .arg(request.prompt())
            .env(&self.cache_env, &self.cache_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }

        tracing::debug!(program = %self.program, args = ?self.args, item = %request.target, "running local inference");
        let output = command.output().map_err(|source| BackendError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr: String = stderr.trim().chars().take(STDERR_EXCERPT).collect();
            return Err(BackendError::ProcessFailed {
                status: output.status.to_string(),
                stderr,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if stdout.trim().is_empty() {
            return Err(BackendError::EmptyOutput);
        }
        Ok(stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn request() -> DescriptionRequest {
        DescriptionRequest::new("lib.rs".into(), false, String::new(), "Explain".into())
    }

    #[cfg(unix)]
    fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn missing_program_is_a_spawn_failure() {
        let backend = LocalInferenceBackend::new("/definitely/not/a/python", vec![]);
        assert!(matches!(
            backend.attempt(&request()),
            Err(BackendError::Spawn { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn passes_prompt_flag_and_cache_env() {
        let temp = TempDir::new().unwrap();
        let program = script(
            temp.path(),
            "infer.sh",
            r#"[ "$1" = "--prompt" ] || exit 3
echo "cache=$MODEL_CACHE"
case "$2" in *"Task: Explain"*) echo "saw prompt" ;; esac"#,
        );

        let backend = LocalInferenceBackend::new(program.to_string_lossy(), vec![])
            .with_cache_env("MODEL_CACHE")
            .with_cache_dir("/tmp/model-cache");
        let out = backend.attempt(&request()).unwrap();
        assert!(out.contains("cache=/tmp/model-cache"));
        assert!(out.contains("saw prompt"));
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_and_empty_output_are_failures() {
        let temp = TempDir::new().unwrap();
        let failing = script(temp.path(), "fail.sh", "echo boom >&2; exit 1");
        let silent = script(temp.path(), "silent.sh", "exit 0");

        let err = LocalInferenceBackend::new(failing.to_string_lossy(), vec![])
            .attempt(&request())
            .unwrap_err();
        match err {
            BackendError::ProcessFailed { stderr, .. } => assert_eq!(stderr, "boom"),
            other => panic!("expected process failure, got {:?}", other),
        }

        assert!(matches!(
            LocalInferenceBackend::new(silent.to_string_lossy(), vec![]).attempt(&request()),
            Err(BackendError::EmptyOutput)
        ));
    }

    #[test]
    fn uncached_model_skips_subprocess_when_required() {
        let temp = TempDir::new().unwrap();
        let backend = LocalInferenceBackend::new("/definitely/not/a/python", vec![])
            .with_cache_dir(temp.path().join("cache"))
            .require_cached_model(true);
        assert!(!backend.model_is_cached());
        assert!(matches!(
            backend.attempt(&request()),
            Err(BackendError::ModelNotCached(_))
        ));

        fs::create_dir_all(temp.path().join("cache").join("models--ibm-granite")).unwrap();
        assert!(backend.model_is_cached());
    }

    #[test]
    fn relative_cache_dir_resolves_against_working_dir() {
        let backend = LocalInferenceBackend::new("python", vec![])
            .with_cache_dir(".hf-cache")
            .with_working_dir("/opt/tree-ai");
        assert_eq!(backend.cache_dir(), PathBuf::from("/opt/tree-ai/.hf-cache"));
    }
}
