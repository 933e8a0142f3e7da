//! Remote completion endpoint tier
//!
//! Gated by a health probe: `GET <health-url>` with a short timeout must answer
//! 2xx or 3xx before `POST <endpoint>` is attempted. The completion request has
//! no explicit deadline.

use crate::describe::backend::DescriptionBackend;
use crate::describe::prompt::DescriptionRequest;
use crate::error::BackendError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const COMPLETION_MAX_TOKENS: u32 = 100;
pub const COMPLETION_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_HEALTH_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    #[serde(default)]
    text: String,
}

/// Derive the health URL by swapping the completion path suffix for `/health`.
///
/// `https://host/v1/completions` becomes `https://host/health`. Endpoints without
/// a completion suffix get `/health` appended. Query and fragment are kept.
pub fn health_url_for(endpoint: &str) -> String {
    let trimmed = endpoint.trim();
    match reqwest::Url::parse(trimmed) {
        Ok(mut url) => {
            let health_path = health_path_for(url.path());
            url.set_path(&health_path);
            url.to_string()
        }
        Err(_) => health_path_for(trimmed),
    }
}

fn health_path_for(path: &str) -> String {
    let path = path.trim_end_matches('/');
    let base = ["/v1/completions", "/completions"]
        .iter()
        .find_map(|suffix| path.strip_suffix(suffix))
        .unwrap_or(path);
    format!("{}/health", base)
}

/// OpenAI-style `/v1/completions` client.
pub struct RemoteCompletionBackend {
    endpoint: String,
    health_url: String,
    model: String,
    api_key: Option<String>,
    health_timeout: Duration,
    client: reqwest::Client,
    runtime: tokio::runtime::Runtime,
}

impl RemoteCompletionBackend {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Result<Self, BackendError> {
        let endpoint = endpoint.into();
        let runtime = tokio::runtime::Runtime::new()
            .map_err(|e| BackendError::Runtime(e.to_string()))?;
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            health_url: health_url_for(&endpoint),
            endpoint,
            model: model.into(),
            api_key: api_key.filter(|k| !k.is_empty()),
            health_timeout: DEFAULT_HEALTH_TIMEOUT,
            client,
            runtime,
        })
    }

    pub fn with_health_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn health_url(&self) -> &str {
        &self.health_url
    }

    async fn check_health(&self) -> Result<(), BackendError> {
        let mut request = self
            .client
            .get(&self.health_url)
            .timeout(self.health_timeout);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() || status.is_redirection() {
            Ok(())
        } else {
            Err(BackendError::HealthStatus(status.as_u16()))
        }
    }

    async fn complete(&self, prompt: &str) -> Result<String, BackendError> {
        let payload = CompletionRequest {
            model: &self.model,
            prompt,
            max_tokens: COMPLETION_MAX_TOKENS,
            temperature: COMPLETION_TEMPERATURE,
        };
        let mut request = self.client.post(&self.endpoint).json(&payload);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        let body = request.send().await?.bytes().await?;
        let parsed: CompletionResponse =
            serde_json::from_slice(&body).map_err(|e| BackendError::Decode(e.to_string()))?;
        let text = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.text)
            .ok_or(BackendError::EmptyResponse)?;
        if text.trim().is_empty() {
            return Err(BackendError::EmptyResponse);
        }
        Ok(text)
    }
}

impl DescriptionBackend for RemoteCompletionBackend {
    fn name(&self) -> &'static str {
        "remote"
    }

    fn attempt(&self, request: &DescriptionRequest) -> Result<String, BackendError> {
        self.runtime.block_on(async {
            self.check_health().await?;
            tracing::debug!(endpoint = %self.endpoint, item = %request.target, "querying completion endpoint");
            self.complete(request.prompt()).await
        })
    }
}
