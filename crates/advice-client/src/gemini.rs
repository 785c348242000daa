use async_trait::async_trait;
use reqwest::Client;
use sehatku_core::AdvicePrompt;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};

use crate::{AdviceClient, AdviceError};

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Option<Duration>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("has_api_key", &self.api_key.is_some())
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

pub struct GeminiClient {
    config: GeminiConfig,
    endpoint: String,
    http_client: Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, AdviceError> {
        let mut builder =
            Client::builder().user_agent(concat!("sehatku/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|err| AdviceError::Network(format!("http client build failed: {err}")))?;
        Ok(Self::with_http_client(config, http_client))
    }

    pub(crate) fn with_http_client(config: GeminiConfig, http_client: Client) -> Self {
        let endpoint = generate_content_url(&config.base_url, &config.model);
        Self {
            config,
            endpoint,
            http_client,
        }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key().is_some()
    }

    fn api_key(&self) -> Option<&str> {
        self.config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

#[async_trait]
impl AdviceClient for GeminiClient {
    async fn generate(&self, prompt: &AdvicePrompt) -> Result<String, AdviceError> {
        let api_key = self.api_key().ok_or(AdviceError::MissingApiKey)?;
        let body = GenerateContentRequest::user_text(prompt.as_str());

        tracing::debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            "sending generateContent"
        );
        let started = Instant::now();
        let response = self
            .http_client
            .post(&self.endpoint)
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await
            .map_err(AdviceError::from_transport)?;
        let status = response.status();
        let text = response.text().await.map_err(AdviceError::from_transport)?;
        tracing::debug!(
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            body_len = text.len(),
            "generateContent responded"
        );

        if !status.is_success() {
            return Err(AdviceError::from_status(status.as_u16(), &text));
        }
        extract_text(&text)
    }
}

fn generate_content_url(base_url: &str, model: &str) -> String {
    let model = model.trim().trim_start_matches("models/");
    format!(
        "{}/models/{}:generateContent",
        base_url.trim().trim_end_matches('/'),
        model
    )
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
}

impl<'a> GenerateContentRequest<'a> {
    fn user_text(text: &'a str) -> Self {
        Self {
            contents: [Content {
                role: "user",
                parts: [Part { text }],
            }],
        }
    }
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

/// Concatenates the text parts of the first candidate, in order.
fn extract_text(body: &str) -> Result<String, AdviceError> {
    let response: GenerateContentResponse =
        serde_json::from_str(body).map_err(|err| AdviceError::Parse(err.to_string()))?;

    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason);
        return Err(AdviceError::Empty { reason });
    };

    let text: String = candidate
        .content
        .map(|content| content.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|part| part.text)
        .collect();
    if text.trim().is_empty() {
        return Err(AdviceError::Empty {
            reason: candidate.finish_reason,
        });
    }
    Ok(text)
}
