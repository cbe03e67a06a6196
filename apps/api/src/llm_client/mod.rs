//! LLM Client: the single point of entry for all generative-model calls.
//!
//! ARCHITECTURAL RULE: No other module may talk to the model provider directly.
//! Prompt text goes in, parsed JSON comes out. Calls are never retried: a
//! transient provider failure or malformed output fails the request.
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-1.5-pro";
const JSON_MIME_TYPE: &str = "application/json";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("Model did not return valid JSON ({source}):\n{raw}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
        raw: String,
    },

    #[error("LLM call timed out after {0}s")]
    Timeout(u64),
}

/// Sampling settings sent with a single call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationConfig {
    pub temperature: f32,
    /// Ask the provider for a JSON-typed response body.
    pub json_response: bool,
}

impl GenerationConfig {
    pub fn json(temperature: f32) -> Self {
        Self {
            temperature,
            json_response: true,
        }
    }
}

/// A generative-model provider. Returns the raw text of the model's answer.
#[async_trait]
pub trait LlmBackend: Send + Sync {
    async fn generate(&self, prompt: &str, config: GenerationConfig) -> Result<String, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Gemini wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    role: &'a str,
    parts: Vec<GeminiRequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiRequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GeminiGenerationConfig {
    temperature: f32,
    #[serde(rename = "responseMimeType", skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
}

#[derive(Debug, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(rename = "usageMetadata")]
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    #[serde(rename = "finishReason")]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UsageMetadata {
    #[serde(rename = "promptTokenCount", default)]
    pub prompt_token_count: u32,
    #[serde(rename = "candidatesTokenCount", default)]
    pub candidates_token_count: u32,
}

impl GeminiResponse {
    /// Concatenated text parts of the first candidate.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// Google Gemini `generateContent` REST backend.
#[derive(Clone)]
pub struct GeminiBackend {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiBackend {
    pub fn new(
        api_key: String,
        model: String,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl LlmBackend for GeminiBackend {
    async fn generate(&self, prompt: &str, config: GenerationConfig) -> Result<String, LlmError> {
        let request_body = GeminiRequest {
            contents: vec![GeminiContent {
                role: "user",
                parts: vec![GeminiRequestPart { text: prompt }],
            }],
            generation_config: GeminiGenerationConfig {
                temperature: config.temperature,
                response_mime_type: config.json_response.then_some(JSON_MIME_TYPE),
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let gemini_response: GeminiResponse = response.json().await?;

        if let Some(usage) = &gemini_response.usage_metadata {
            debug!(
                "LLM call succeeded: model={}, prompt_tokens={}, output_tokens={}",
                self.model, usage.prompt_token_count, usage.candidates_token_count
            );
        }

        let text = gemini_response.text();
        if text.is_none() {
            warn!(
                "Model returned no text (finish reason: {})",
                gemini_response
                    .candidates
                    .first()
                    .and_then(|c| c.finish_reason.as_deref())
                    .unwrap_or("unknown")
            );
        }
        text.ok_or(LlmError::EmptyContent)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// The single LLM client shared by all request handlers.
/// Wraps a backend with an overall deadline and structured output helpers.
#[derive(Clone)]
pub struct LlmClient {
    backend: Arc<dyn LlmBackend>,
    timeout: Duration,
}

impl LlmClient {
    pub fn new(backend: Arc<dyn LlmBackend>, timeout: Duration) -> Self {
        Self { backend, timeout }
    }

    /// Makes a raw call, returning the model's text. No retries.
    pub async fn call(&self, prompt: &str, config: GenerationConfig) -> Result<String, LlmError> {
        tokio::time::timeout(self.timeout, self.backend.generate(prompt, config))
            .await
            .map_err(|_| LlmError::Timeout(self.timeout.as_secs()))?
    }

    /// Calls the LLM and deserializes the text response as JSON.
    /// Code fences are stripped first; any parse failure carries the raw text.
    pub async fn call_json<T: DeserializeOwned>(
        &self,
        prompt: &str,
        config: GenerationConfig,
    ) -> Result<T, LlmError> {
        let raw = self.call(prompt, config).await?;
        parse_json_response(&raw)
    }
}

/// Strips code fences and deserializes; failure keeps the raw text for the caller.
pub fn parse_json_response<T: DeserializeOwned>(raw: &str) -> Result<T, LlmError> {
    serde_json::from_str(strip_json_fences(raw)).map_err(|source| LlmError::InvalidJson {
        source,
        raw: raw.to_string(),
    })
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(body) = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```JSON"))
        .or_else(|| text.strip_prefix("```"))
    else {
        return text;
    };

    let body = body.trim_start();
    body.strip_suffix("```").map(str::trim).unwrap_or(body)
}
