//! Google Gemini client.
//!
//! Thin async wrapper over the `generateContent` REST endpoint. One inbound
//! request maps to exactly one outbound call: no retries, no streaming, no
//! fan-out. Timeouts are explicit and map to [`LlmError::Timeout`] so a hung
//! upstream never blocks a request indefinitely.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::ServerConfig;
use crate::llm::{GenerationParams, LlmError, ModelClient};

/// Default base URL of the Generative Language API.
pub const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Deadline for a whole generation request unless configured otherwise.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
/// Deadline for establishing the connection.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: WireGenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireGenerationConfig {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

impl From<&GenerationParams> for WireGenerationConfig {
    fn from(params: &GenerationParams) -> Self {
        Self {
            temperature: params.temperature,
            top_p: params.top_p,
            top_k: params.top_k,
            max_output_tokens: params.max_output_tokens,
        }
    }
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Option<Vec<CandidatePart>>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: Option<ApiErrorDetail>,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Async client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a client for the public API endpoint.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>) -> Result<Self, LlmError> {
        Self::with_base_url(api_key, API_BASE_URL)
    }

    /// Create a client against a custom base URL (tests, gateways).
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, LlmError> {
        Self::build(api_key.into(), &base_url.into(), DEFAULT_REQUEST_TIMEOUT)
    }

    /// Build a client from server configuration, honoring its base-URL
    /// override and request timeout.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn from_config(config: &ServerConfig) -> Result<Self, LlmError> {
        let base_url = config
            .base_url
            .as_ref()
            .map_or(API_BASE_URL, Url::as_str)
            .to_string();
        Self::build(
            config.gemini_api_key.clone(),
            &base_url,
            config.request_timeout,
        )
    }

    fn build(api_key: String, base_url: &str, timeout: Duration) -> Result<Self, LlmError> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn build_url(&self, model: &str) -> String {
        format!(
            "{}/models/{model}:generateContent?key={}",
            self.base_url, self.api_key
        )
    }

    fn extract_text(response: GenerateContentResponse) -> Result<String, LlmError> {
        let mut out = String::new();
        let candidate = response
            .candidates
            .and_then(|mut candidates| {
                if candidates.is_empty() {
                    None
                } else {
                    Some(candidates.remove(0))
                }
            })
            .ok_or(LlmError::EmptyResponse)?;

        if let Some(parts) = candidate.content.and_then(|content| content.parts) {
            for part in parts {
                if let Some(text) = part.text {
                    out.push_str(&text);
                }
            }
        }

        if out.is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        Ok(out)
    }

    fn map_transport_error(err: reqwest::Error) -> LlmError {
        if err.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::Transport(err)
        }
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, LlmError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
            generation_config: WireGenerationConfig::from(params),
        };

        let url = self.build_url(model);
        tracing::debug!(model, prompt_chars = prompt.len(), "calling gemini");

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(Self::map_transport_error)?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .and_then(|parsed| parsed.error)
                .map_or_else(|| "unknown api error".to_string(), |detail| detail.message);
            tracing::error!(status = status.as_u16(), "gemini api error");
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse =
            serde_json::from_str(&body).map_err(|err| LlmError::InvalidResponse(err.to_string()))?;

        let text = Self::extract_text(parsed)?;
        tracing::debug!(model, reply_chars = text.len(), "gemini reply received");
        Ok(text)
    }
}
