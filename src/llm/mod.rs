//! Generative-model client abstraction.
//!
//! Handlers talk to a [`ModelClient`] trait object injected through the
//! application state, never to an ambient singleton. The production
//! implementation is [`gemini::GeminiClient`]; tests script their own.

pub mod gemini;

pub use gemini::GeminiClient;

use async_trait::async_trait;
use thiserror::Error;

/// Tuning knobs forwarded with a generation request.
///
/// These control output diversity and length, not correctness; the presets
/// mirror what each endpoint has always sent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenerationParams {
    /// Sampling temperature.
    pub temperature: f32,
    /// Nucleus sampling cutoff.
    pub top_p: Option<f32>,
    /// Top-k sampling cutoff.
    pub top_k: Option<u32>,
    /// Cap on generated tokens.
    pub max_output_tokens: Option<u32>,
}

impl GenerationParams {
    /// Preset for meal-plan generation: moderate diversity, no length cap.
    #[must_use]
    pub const fn meal_plan() -> Self {
        Self {
            temperature: 0.7,
            top_p: Some(0.8),
            top_k: Some(40),
            max_output_tokens: None,
        }
    }

    /// Preset for chat replies: slightly warmer, capped at 500 tokens.
    #[must_use]
    pub const fn chat() -> Self {
        Self {
            temperature: 0.8,
            top_p: None,
            top_k: None,
            max_output_tokens: Some(500),
        }
    }
}

/// Errors produced by a model client.
#[derive(Debug, Error)]
pub enum LlmError {
    /// The request did not complete within the configured deadline.
    #[error("model call timed out")]
    Timeout,
    /// Transport-level HTTP failure (connect, TLS, body read).
    #[error("http transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The API answered with a non-success status.
    #[error("model api error (status {status}): {message}")]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Error message extracted from the response body.
        message: String,
    },
    /// The response body did not match the expected schema.
    #[error("unexpected model response shape: {0}")]
    InvalidResponse(String),
    /// The API answered but carried no generated text.
    #[error("model returned no text")]
    EmptyResponse,
}

/// A client able to turn a prompt into generated text.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Generate text for `prompt` with the given model and tuning.
    ///
    /// # Errors
    /// Returns an [`LlmError`] when the call fails or the response carries
    /// no usable text.
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, LlmError>;
}
