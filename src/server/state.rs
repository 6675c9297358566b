//! Application state shared across all request handlers.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::llm::{GeminiClient, LlmError, ModelClient};

/// Shared application state.
pub struct AppState {
    /// Injected model client used by both AI endpoints.
    pub model: Arc<dyn ModelClient>,
    /// Runtime configuration.
    pub config: ServerConfig,
}

impl AppState {
    /// Create state backed by a Gemini client built from `config`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: ServerConfig) -> Result<Arc<Self>, LlmError> {
        let model = Arc::new(GeminiClient::from_config(&config)?);
        Ok(Arc::new(Self { model, config }))
    }

    /// Create state with an explicit model client (tests, alternate
    /// providers).
    #[must_use]
    pub fn with_model(config: ServerConfig, model: Arc<dyn ModelClient>) -> Arc<Self> {
        Arc::new(Self { model, config })
    }
}
