//! Server configuration.
//!
//! Everything comes from the environment; there is no config file. The API
//! key is the only required value and is validated up front so a missing key
//! fails at startup, not on the first request.

use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Environment variable holding the Gemini API key.
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";
/// Environment variable overriding the listening port.
pub const PORT_ENV: &str = "NUTRIPLAN_PORT";
/// Environment variable overriding the meal-plan model.
pub const PLAN_MODEL_ENV: &str = "NUTRIPLAN_PLAN_MODEL";
/// Environment variable overriding the chat model.
pub const CHAT_MODEL_ENV: &str = "NUTRIPLAN_CHAT_MODEL";
/// Environment variable overriding the Gemini base URL.
pub const GEMINI_URL_ENV: &str = "NUTRIPLAN_GEMINI_URL";

/// Default listening port.
pub const DEFAULT_PORT: u16 = 3001;
/// Default model for meal-plan generation.
pub const DEFAULT_PLAN_MODEL: &str = "gemini-1.5-flash";
/// Default model for chat replies.
pub const DEFAULT_CHAT_MODEL: &str = "gemini-2.0-flash-exp";

/// Configuration errors raised at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The Gemini API key is missing or empty.
    #[error("{GEMINI_API_KEY_ENV} is not set")]
    MissingApiKey,
    /// An environment value could not be parsed.
    #[error("invalid configuration: {0}")]
    Invalid(String),
    /// The base-URL override is not a valid URL.
    #[error("invalid gemini base url: {0}")]
    BaseUrl(#[from] url::ParseError),
}

/// Runtime configuration for the server.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Listening port.
    pub port: u16,
    /// Gemini API key.
    pub gemini_api_key: String,
    /// Model used for meal-plan generation.
    pub plan_model: String,
    /// Model used for chat replies.
    pub chat_model: String,
    /// Optional base-URL override for the Gemini API.
    pub base_url: Option<Url>,
    /// Deadline for a whole model call.
    pub request_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            gemini_api_key: String::new(),
            plan_model: DEFAULT_PLAN_MODEL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            base_url: None,
            request_timeout: Duration::from_secs(60),
        }
    }
}

impl ServerConfig {
    /// Read configuration from the environment.
    ///
    /// # Errors
    /// Returns an error when a set variable fails to parse. A missing API
    /// key is not an error here; [`ServerConfig::validate`] catches it so
    /// tests can construct keyless configs.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(port) = std::env::var(PORT_ENV) {
            config.port = port
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("{PORT_ENV} must be a port number")))?;
        }
        if let Ok(key) = std::env::var(GEMINI_API_KEY_ENV) {
            config.gemini_api_key = key;
        }
        if let Ok(model) = std::env::var(PLAN_MODEL_ENV) {
            config.plan_model = model;
        }
        if let Ok(model) = std::env::var(CHAT_MODEL_ENV) {
            config.chat_model = model;
        }
        if let Ok(raw) = std::env::var(GEMINI_URL_ENV) {
            config.base_url = Some(Url::parse(&raw)?);
        }

        Ok(config)
    }

    /// Set the API key.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.gemini_api_key = key.into();
        self
    }

    /// Set the listening port.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Check configuration invariants.
    ///
    /// # Errors
    /// Returns an error when the API key is empty or the timeout is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gemini_api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::Invalid(
                "request_timeout must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 3001);
        assert_eq!(config.plan_model, "gemini-1.5-flash");
        assert_eq!(config.chat_model, "gemini-2.0-flash-exp");
        assert!(config.base_url.is_none());
    }

    #[test]
    fn test_validate_rejects_empty_api_key() {
        let config = ServerConfig::default();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingApiKey)
        ));
        assert!(config.with_api_key("k").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = ServerConfig::default().with_api_key("k");
        config.request_timeout = Duration::ZERO;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
