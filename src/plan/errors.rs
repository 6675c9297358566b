//! Error taxonomy for plan generation.
//!
//! Every failure is terminal for its request: nothing is retried locally,
//! and no partial plan is ever returned. The client decides whether to
//! re-trigger generation.

use thiserror::Error;

use crate::llm::LlmError;

/// Failure modes of the plan-generation pipeline.
#[derive(Debug, Error)]
pub enum PlanError {
    /// The caller omitted a required field or sent an out-of-enum value.
    #[error("{0}")]
    InvalidRequest(String),
    /// The model call itself failed (network, auth, quota, timeout).
    #[error("model call failed: {0}")]
    Upstream(#[from] LlmError),
    /// The model replied but its text was not valid JSON after
    /// fence-stripping.
    #[error("model output is not valid JSON: {detail}")]
    MalformedOutput {
        /// Parser error message.
        detail: String,
        /// Bounded excerpt of the sanitized model output.
        raw_excerpt: String,
    },
    /// Parsed JSON lacks a non-empty `days` list.
    #[error("plan structure is invalid: missing non-empty days list")]
    InvalidStructure,
}

/// Convenience result alias for plan operations.
pub type PlanResult<T> = Result<T, PlanError>;
