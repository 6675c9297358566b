//! Model-output sanitization.
//!
//! Models are told to return bare JSON but still wrap it in markdown fences
//! often enough that stripping them is part of the contract. Parsing failures
//! carry only a bounded excerpt of the offending text.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::plan::errors::PlanError;

/// Maximum number of characters of raw model output echoed in errors.
pub const RAW_EXCERPT_MAX_CHARS: usize = 200;

// Literal patterns; compilation cannot fail at runtime.
#[allow(clippy::unwrap_used)]
static OPENING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```(?:json)?\s*").unwrap());

#[allow(clippy::unwrap_used)]
static CLOSING_FENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*```$").unwrap());

/// Trim surrounding whitespace and strip a wrapping markdown code fence.
///
/// Texts that do not open with a fence come back unchanged apart from the
/// trim, so the function is idempotent.
#[must_use]
pub fn strip_code_fences(text: &str) -> String {
    let trimmed = text.trim();
    if !trimmed.starts_with("```") {
        return trimmed.to_string();
    }

    let opened = OPENING_FENCE.replace(trimmed, "");
    CLOSING_FENCE.replace(&opened, "").into_owned()
}

/// Sanitize model output and parse it as JSON.
///
/// # Errors
/// Returns [`PlanError::MalformedOutput`] when the sanitized text is not
/// valid JSON; the error carries the parse detail and an excerpt of at most
/// [`RAW_EXCERPT_MAX_CHARS`] characters, never the full payload.
pub fn parse_plan_json(text: &str) -> Result<Value, PlanError> {
    let sanitized = strip_code_fences(text);
    serde_json::from_str(&sanitized).map_err(|err| PlanError::MalformedOutput {
        detail: err.to_string(),
        raw_excerpt: excerpt(&sanitized),
    })
}

/// First [`RAW_EXCERPT_MAX_CHARS`] characters of `text`.
fn excerpt(text: &str) -> String {
    text.chars().take(RAW_EXCERPT_MAX_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BARE: &str = r#"{"days":[{"day":1,"meals":[]}]}"#;

    #[test]
    fn test_strip_is_identity_without_fences() {
        assert_eq!(strip_code_fences(BARE), BARE);
        assert_eq!(strip_code_fences("  {\"a\":1}\n"), "{\"a\":1}");
    }

    #[test]
    fn test_strip_json_fence() {
        let fenced = format!("```json\n{BARE}\n```");
        assert_eq!(strip_code_fences(&fenced), BARE);
    }

    #[test]
    fn test_strip_plain_fence() {
        let fenced = format!("```\n{BARE}\n```");
        assert_eq!(strip_code_fences(&fenced), BARE);
    }

    #[test]
    fn test_fenced_variants_parse_identically() {
        let bare = parse_plan_json(BARE).expect("bare");
        let json_fence = parse_plan_json(&format!("```json\n{BARE}\n```")).expect("json fence");
        let plain_fence = parse_plan_json(&format!("```\n{BARE}\n```")).expect("plain fence");
        assert_eq!(bare, json_fence);
        assert_eq!(bare, plain_fence);
    }

    #[test]
    fn test_prose_prefix_fails_with_bounded_excerpt() {
        let long_tail = "x".repeat(500);
        let reply = format!("Sure! Here's your plan: {{\"days\": {long_tail}");
        let err = parse_plan_json(&reply).expect_err("must not parse");
        match err {
            PlanError::MalformedOutput { raw_excerpt, .. } => {
                assert!(raw_excerpt.chars().count() <= RAW_EXCERPT_MAX_CHARS);
                assert!(raw_excerpt.starts_with("Sure!"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_excerpt_respects_multibyte_text() {
        let reply = "phở ".repeat(120);
        let err = parse_plan_json(&reply).expect_err("must not parse");
        match err {
            PlanError::MalformedOutput { raw_excerpt, .. } => {
                assert_eq!(raw_excerpt.chars().count(), RAW_EXCERPT_MAX_CHARS);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
