//! Structural validation of parsed model output.
//!
//! The contract with callers is minimal: a plan is trusted once `days` is a
//! non-empty array. Everything deeper deserializes into optional fields and
//! stays best-effort.

use serde_json::Value;

use crate::plan::errors::{PlanError, PlanResult};
use crate::plan::types::GeneratedPlan;

/// Check the minimum expected shape and produce a typed plan.
///
/// # Errors
/// Returns [`PlanError::InvalidStructure`] when `days` is missing, not an
/// array, empty, or when the tree cannot deserialize into the loose plan
/// types.
pub fn validate_plan(value: Value) -> PlanResult<GeneratedPlan> {
    let days = value
        .get("days")
        .and_then(Value::as_array)
        .ok_or(PlanError::InvalidStructure)?;
    if days.is_empty() {
        return Err(PlanError::InvalidStructure);
    }

    serde_json::from_value(value).map_err(|_| PlanError::InvalidStructure)
}
