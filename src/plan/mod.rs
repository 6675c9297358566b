//! Meal-plan generation core: domain tables, prompt construction, model
//! output sanitization and structural validation.

pub mod errors;
pub mod prompt;
pub mod sanitize;
pub mod targets;
pub mod types;
pub mod validate;

pub use errors::{PlanError, PlanResult};
pub use types::{GeneratedPlan, PlanMetadata, PlanRequest};
