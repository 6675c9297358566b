//! Request and plan types for meal-plan generation.
//!
//! The generated-plan tree is deliberately loose: only the `days` list is
//! guaranteed by validation, so everything deeper stays optional and
//! consumers must handle absence themselves.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::plan::targets::{Budget, Goal, DEFAULT_PLAN_DAYS};

/// A single plan-generation request. Built per call, never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlanRequest {
    /// Dietary objective.
    pub goal: Goal,
    /// Daily budget tier.
    pub budget: Budget,
    /// Free-text notes from the user; may be empty.
    pub user_notes: String,
    /// Number of days to plan.
    pub days: u32,
}

impl PlanRequest {
    /// Create a request with default budget, empty notes and a 7-day span.
    #[must_use]
    pub fn new(goal: Goal) -> Self {
        Self {
            goal,
            budget: Budget::default(),
            user_notes: String::new(),
            days: DEFAULT_PLAN_DAYS,
        }
    }

    /// Set the budget tier.
    #[must_use]
    pub const fn with_budget(mut self, budget: Budget) -> Self {
        self.budget = budget;
        self
    }

    /// Set the user notes.
    #[must_use]
    pub fn with_user_notes(mut self, notes: impl Into<String>) -> Self {
        self.user_notes = notes.into();
        self
    }

    /// Set the number of days.
    #[must_use]
    pub const fn with_days(mut self, days: u32) -> Self {
        self.days = days;
        self
    }
}

/// A validated meal plan returned by the model.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPlan {
    /// One entry per planned day. Guaranteed non-empty after validation.
    pub days: Vec<DayPlan>,
    /// Optional plan-level summary block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<PlanSummary>,
}

/// One day's worth of meals.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    /// 1-based day number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
    /// Total calories planned for the day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_calories: Option<f64>,
    /// Meals for the day, in serving order.
    #[serde(default)]
    pub meals: Vec<Meal>,
}

/// A single meal within a day.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    /// Meal label ("Sáng", "Trưa", "Tối", "Snack").
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub meal_type: Option<String>,
    /// Serving time as "HH:MM".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Dishes making up the meal.
    #[serde(default)]
    pub foods: Vec<Food>,
    /// Total calories for the meal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_calories: Option<f64>,
    /// Free-text note attached to the meal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A single dish with its macros and recipe.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Food {
    /// Dish name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Portion description ("1 tô", "100g", ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portion: Option<String>,
    /// Calories in kcal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    /// Protein in grams.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,
    /// Carbohydrates in grams.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbs: Option<f64>,
    /// Fat in grams.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>,
    /// Cooking recipe for the dish.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe: Option<Recipe>,
}

/// Recipe attached to a dish.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Ingredient list with quantities.
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Ordered cooking steps.
    #[serde(default)]
    pub instructions: Vec<String>,
}

/// Optional summary block the model appends to a plan.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSummary {
    /// Goal label echoed by the model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    /// Average daily calories across the plan.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_calories: Option<f64>,
    /// Budget label echoed by the model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    /// General dietary tips.
    #[serde(default)]
    pub tips: Vec<String>,
}

/// Request metadata echoed alongside a successful plan.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanMetadata {
    /// Goal label exactly as the caller sent it.
    pub goal: String,
    /// Budget tier the plan was generated for.
    pub budget: Budget,
    /// Caller notes, absent when none were sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_notes: Option<String>,
    /// UTC timestamp of generation, RFC 3339.
    pub generated_at: DateTime<Utc>,
}
