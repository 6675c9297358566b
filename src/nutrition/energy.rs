//! Daily energy expenditure estimates.
//!
//! Mifflin-St Jeor for the basal rate, a fixed activity multiplier on top.
//! The app treats the result as a guidance figure, not a prescription.

use serde::{Deserialize, Serialize};

/// Biological profile used by the BMR formula.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Male formula constant (+5).
    Male,
    /// Female formula constant (−161).
    Female,
    /// Uses the female constant, matching the app's non-male branch.
    Other,
}

/// Self-reported activity level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise.
    Sedentary,
    /// Light exercise 1-3 days/week.
    Light,
    /// Moderate exercise 3-5 days/week.
    Moderate,
    /// Hard exercise 6-7 days/week.
    Active,
    /// Very hard exercise or a physical job.
    VeryActive,
}

impl ActivityLevel {
    /// TDEE multiplier for this level.
    #[must_use]
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Sedentary => 1.2,
            Self::Light => 1.375,
            Self::Moderate => 1.55,
            Self::Active => 1.725,
            Self::VeryActive => 1.9,
        }
    }
}

/// Multiplier applied when no activity level is known.
const DEFAULT_MULTIPLIER: f64 = 1.55;

/// Mifflin-St Jeor basal metabolic rate in kcal/day.
///
/// `weight_kg`, `height_cm` and `age_years` come straight from the profile;
/// no range checking is done here.
#[must_use]
pub fn basal_metabolic_rate(gender: Gender, weight_kg: f64, height_cm: f64, age_years: f64) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age_years;
    match gender {
        Gender::Male => base + 5.0,
        Gender::Female | Gender::Other => base - 161.0,
    }
}

/// Total daily energy expenditure, rounded to whole kcal.
#[must_use]
pub fn daily_energy_target(
    gender: Gender,
    weight_kg: f64,
    height_cm: f64,
    age_years: f64,
    activity: Option<ActivityLevel>,
) -> f64 {
    let multiplier = activity.map_or(DEFAULT_MULTIPLIER, ActivityLevel::multiplier);
    (basal_metabolic_rate(gender, weight_kg, height_cm, age_years) * multiplier).round()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_male_bmr() {
        // 10*70 + 6.25*175 - 5*30 + 5
        let bmr = basal_metabolic_rate(Gender::Male, 70.0, 175.0, 30.0);
        assert!((bmr - 1648.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_female_and_other_share_a_constant() {
        let female = basal_metabolic_rate(Gender::Female, 60.0, 165.0, 25.0);
        let other = basal_metabolic_rate(Gender::Other, 60.0, 165.0, 25.0);
        assert!((female - other).abs() < f64::EPSILON);
        assert!((female - 1345.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_tdee_rounds_with_moderate_activity() {
        let tdee = daily_energy_target(
            Gender::Male,
            70.0,
            175.0,
            30.0,
            Some(ActivityLevel::Moderate),
        );
        assert!((tdee - 2556.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_activity_uses_moderate_multiplier() {
        let explicit = daily_energy_target(
            Gender::Female,
            60.0,
            165.0,
            25.0,
            Some(ActivityLevel::Moderate),
        );
        let fallback = daily_energy_target(Gender::Female, 60.0, 165.0, 25.0, None);
        assert!((explicit - fallback).abs() < f64::EPSILON);
    }
}
