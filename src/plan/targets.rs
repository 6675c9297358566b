//! Goal and budget tables that drive meal-plan generation.
//!
//! Calorie targets and budget guidance are fixed product data: the prompt
//! builder interpolates them, nothing recomputes them per user.

use serde::{Deserialize, Serialize};

/// Number of days planned when the caller does not ask for a specific count.
pub const DEFAULT_PLAN_DAYS: u32 = 7;

/// Dietary objective selected by the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    /// Lose weight on a reduced calorie target.
    WeightLoss,
    /// Build muscle on a calorie surplus.
    MuscleGain,
    /// Hold current weight.
    Maintenance,
}

/// Fixed profile attached to a [`Goal`].
#[derive(Clone, Copy, Debug)]
pub struct GoalProfile {
    /// Short Vietnamese label used inside prompts ("giảm cân", ...).
    pub label: &'static str,
    /// Daily calorie target in kcal.
    pub daily_calories: u32,
    /// One-line Vietnamese description of the objective.
    pub description: &'static str,
}

const WEIGHT_LOSS_PROFILE: GoalProfile = GoalProfile {
    label: "giảm cân",
    daily_calories: 1500,
    description: "Giảm cân an toàn và bền vững",
};

const MUSCLE_GAIN_PROFILE: GoalProfile = GoalProfile {
    label: "tăng cơ",
    daily_calories: 2500,
    description: "Tăng cơ bắp hiệu quả",
};

const MAINTENANCE_PROFILE: GoalProfile = GoalProfile {
    label: "duy trì cân nặng",
    daily_calories: 2000,
    description: "Duy trì sức khỏe và cân nặng",
};

impl Goal {
    /// Look up a goal by its wire label.
    ///
    /// Unrecognized labels fall back to [`Goal::Maintenance`]: the caller is
    /// the app's own UI, so bad values are softened rather than rejected.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "weight_loss" => Self::WeightLoss,
            "muscle_gain" => Self::MuscleGain,
            _ => Self::Maintenance,
        }
    }

    /// Wire label for this goal.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WeightLoss => "weight_loss",
            Self::MuscleGain => "muscle_gain",
            Self::Maintenance => "maintenance",
        }
    }

    /// Calorie target and Vietnamese labels for this goal.
    #[must_use]
    pub const fn profile(self) -> &'static GoalProfile {
        match self {
            Self::WeightLoss => &WEIGHT_LOSS_PROFILE,
            Self::MuscleGain => &MUSCLE_GAIN_PROFILE,
            Self::Maintenance => &MAINTENANCE_PROFILE,
        }
    }
}

/// Daily food-budget tier steering ingredient choices.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Budget {
    /// Cheap everyday ingredients.
    Low,
    /// Balanced cost and quality.
    #[default]
    Medium,
    /// Premium ingredients without cost pressure.
    High,
}

/// Fixed profile attached to a [`Budget`].
#[derive(Clone, Copy, Debug)]
pub struct BudgetProfile {
    /// Short Vietnamese label used inside prompts ("tiết kiệm", ...).
    pub label: &'static str,
    /// Daily price band shown to the model.
    pub price_band: &'static str,
    /// Ingredient guidance injected into the prompt.
    pub guidance: &'static str,
}

const LOW_BUDGET_PROFILE: BudgetProfile = BudgetProfile {
    label: "tiết kiệm",
    price_band: "Dưới 100,000đ/ngày",
    guidance: "Ưu tiên nguyên liệu phổ biến, rẻ tiền như: trứng, đậu phụ, rau củ theo mùa, thịt gà, cá basa",
};

const MEDIUM_BUDGET_PROFILE: BudgetProfile = BudgetProfile {
    label: "trung bình",
    price_band: "100,000đ - 200,000đ/ngày",
    guidance: "Cân bằng giữa chất lượng và giá cả, có thể dùng thịt bò, cá hồi, hải sản thỉnh thoảng",
};

const HIGH_BUDGET_PROFILE: BudgetProfile = BudgetProfile {
    label: "cao cấp",
    price_band: "Trên 200,000đ/ngày",
    guidance: "Tự do lựa chọn nguyên liệu chất lượng cao: thịt bò Úc, cá hồi Na Uy, hải sản tươi, rau organic",
};

impl Budget {
    /// Parse a wire label, returning `None` for anything outside
    /// low/medium/high. The HTTP layer turns `None` into a 400.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    /// Wire label for this budget tier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Price band and guidance strings for this tier.
    #[must_use]
    pub const fn profile(self) -> &'static BudgetProfile {
        match self {
            Self::Low => &LOW_BUDGET_PROFILE,
            Self::Medium => &MEDIUM_BUDGET_PROFILE,
            Self::High => &HIGH_BUDGET_PROFILE,
        }
    }
}
