//! Chat prompt framing.
//!
//! The assistant reply is prose consumed as display text, so there is no
//! sanitization or parsing on this path. Context lines render only for the
//! fields actually present; nothing is padded with placeholders.

use serde::{Deserialize, Serialize};

use crate::nutrition::energy::{daily_energy_target, ActivityLevel, Gender};
use crate::plan::targets::Goal;

/// Optional nutrition context forwarded with a chat message.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserContext {
    /// Current weight in kg.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Height in cm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Target weight in kg.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_weight: Option<f64>,
    /// Goal label as the client stores it ("weight_loss", ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    /// Precomputed daily energy target in kcal/day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tdee: Option<f64>,
    /// Age in years, used only for the server-side TDEE fallback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<f64>,
    /// Gender, used only for the server-side TDEE fallback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    /// Activity level, used only for the server-side TDEE fallback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<ActivityLevel>,
}

impl UserContext {
    /// The TDEE to show the model: the client's precomputed value when
    /// present, otherwise derived from weight/height/age/gender.
    #[must_use]
    pub fn resolved_tdee(&self) -> Option<f64> {
        if self.tdee.is_some() {
            return self.tdee;
        }
        match (self.gender, self.weight, self.height, self.age) {
            (Some(gender), Some(weight), Some(height), Some(age)) => Some(daily_energy_target(
                gender,
                weight,
                height,
                age,
                self.activity_level,
            )),
            _ => None,
        }
    }
}

/// Vietnamese label for a goal inside the chat framing.
fn goal_display(label: &str) -> &'static str {
    match Goal::from_label(label) {
        Goal::WeightLoss => "Giảm cân",
        Goal::MuscleGain => "Tăng cơ",
        Goal::Maintenance => "Duy trì",
    }
}

/// Render the full chat prompt for one message.
///
/// Absent context fields are omitted entirely rather than rendered as empty
/// lines.
#[must_use]
pub fn build_chat_prompt(message: &str, context: Option<&UserContext>) -> String {
    let mut out = String::with_capacity(message.len() + 256);
    out.push_str("Bạn là chuyên gia dinh dưỡng AI của ứng dụng \"Dinh Dưỡng Thông Minh\".\n");
    out.push_str("\nTHÔNG TIN NGƯỜI DÙNG:\n");

    if let Some(context) = context {
        if let Some(weight) = context.weight {
            out.push_str(&format!("- Cân nặng: {weight} kg\n"));
        }
        if let Some(height) = context.height {
            out.push_str(&format!("- Chiều cao: {height} cm\n"));
        }
        if let Some(target) = context.target_weight {
            out.push_str(&format!("- Cân nặng mục tiêu: {target} kg\n"));
        }
        if let Some(goal) = &context.goal {
            out.push_str(&format!("- Mục tiêu: {}\n", goal_display(goal)));
        }
        if let Some(tdee) = context.resolved_tdee() {
            out.push_str(&format!("- TDEE: {tdee} kcal/ngày\n"));
        }
    }

    out.push_str(&format!("\nCÂU HỎI: {message}\n"));
    out.push_str(
        "\nHãy trả lời ngắn gọn (2-3 đoạn), thân thiện, bằng tiếng Việt. Ưu tiên món ăn Việt Nam.",
    );
    out
}
