//! Meal-plan prompt construction.
//!
//! `build_meal_plan_prompt` is a pure function: identical requests render
//! byte-identical prompts. The embedded one-day example JSON is a
//! compile-time template so the expected output shape lives in exactly one
//! place.

use crate::plan::types::PlanRequest;

/// One-day example of the exact JSON shape the model must return.
///
/// `{calories}`, `{goal}` and `{budget}` are substituted per request; the
/// rest is fixed. Meal-level numbers are illustrative and intentionally left
/// as written.
const PLAN_FORMAT_EXAMPLE: &str = r#"{
  "days": [
    {
      "day": 1,
      "totalCalories": {calories},
      "meals": [
        {
          "type": "Sáng",
          "time": "07:00",
          "foods": [
            {
              "name": "Phở bò",
              "portion": "1 tô",
              "calories": 350,
              "protein": 20,
              "carbs": 50,
              "fat": 8,
              "recipe": {
                "ingredients": [
                  "200g bánh phở",
                  "100g thịt bò",
                  "1 lít nước dùng xương",
                  "Hành, ngò, giá",
                  "Gia vị: muối, nước mắm, tiêu"
                ],
                "instructions": [
                  "Ninh xương bò 2-3 tiếng để có nước dùng trong",
                  "Trụng bánh phở qua nước sôi",
                  "Thái thịt bò mỏng, chần sơ",
                  "Cho bánh phở vào tô, xếp thịt bò lên trên",
                  "Chan nước dùng nóng, thêm hành ngò giá"
                ]
              }
            }
          ],
          "totalCalories": 350,
          "notes": "Ăn nhẹ nhàng, dễ tiêu"
        },
        {
          "type": "Trưa",
          "time": "12:00",
          "foods": [
            {
              "name": "Cơm gạo lứt",
              "portion": "1 chén",
              "calories": 200,
              "protein": 5,
              "carbs": 45,
              "fat": 2,
              "recipe": {
                "ingredients": [
                  "1 chén gạo lứt",
                  "1.5 chén nước",
                  "1 chút muối"
                ],
                "instructions": [
                  "Vo sạch gạo lứt",
                  "Ngâm gạo 30 phút trước khi nấu",
                  "Cho gạo, nước và muối vào nồi cơm điện",
                  "Nấu chín, để nguội 10 phút trước khi ăn"
                ]
              }
            },
            {
              "name": "Cá hồi nướng",
              "portion": "100g",
              "calories": 200,
              "protein": 25,
              "carbs": 0,
              "fat": 12,
              "recipe": {
                "ingredients": [
                  "100g phi lê cá hồi",
                  "1 muỗng cà phê dầu ô liu",
                  "Muối, tiêu, tỏi băm",
                  "Chanh"
                ],
                "instructions": [
                  "Ướp cá với muối, tiêu, tỏi băm 15 phút",
                  "Phết dầu ô liu lên mặt cá",
                  "Nướng lò 180°C trong 12-15 phút",
                  "Rưới chanh trước khi ăn"
                ]
              }
            },
            {
              "name": "Rau xào",
              "portion": "1 đĩa",
              "calories": 80,
              "protein": 3,
              "carbs": 10,
              "fat": 3,
              "recipe": {
                "ingredients": [
                  "200g rau cải ngọt",
                  "1 muỗng cà phê dầu ăn",
                  "2 tép tỏi băm",
                  "Muối, nước mắm"
                ],
                "instructions": [
                  "Rửa sạch rau, để ráo nước",
                  "Phi thơm tỏi với dầu",
                  "Cho rau vào xào nhanh tay trên lửa lớn",
                  "Nêm nếm vừa ăn, tắt bếp"
                ]
              }
            }
          ],
          "totalCalories": 480,
          "notes": "Bữa chính, đầy đủ dinh dưỡng"
        },
        {
          "type": "Tối",
          "time": "18:30",
          "foods": [
            {
              "name": "Canh chua cá",
              "portion": "1 tô",
              "calories": 150,
              "protein": 15,
              "carbs": 12,
              "fat": 5,
              "recipe": {
                "ingredients": [
                  "150g cá basa",
                  "2 quả cà chua",
                  "100g dứa",
                  "Rau ngổ, giá, me chua",
                  "Gia vị: muối, nước mắm, đường"
                ],
                "instructions": [
                  "Luộc cá sơ, bỏ xương",
                  "Nấu nước với me chua",
                  "Cho cà chua, dứa vào nấu",
                  "Thêm cá, nêm nếm vừa ăn",
                  "Cho rau ngổ, giá vào tắt bếp"
                ]
              }
            },
            {
              "name": "Cơm gạo lứt",
              "portion": "0.5 chén",
              "calories": 100,
              "protein": 2,
              "carbs": 22,
              "fat": 1,
              "recipe": {
                "ingredients": [
                  "0.5 chén gạo lứt",
                  "0.75 chén nước",
                  "1 chút muối"
                ],
                "instructions": [
                  "Vo sạch gạo lứt",
                  "Ngâm gạo 30 phút",
                  "Nấu với nồi cơm điện",
                  "Để nguội trước khi ăn"
                ]
              }
            }
          ],
          "totalCalories": 250,
          "notes": "Bữa tối nhẹ nhàng"
        },
        {
          "type": "Snack",
          "time": "15:00",
          "foods": [
            {
              "name": "Chuối",
              "portion": "1 quả",
              "calories": 100,
              "protein": 1,
              "carbs": 25,
              "fat": 0,
              "recipe": {
                "ingredients": [
                  "1 quả chuối chín"
                ],
                "instructions": [
                  "Chọn chuối chín vừa phải",
                  "Bóc vỏ và ăn trực tiếp"
                ]
              }
            },
            {
              "name": "Hạnh nhân",
              "portion": "10 hạt",
              "calories": 70,
              "protein": 3,
              "carbs": 3,
              "fat": 6,
              "recipe": {
                "ingredients": [
                  "10 hạt hạnh nhân rang"
                ],
                "instructions": [
                  "Chọn hạnh nhân rang không muối",
                  "Ăn trực tiếp hoặc kết hợp với trái cây"
                ]
              }
            }
          ],
          "totalCalories": 170,
          "notes": "Bổ sung năng lượng"
        }
      ]
    }
  ],
  "summary": {
    "goal": "{goal}",
    "averageCalories": {calories},
    "budget": "{budget}",
    "tips": [
      "Uống đủ 2-2.5 lít nước mỗi ngày",
      "Ăn chậm, nhai kỹ",
      "Tránh ăn muộn sau 20:00"
    ]
  }
}"#;

/// Render the full instruction prompt for one plan request.
#[must_use]
pub fn build_meal_plan_prompt(request: &PlanRequest) -> String {
    let goal = request.goal.profile();
    let budget = request.budget.profile();
    let calories = goal.daily_calories.to_string();
    let days = request.days;

    let notes = request.user_notes.trim();
    let notes_clause = if notes.is_empty() {
        String::new()
    } else {
        format!("\n- Ghi chú từ người dùng: {notes}")
    };
    let notes_reminder = if notes.is_empty() {
        "Không có yêu cầu đặc biệt"
    } else {
        notes
    };

    let example = PLAN_FORMAT_EXAMPLE
        .replace("{calories}", &calories)
        .replace("{goal}", goal.label)
        .replace("{budget}", budget.label);

    format!(
        "Bạn là chuyên gia dinh dưỡng người Việt Nam. Hãy tạo một kế hoạch ăn uống {days} ngày cho mục tiêu {goal_label}.

YÊU CẦU:
- Mục tiêu: {goal_description}
- Tổng calo mỗi ngày: {calories} kcal (±50 kcal)
- Ngân sách: {budget_label} ({price_band})
- {guidance}{notes_clause}
- Sử dụng món ăn Việt Nam phổ biến, dễ nấu
- Cân đối dinh dưỡng: protein, carbs, chất béo lành mạnh
- Mỗi ngày có 4 bữa: Sáng, Trưa, Tối, Snack

ĐỊNH DẠNG JSON (BẮT BUỘC):
Trả về CHÍNH XÁC theo format JSON này, KHÔNG thêm text nào khác:

{example}

LƯU Ý QUAN TRỌNG:
1. Chỉ trả về JSON, KHÔNG có markdown, KHÔNG có ```json
2. Đảm bảo tổng calories mỗi ngày ≈ {calories} kcal
3. Món ăn phải là món Việt thực tế, dễ làm
4. Tạo đủ {days} ngày với đa dạng món ăn
5. **BẮT BUỘC**: Mỗi món ăn PHẢI có trường \"recipe\" với:
   - \"ingredients\": Danh sách nguyên liệu cụ thể (khối lượng, số lượng)
   - \"instructions\": Các bước nấu chi tiết, dễ hiểu
6. Công thức phải thực tế, dễ làm tại nhà
7. **TUÂN THỦ NGÂN SÁCH**: {guidance}
8. **CHÚ Ý GHI CHÚ NGƯỜI DÙNG**: {notes_reminder}

Hãy tạo kế hoạch ngay bây giờ:",
        days = days,
        goal_label = goal.label,
        goal_description = goal.description,
        calories = calories,
        budget_label = budget.label,
        price_band = budget.price_band,
        guidance = budget.guidance,
        notes_clause = notes_clause,
        example = example,
        notes_reminder = notes_reminder,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::targets::{Budget, Goal};

    #[test]
    fn test_prompt_is_deterministic() {
        let request = PlanRequest::new(Goal::WeightLoss)
            .with_budget(Budget::Low)
            .with_user_notes("ăn chay");
        assert_eq!(
            build_meal_plan_prompt(&request),
            build_meal_plan_prompt(&request)
        );
    }

    #[test]
    fn test_weight_loss_prompt_embeds_target_and_days() {
        let prompt = build_meal_plan_prompt(&PlanRequest::new(Goal::WeightLoss));
        assert!(prompt.contains("1500"));
        assert!(prompt.contains("7 ngày"));
        assert!(prompt.contains(Budget::Medium.profile().guidance));
    }

    #[test]
    fn test_unknown_goal_matches_maintenance() {
        let from_unknown = PlanRequest::new(Goal::from_label("bulking"));
        let maintenance = PlanRequest::new(Goal::Maintenance);
        assert_eq!(
            build_meal_plan_prompt(&from_unknown),
            build_meal_plan_prompt(&maintenance)
        );
    }

    #[test]
    fn test_empty_notes_omit_notes_clause() {
        let prompt = build_meal_plan_prompt(&PlanRequest::new(Goal::Maintenance));
        assert!(!prompt.contains("Ghi chú từ người dùng"));
        assert!(prompt.contains("Không có yêu cầu đặc biệt"));
    }

    #[test]
    fn test_notes_are_trimmed_into_the_prompt() {
        let request = PlanRequest::new(Goal::Maintenance).with_user_notes("  không ăn cay  ");
        let prompt = build_meal_plan_prompt(&request);
        assert!(prompt.contains("- Ghi chú từ người dùng: không ăn cay\n"));
    }

    #[test]
    fn test_example_substitutes_calories_and_labels() {
        let prompt = build_meal_plan_prompt(&PlanRequest::new(Goal::MuscleGain));
        assert!(prompt.contains("\"totalCalories\": 2500"));
        assert!(prompt.contains("\"goal\": \"tăng cơ\""));
        assert!(!prompt.contains("{calories}"));
    }
}
