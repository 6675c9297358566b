//! HTTP route handlers for the nutriplan proxy API.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::chat::{build_chat_prompt, UserContext};
use crate::llm::GenerationParams;
use crate::plan::prompt::build_meal_plan_prompt;
use crate::plan::sanitize::parse_plan_json;
use crate::plan::targets::{Budget, Goal, DEFAULT_PLAN_DAYS};
use crate::plan::validate::validate_plan;
use crate::plan::{GeneratedPlan, PlanError, PlanMetadata, PlanRequest};

use super::state::AppState;

/// Create the API router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/generate-meal-plan", post(generate_meal_plan))
        .route("/api/chat", post(chat))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "OK",
        "message": "Server đang chạy"
    }))
}

/// Error body shared by both API endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Human-readable message in the app's language.
    pub error: String,
    /// Technical detail (parse or upstream error text).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Bounded excerpt of raw model output, only on parse failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,
}

type ErrorResponse = (StatusCode, Json<ErrorBody>);

/// Map a plan-generation failure onto its HTTP shape.
fn plan_error_response(err: PlanError) -> ErrorResponse {
    match err {
        PlanError::InvalidRequest(message) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                error: message,
                details: None,
                raw_text: None,
            }),
        ),
        PlanError::Upstream(inner) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                error: "Lỗi khi tạo kế hoạch ăn uống".to_string(),
                details: Some(inner.to_string()),
                raw_text: None,
            }),
        ),
        PlanError::MalformedOutput {
            detail,
            raw_excerpt,
        } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                error: "AI trả về dữ liệu không đúng định dạng".to_string(),
                details: Some(detail),
                raw_text: Some(raw_excerpt),
            }),
        ),
        PlanError::InvalidStructure => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                error: "Cấu trúc kế hoạch không hợp lệ".to_string(),
                details: None,
                raw_text: None,
            }),
        ),
    }
}

/// Meal-plan generation request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateMealPlanRequest {
    /// Goal label; required.
    pub goal: Option<String>,
    /// Budget tier; must be low/medium/high when present.
    pub budget: Option<String>,
    /// Free-text notes forwarded into the prompt.
    pub user_notes: Option<String>,
    /// Number of days to plan; defaults to 7.
    pub days: Option<u32>,
}

/// Meal-plan generation response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateMealPlanResponse {
    /// Always `true` on this path.
    pub success: bool,
    /// The validated plan.
    pub meal_plan: GeneratedPlan,
    /// Echoed request metadata plus the generation timestamp.
    pub metadata: PlanMetadata,
}

/// Handle meal-plan generation requests.
async fn generate_meal_plan(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerateMealPlanRequest>,
) -> Result<Json<GenerateMealPlanResponse>, ErrorResponse> {
    let goal_label = request
        .goal
        .filter(|label| !label.is_empty())
        .ok_or_else(|| {
            plan_error_response(PlanError::InvalidRequest(
                "Thiếu thông tin bắt buộc (goal)".to_string(),
            ))
        })?;

    let budget = match request.budget.as_deref() {
        None => Budget::default(),
        Some(label) => Budget::parse(label).ok_or_else(|| {
            plan_error_response(PlanError::InvalidRequest(
                "Budget phải là: low, medium, hoặc high".to_string(),
            ))
        })?,
    };

    let plan_request = PlanRequest {
        goal: Goal::from_label(&goal_label),
        budget,
        user_notes: request.user_notes.clone().unwrap_or_default(),
        days: request.days.unwrap_or(DEFAULT_PLAN_DAYS),
    };

    tracing::info!(
        goal = %goal_label,
        budget = budget.as_str(),
        days = plan_request.days,
        "generating meal plan"
    );

    let prompt = build_meal_plan_prompt(&plan_request);
    let text = state
        .model
        .generate(
            &state.config.plan_model,
            &prompt,
            &GenerationParams::meal_plan(),
        )
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "meal-plan model call failed");
            plan_error_response(PlanError::from(err))
        })?;

    tracing::debug!(reply_chars = text.len(), "model reply received");

    let value = parse_plan_json(&text).map_err(|err| {
        tracing::error!(error = %err, "model output failed to parse");
        plan_error_response(err)
    })?;
    let meal_plan = validate_plan(value).map_err(|err| {
        tracing::error!(error = %err, "model output failed validation");
        plan_error_response(err)
    })?;

    tracing::info!("meal plan generated");

    Ok(Json(GenerateMealPlanResponse {
        success: true,
        meal_plan,
        metadata: PlanMetadata {
            goal: goal_label,
            budget,
            user_notes: request.user_notes,
            generated_at: Utc::now(),
        },
    }))
}

/// Chat request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// The user's message; required.
    pub message: Option<String>,
    /// Optional nutrition context.
    pub user_context: Option<UserContext>,
}

/// Chat response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    /// Always `true` on this path.
    pub success: bool,
    /// The assistant's reply, trimmed.
    pub response: String,
}

/// Handle chat requests.
async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ErrorResponse> {
    let message = request.message.filter(|m| !m.is_empty()).ok_or_else(|| {
        plan_error_response(PlanError::InvalidRequest("Thiếu tin nhắn".to_string()))
    })?;

    let preview: String = message.chars().take(50).collect();
    tracing::info!(preview = %preview, "chat request");

    let prompt = build_chat_prompt(&message, request.user_context.as_ref());
    let reply = state
        .model
        .generate(&state.config.chat_model, &prompt, &GenerationParams::chat())
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "chat model call failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: "Lỗi khi xử lý tin nhắn".to_string(),
                    details: None,
                    raw_text: None,
                }),
            )
        })?;

    tracing::info!("chat response generated");

    Ok(Json(ChatResponse {
        success: true,
        response: reply.trim().to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::config::ServerConfig;
    use crate::llm::{LlmError, ModelClient};
    use crate::plan::sanitize::RAW_EXCERPT_MAX_CHARS;

    const VALID_PLAN: &str = r#"{"days":[{"day":1,"meals":[]}]}"#;

    #[derive(Default)]
    struct ScriptedModel {
        reply: String,
        fail: bool,
        last_model: Mutex<Option<String>>,
        last_prompt: Mutex<Option<String>>,
    }

    impl ScriptedModel {
        fn replying(reply: impl Into<String>) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.into(),
                ..Self::default()
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                fail: true,
                ..Self::default()
            })
        }

        fn prompt(&self) -> String {
            self.last_prompt
                .lock()
                .expect("lock")
                .clone()
                .unwrap_or_default()
        }

        fn model(&self) -> String {
            self.last_model
                .lock()
                .expect("lock")
                .clone()
                .unwrap_or_default()
        }
    }

    #[async_trait]
    impl ModelClient for ScriptedModel {
        async fn generate(
            &self,
            model: &str,
            prompt: &str,
            _params: &GenerationParams,
        ) -> Result<String, LlmError> {
            *self.last_model.lock().expect("lock") = Some(model.to_string());
            *self.last_prompt.lock().expect("lock") = Some(prompt.to_string());
            if self.fail {
                return Err(LlmError::EmptyResponse);
            }
            Ok(self.reply.clone())
        }
    }

    fn router_with(model: Arc<ScriptedModel>) -> Router {
        create_router(AppState::with_model(ServerConfig::default(), model))
    }

    async fn post_json(router: Router, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request");
        let response = router.oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let value = serde_json::from_slice(&bytes).expect("json body");
        (status, value)
    }

    #[tokio::test]
    async fn test_health_check() {
        let router = router_with(ScriptedModel::replying(""));
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .expect("request");
        let response = router.oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let value: Value = serde_json::from_slice(&bytes).expect("json");
        assert_eq!(value["status"], "OK");
        assert_eq!(value["message"], "Server đang chạy");
    }

    #[tokio::test]
    async fn test_missing_goal_is_rejected() {
        let (status, body) = post_json(
            router_with(ScriptedModel::replying(VALID_PLAN)),
            "/api/generate-meal-plan",
            "{}",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Thiếu thông tin bắt buộc (goal)");
    }

    #[tokio::test]
    async fn test_out_of_enum_budget_is_rejected() {
        let (status, body) = post_json(
            router_with(ScriptedModel::replying(VALID_PLAN)),
            "/api/generate-meal-plan",
            r#"{"goal":"weight_loss","budget":"premium"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Budget phải là: low, medium, hoặc high");
    }

    #[tokio::test]
    async fn test_goal_only_request_defaults_and_succeeds() {
        let model = ScriptedModel::replying(format!("```json\n{VALID_PLAN}\n```"));
        let (status, body) = post_json(
            router_with(Arc::clone(&model)),
            "/api/generate-meal-plan",
            r#"{"goal":"weight_loss"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["metadata"]["goal"], "weight_loss");
        assert_eq!(body["metadata"]["budget"], "medium");
        assert_eq!(body["mealPlan"]["days"][0]["day"], 1);

        let prompt = model.prompt();
        assert!(prompt.contains("1500"));
        assert!(prompt.contains("7 ngày"));
        assert_eq!(model.model(), ServerConfig::default().plan_model);
    }

    #[tokio::test]
    async fn test_prose_reply_is_a_malformed_output_error() {
        let filler = "x".repeat(400);
        let model = ScriptedModel::replying(format!("Sure! Here's your plan: {filler}"));
        let (status, body) =
            post_json(router_with(model), "/api/generate-meal-plan", r#"{"goal":"maintenance"}"#)
                .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "AI trả về dữ liệu không đúng định dạng");
        let raw_text = body["rawText"].as_str().expect("rawText");
        assert!(raw_text.chars().count() <= RAW_EXCERPT_MAX_CHARS);
        assert!(body["details"].is_string());
    }

    #[tokio::test]
    async fn test_empty_days_reply_is_a_structure_error() {
        let model = ScriptedModel::replying(r#"{"days":[]}"#);
        let (status, body) =
            post_json(router_with(model), "/api/generate-meal-plan", r#"{"goal":"maintenance"}"#)
                .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Cấu trúc kế hoạch không hợp lệ");
        assert!(body.get("rawText").is_none());
    }

    #[tokio::test]
    async fn test_upstream_failure_is_a_generic_500() {
        let (status, body) = post_json(
            router_with(ScriptedModel::failing()),
            "/api/generate-meal-plan",
            r#"{"goal":"muscle_gain"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Lỗi khi tạo kế hoạch ăn uống");
        assert!(body["details"].is_string());
    }

    #[tokio::test]
    async fn test_chat_requires_a_message() {
        let (status, body) = post_json(
            router_with(ScriptedModel::replying("xin chào")),
            "/api/chat",
            "{}",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Thiếu tin nhắn");
    }

    #[tokio::test]
    async fn test_chat_without_context_forwards_and_trims() {
        let model = ScriptedModel::replying("  Bạn nên ăn phở gà.\n");
        let (status, body) = post_json(
            router_with(Arc::clone(&model)),
            "/api/chat",
            r#"{"message":"gợi ý món ăn sáng"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["response"], "Bạn nên ăn phở gà.");

        let prompt = model.prompt();
        assert!(prompt.contains("CÂU HỎI: gợi ý món ăn sáng"));
        assert!(!prompt.contains("- Cân nặng"));
        assert_eq!(model.model(), ServerConfig::default().chat_model);
    }

    #[tokio::test]
    async fn test_chat_context_reaches_the_prompt() {
        let model = ScriptedModel::replying("ok");
        let (status, _body) = post_json(
            router_with(Arc::clone(&model)),
            "/api/chat",
            r#"{"message":"ăn gì?","userContext":{"weight":70,"goal":"muscle_gain","tdee":2500}}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let prompt = model.prompt();
        assert!(prompt.contains("- Cân nặng: 70 kg"));
        assert!(prompt.contains("- Mục tiêu: Tăng cơ"));
        assert!(prompt.contains("- TDEE: 2500 kcal/ngày"));
    }

    #[tokio::test]
    async fn test_chat_upstream_failure() {
        let (status, body) = post_json(
            router_with(ScriptedModel::failing()),
            "/api/chat",
            r#"{"message":"xin chào"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Lỗi khi xử lý tin nhắn");
        assert!(body.get("details").is_none());
    }
}
