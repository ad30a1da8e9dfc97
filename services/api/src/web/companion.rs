//! services/api/src/web/companion.rs
//!
//! Completion-backed endpoints: diary feedback, music recommendation,
//! emotion statistics analysis and counselling chat. Every handler builds a
//! prompt from the request, asks the completion port once and returns the
//! trimmed answer. Model failures never escape as unhandled errors.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use emotion_diary_core::ports::PortResult;
use emotion_diary_core::prompts::{self, display_value, truthy, Prompt};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;

use crate::web::response::{error_response, malformed_body, ErrorBody, ErrorResponse};
use crate::web::state::AppState;

const COMPLETION_FAILED_MESSAGE: &str = "AI 응답에 실패했습니다.";
const MISSING_DIARY_MESSAGE: &str = "잘못된 요청입니다. diary 정보가 필요합니다.";
const MISSING_COUNTS_MESSAGE: &str = "emotionCounts 정보가 필요합니다.";

//=========================================================================================
// Request/Response Types
//=========================================================================================

// Request fields are raw JSON values so any client type is interpolated
// into the prompt instead of being rejected before the handler runs.

#[derive(Deserialize, ToSchema)]
pub struct FeedbackRequest {
    #[schema(value_type = String)]
    pub content: Option<Value>,
    #[schema(value_type = String)]
    pub emotion: Option<Value>,
}

#[derive(Serialize, ToSchema)]
pub struct FeedbackResponse {
    pub feedback: String,
}

#[derive(Deserialize, ToSchema)]
pub struct MusicRequest {
    #[schema(value_type = String)]
    pub emotion: Option<Value>,
}

#[derive(Serialize, ToSchema)]
pub struct MusicResponse {
    pub music: String,
}

#[derive(Deserialize, ToSchema)]
pub struct AnalysisRequest {
    /// Emotion label to number of diary entries, in display order.
    #[serde(rename = "emotionCounts")]
    #[schema(value_type = Object)]
    pub emotion_counts: Option<Value>,
}

#[derive(Serialize, ToSchema)]
pub struct AnalysisResponse {
    pub analysis: String,
}

/// Shape documented for `diary`; the handler reads it as raw JSON.
#[derive(ToSchema)]
pub struct ChatDiary {
    pub emotion: String,
    pub content: String,
}

#[derive(Deserialize, ToSchema)]
pub struct ChatRequest {
    #[schema(value_type = String)]
    pub message: Option<Value>,
    #[schema(value_type = Option<ChatDiary>)]
    pub diary: Option<Value>,
}

/// Chat answers with `{ "reply": ... }` on success and on failure alike.
#[derive(Debug, Serialize, ToSchema)]
pub struct ChatReply {
    pub reply: String,
}

type ChatRejection = (StatusCode, Json<ChatReply>);

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /api/feedback - Comforting feedback on a diary entry
#[utoipa::path(
    post,
    path = "/api/feedback",
    request_body = FeedbackRequest,
    responses(
        (status = 200, description = "Generated feedback", body = FeedbackResponse),
        (status = 500, description = "Completion failed", body = ErrorBody)
    )
)]
pub async fn feedback_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<FeedbackRequest>, JsonRejection>,
) -> Result<Json<FeedbackResponse>, ErrorResponse> {
    let Json(req) = payload.map_err(malformed_body)?;
    let prompt = prompts::feedback_prompt(&text(&req.content), &text(&req.emotion));
    let feedback = complete_or_500(&state, &prompt, "feedback").await?;
    Ok(Json(FeedbackResponse { feedback }))
}

/// POST /api/music - One song recommendation for an emotion
#[utoipa::path(
    post,
    path = "/api/music",
    request_body = MusicRequest,
    responses(
        (status = 200, description = "Recommended song", body = MusicResponse),
        (status = 500, description = "Completion failed", body = ErrorBody)
    )
)]
pub async fn music_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MusicRequest>, JsonRejection>,
) -> Result<Json<MusicResponse>, ErrorResponse> {
    let Json(req) = payload.map_err(malformed_body)?;
    let prompt = prompts::music_prompt(&text(&req.emotion));
    let music = complete_or_500(&state, &prompt, "music").await?;
    Ok(Json(MusicResponse { music }))
}

/// POST /api/analysis - Insight on emotion frequencies
#[utoipa::path(
    post,
    path = "/api/analysis",
    request_body = AnalysisRequest,
    responses(
        (status = 200, description = "Generated analysis", body = AnalysisResponse),
        (status = 400, description = "Missing emotionCounts", body = ErrorBody),
        (status = 500, description = "Completion failed", body = ErrorBody)
    )
)]
pub async fn analysis_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalysisResponse>, ErrorResponse> {
    let Json(req) = payload.map_err(malformed_body)?;
    let counts = match req.emotion_counts {
        Some(Value::Object(counts)) => counts,
        _ => return Err(error_response(StatusCode::BAD_REQUEST, MISSING_COUNTS_MESSAGE)),
    };

    let prompt = prompts::analysis_prompt(&counts);
    let analysis = complete_or_500(&state, &prompt, "analysis").await?;
    Ok(Json(AnalysisResponse { analysis }))
}

/// POST /api/chat - Counselling reply grounded in one diary entry
#[utoipa::path(
    post,
    path = "/api/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Counsellor reply", body = ChatReply),
        (status = 400, description = "Missing diary emotion or content", body = ChatReply),
        (status = 500, description = "Completion failed", body = ChatReply)
    )
)]
pub async fn chat_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, ChatRejection> {
    let Json(req) = payload.map_err(|rejection| {
        chat_reply(StatusCode::BAD_REQUEST, &rejection.body_text())
    })?;

    let diary = req.diary.as_ref();
    let (emotion, content) = match (
        truthy(diary.and_then(|d| d.get("emotion"))),
        truthy(diary.and_then(|d| d.get("content"))),
    ) {
        (Some(emotion), Some(content)) => (display_value(emotion), display_value(content)),
        _ => return Err(chat_reply(StatusCode::BAD_REQUEST, MISSING_DIARY_MESSAGE)),
    };

    let prompt = prompts::chat_prompt(&text(&req.message), &emotion, &content);
    match complete_trimmed(&state, &prompt).await {
        Ok(reply) => Ok(Json(ChatReply { reply })),
        Err(e) => {
            error!("Chat completion failed: {:?}", e);
            Err(chat_reply(
                StatusCode::INTERNAL_SERVER_ERROR,
                COMPLETION_FAILED_MESSAGE,
            ))
        }
    }
}

//=========================================================================================
// Helpers
//=========================================================================================

async fn complete_trimmed(state: &AppState, prompt: &Prompt) -> PortResult<String> {
    let answer = state.completion.complete(prompt).await?;
    Ok(answer.trim().to_string())
}

async fn complete_or_500(
    state: &AppState,
    prompt: &Prompt,
    purpose: &'static str,
) -> Result<String, ErrorResponse> {
    complete_trimmed(state, prompt).await.map_err(|e| {
        error!(purpose, "Completion failed: {:?}", e);
        error_response(StatusCode::INTERNAL_SERVER_ERROR, COMPLETION_FAILED_MESSAGE)
    })
}

/// Template text for an optional request field; absent or null becomes "".
fn text(value: &Option<Value>) -> String {
    value.as_ref().map(display_value).unwrap_or_default()
}

fn chat_reply(status: StatusCode, message: &str) -> ChatRejection {
    (
        status,
        Json(ChatReply {
            reply: message.to_string(),
        }),
    )
}
