//! services/api/src/web/diary.rs
//!
//! Diary persistence endpoint.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use emotion_diary_core::domain::{NewDiary, StoredDiaries};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info};
use utoipa::ToSchema;

use crate::web::response::{error_response, malformed_body, ErrorBody, ErrorResponse};
use crate::web::state::AppState;

/// The six diary columns, forwarded with whatever JSON type the client used.
/// Type checks are left to the database.
#[derive(Deserialize, ToSchema)]
pub struct CreateDiaryRequest {
    #[schema(value_type = Option<String>)]
    pub user_id: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub emotion: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub content: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub feedback: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub music: Option<Value>,
    #[schema(value_type = Option<bool>)]
    pub shared: Option<Value>,
}

impl From<CreateDiaryRequest> for NewDiary {
    fn from(req: CreateDiaryRequest) -> Self {
        NewDiary {
            user_id: req.user_id,
            emotion: req.emotion,
            content: req.content,
            feedback: req.feedback,
            music: req.music,
            shared: req.shared,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct CreateDiaryResponse {
    /// Inserted rows as returned by the database.
    #[schema(value_type = Vec<Object>)]
    pub diary: StoredDiaries,
}

/// POST /api/diary - Store one diary entry
#[utoipa::path(
    post,
    path = "/api/diary",
    request_body = CreateDiaryRequest,
    responses(
        (status = 200, description = "Diary stored", body = CreateDiaryResponse),
        (status = 400, description = "Rejected by the database", body = ErrorBody)
    )
)]
pub async fn create_diary_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateDiaryRequest>, JsonRejection>,
) -> Result<Json<CreateDiaryResponse>, ErrorResponse> {
    let Json(req) = payload.map_err(malformed_body)?;
    let diary = NewDiary::from(req);
    let rows = state.diaries.insert_diary(&diary).await.map_err(|e| {
        error!("Failed to insert diary: {:?}", e);
        error_response(StatusCode::BAD_REQUEST, e.to_string())
    })?;

    info!(rows = rows.len(), "Diary stored");
    Ok(Json(CreateDiaryResponse { diary: rows }))
}
