//! services/api/src/web/rest.rs
//!
//! Contains the liveness handler and the master definition for the OpenAPI
//! specification.

use utoipa::OpenApi;

use crate::web::{auth, companion, diary, response};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        root_handler,
        auth::signup_handler,
        auth::login_handler,
        auth::logout_handler,
        diary::create_diary_handler,
        companion::feedback_handler,
        companion::music_handler,
        companion::analysis_handler,
        companion::chat_handler,
    ),
    components(
        schemas(
            response::ErrorBody,
            auth::CredentialsRequest,
            auth::SignupResponse,
            auth::LoginResponse,
            auth::LogoutResponse,
            diary::CreateDiaryRequest,
            diary::CreateDiaryResponse,
            companion::FeedbackRequest,
            companion::FeedbackResponse,
            companion::MusicRequest,
            companion::MusicResponse,
            companion::AnalysisRequest,
            companion::AnalysisResponse,
            companion::ChatDiary,
            companion::ChatRequest,
            companion::ChatReply,
        )
    ),
    tags(
        (name = "Emotion Diary API", description = "Auth, diary and AI companion relay endpoints.")
    )
)]
pub struct ApiDoc;

pub const LIVENESS_MESSAGE: &str = "EmotionProject Supabase Server is running!";

/// Plain-text liveness probe.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Server is running", body = String, content_type = "text/plain")
    )
)]
pub async fn root_handler() -> &'static str {
    LIVENESS_MESSAGE
}
