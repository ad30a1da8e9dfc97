//! services/api/src/web/auth.rs
//!
//! Authentication endpoints for user signup, login, and logout. All credential
//! and session handling is delegated to the auth provider.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use emotion_diary_core::domain::{AuthSession, AuthUser, Credentials};
use emotion_diary_core::prompts::display_value;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::web::response::{error_response, malformed_body, ErrorBody, ErrorResponse};
use crate::web::state::AppState;

const MISSING_TOKEN_MESSAGE: &str = "토큰이 필요합니다.";
const LOGOUT_MESSAGE: &str = "로그아웃 완료";

//=========================================================================================
// Request/Response Types
//=========================================================================================

/// Both fields are forwarded whatever their JSON type; the provider validates them.
#[derive(Deserialize, ToSchema)]
pub struct CredentialsRequest {
    #[schema(value_type = String)]
    pub email: Option<Value>,
    #[schema(value_type = String)]
    pub password: Option<Value>,
}

impl From<CredentialsRequest> for Credentials {
    fn from(req: CredentialsRequest) -> Self {
        let text = |value: Option<Value>| value.as_ref().map(display_value).unwrap_or_default();
        Credentials {
            email: text(req.email),
            password: text(req.password),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct SignupResponse {
    #[schema(value_type = Object)]
    pub user: AuthUser,
}

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    #[schema(value_type = Object)]
    pub session: AuthSession,
    #[schema(value_type = Object)]
    pub user: AuthUser,
}

#[derive(Serialize, ToSchema)]
pub struct LogoutResponse {
    pub message: String,
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /api/signup - Create an already-confirmed user account
#[utoipa::path(
    post,
    path = "/api/signup",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "User created", body = SignupResponse),
        (status = 400, description = "Rejected by the auth provider", body = ErrorBody)
    )
)]
pub async fn signup_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<SignupResponse>, ErrorResponse> {
    let Json(req) = payload.map_err(malformed_body)?;
    let credentials = Credentials::from(req);
    let user = state.auth.create_user(&credentials).await.map_err(|e| {
        warn!("Signup rejected: {}", e);
        error_response(StatusCode::BAD_REQUEST, e.to_string())
    })?;

    info!(user_id = %user.id, "User signed up");
    Ok(Json(SignupResponse { user }))
}

/// POST /api/login - Sign in with email and password
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Invalid credentials", body = ErrorBody)
    )
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ErrorResponse> {
    let Json(req) = payload.map_err(malformed_body)?;
    let credentials = Credentials::from(req);
    let session = state
        .auth
        .sign_in_with_password(&credentials)
        .await
        .map_err(|e| {
            warn!("Login rejected: {}", e);
            error_response(StatusCode::BAD_REQUEST, e.to_string())
        })?;

    let user = session.user.clone();
    Ok(Json(LoginResponse { session, user }))
}

/// POST /api/logout - Revoke the caller's sessions
#[utoipa::path(
    post,
    path = "/api/logout",
    responses(
        (status = 200, description = "Logout successful", body = LogoutResponse),
        (status = 400, description = "Rejected by the auth provider", body = ErrorBody),
        (status = 401, description = "No bearer token", body = ErrorBody)
    ),
    params(
        ("Authorization" = String, Header, description = "Bearer <access token>")
    )
)]
pub async fn logout_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<LogoutResponse>, ErrorResponse> {
    let token = bearer_token(&headers)
        .ok_or_else(|| error_response(StatusCode::UNAUTHORIZED, MISSING_TOKEN_MESSAGE))?;

    state.auth.sign_out(token).await.map_err(|e| {
        warn!("Logout rejected: {}", e);
        error_response(StatusCode::BAD_REQUEST, e.to_string())
    })?;

    Ok(Json(LogoutResponse {
        message: LOGOUT_MESSAGE.to_string(),
    }))
}

/// Token from `Authorization: Bearer <token>`. Only the `Bearer ` scheme is
/// stripped; a header without it is taken as the bare token, untrimmed.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ").unwrap_or(value);
    (!token.is_empty()).then_some(token)
}
