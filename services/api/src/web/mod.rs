pub mod auth;
pub mod companion;
pub mod diary;
pub mod response;
pub mod rest;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use state::AppState;

pub use rest::ApiDoc;

/// Builds the relay's routes on top of the shared state.
///
/// Kept free of the Swagger UI so tests can drive it with stub ports.
pub fn build_router(app_state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/signup", post(auth::signup_handler))
        .route("/login", post(auth::login_handler))
        .route("/logout", post(auth::logout_handler))
        .route("/diary", post(diary::create_diary_handler))
        .route("/feedback", post(companion::feedback_handler))
        .route("/music", post(companion::music_handler))
        .route("/analysis", post(companion::analysis_handler))
        .route("/chat", post(companion::chat_handler));

    Router::new()
        .route("/", get(rest::root_handler))
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
