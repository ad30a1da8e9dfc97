//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{DbAdapter, OpenAiCompletionAdapter, SupabaseAuthAdapter, SupabaseClient},
    config::Config,
    error::ApiError,
    web::{build_router, state::AppState, ApiDoc},
};
use async_openai::{config::OpenAIConfig, Client};
use axum::Router;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Initialize Supabase Adapters ---
    let http = reqwest::Client::builder().build()?;
    let supabase = SupabaseClient::new(
        http,
        &config.supabase_url,
        config.supabase_service_role_key.clone(),
        config.supabase_anon_key.clone(),
    );
    let auth = Arc::new(SupabaseAuthAdapter::new(supabase.clone()));
    let diaries = Arc::new(DbAdapter::new(supabase, config.diary_table.clone()));
    info!("Supabase adapters ready for {}", config.supabase_url);

    // --- 3. Initialize the Completion Adapter ---
    let openai_config = OpenAIConfig::new().with_api_key(config.openai_api_key.clone());
    let completion = Arc::new(OpenAiCompletionAdapter::new(
        Client::with_config(openai_config),
        config.completion_model.clone(),
    ));

    // --- 4. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        auth,
        diaries,
        completion,
    });

    // --- 5. Create the Web Router ---
    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(build_router(app_state))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 6. Start the Server ---
    info!("서버가 포트 {}에서 실행 중!", config.bind_address.port());
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
