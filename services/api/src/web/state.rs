//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use emotion_diary_core::ports::{AuthService, CompletionService, DiaryRepository};
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
///
/// Holds nothing mutable; every request only borrows the port adapters.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<dyn AuthService>,
    pub diaries: Arc<dyn DiaryRepository>,
    pub completion: Arc<dyn CompletionService>,
}
