//! crates/emotion_diary_core/src/ports.rs
//!
//! Defines the service contracts (traits) the relay forwards to.
//! These traits form the boundary of the hexagonal architecture, so the web
//! layer never depends on a concrete provider SDK or HTTP client.

use async_trait::async_trait;

use crate::domain::{AuthSession, AuthUser, Credentials, NewDiary, StoredDiaries};
use crate::prompts::Prompt;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    /// The provider answered and refused the request. Holds its message verbatim.
    #[error("{0}")]
    Rejected(String),
    /// The call never produced a usable answer (transport, decoding, empty output).
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait AuthService: Send + Sync {
    /// Creates an already-confirmed user.
    async fn create_user(&self, credentials: &Credentials) -> PortResult<AuthUser>;

    /// Exchanges an email/password pair for a session.
    async fn sign_in_with_password(&self, credentials: &Credentials) -> PortResult<AuthSession>;

    /// Revokes every session belonging to the owner of `access_token`.
    async fn sign_out(&self, access_token: &str) -> PortResult<()>;
}

#[async_trait]
pub trait DiaryRepository: Send + Sync {
    /// Inserts one diary entry and returns the rows the database reports back.
    async fn insert_diary(&self, diary: &NewDiary) -> PortResult<StoredDiaries>;
}

#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Submits a prompt and returns the model's raw text answer.
    async fn complete(&self, prompt: &Prompt) -> PortResult<String>;
}
