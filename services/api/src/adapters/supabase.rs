//! services/api/src/adapters/supabase.rs
//!
//! Shared plumbing for talking to a Supabase project over its REST surface:
//! the base URL, the two project keys and one pooled `reqwest::Client`.
//! The auth and diary adapters are thin wrappers around this.

use emotion_diary_core::ports::{PortError, PortResult};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Which project key a request is signed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectKey {
    /// Bypasses row level security; only ever used server side.
    ServiceRole,
    Anon,
}

#[derive(Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: String,
    service_role_key: String,
    anon_key: String,
}

impl SupabaseClient {
    pub fn new(
        http: reqwest::Client,
        base_url: &str,
        service_role_key: String,
        anon_key: String,
    ) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            service_role_key,
            anon_key,
        }
    }

    /// Absolute URL for a path such as `/auth/v1/token`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn key(&self, key: ProjectKey) -> &str {
        match key {
            ProjectKey::ServiceRole => &self.service_role_key,
            ProjectKey::Anon => &self.anon_key,
        }
    }

    /// A POST signed with `key` both as `apikey` and as the bearer token.
    pub fn post(&self, path: &str, key: ProjectKey) -> RequestBuilder {
        let key = self.key(key);
        self.http
            .post(self.url(path))
            .header("apikey", key)
            .bearer_auth(key)
    }

    /// A POST carrying the project `apikey` but acting as the owner of `user_token`.
    pub fn post_as_user(&self, path: &str, key: ProjectKey, user_token: &str) -> RequestBuilder {
        self.http
            .post(self.url(path))
            .header("apikey", self.key(key))
            .bearer_auth(user_token)
    }
}

/// Sends a request and decodes a successful JSON body into `T`.
pub async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> PortResult<T> {
    let response = send(request).await?;
    response
        .json::<T>()
        .await
        .map_err(|e| PortError::Unexpected(format!("Malformed Supabase response: {}", e)))
}

/// Sends a request, turning any non-2xx answer into `PortError::Rejected`.
pub async fn send(request: RequestBuilder) -> PortResult<Response> {
    let response = request
        .send()
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(PortError::Rejected(error_message(status, &body)))
}

/// Extracts the human readable message from a GoTrue or PostgREST error body.
pub fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(body) {
        let message = ["msg", "message", "error_description", "error"]
            .iter()
            .find_map(|key| fields.get(*key).and_then(Value::as_str))
            .filter(|m| !m.is_empty());
        if let Some(message) = message {
            return message.to_string();
        }
    }

    let body = body.trim();
    if !body.is_empty() {
        return body.to_string();
    }

    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reads_gotrue_msg_field() {
        let body = r#"{"code":400,"error_code":"invalid_credentials","msg":"Invalid login credentials"}"#;
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, body),
            "Invalid login credentials"
        );
    }

    #[test]
    fn reads_postgrest_message_field() {
        let body = r#"{"code":"23502","details":null,"hint":null,"message":"null value in column \"content\""}"#;
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, body),
            "null value in column \"content\""
        );
    }

    #[test]
    fn prefers_error_description_over_error_code() {
        let body = r#"{"error":"invalid_grant","error_description":"Email not confirmed"}"#;
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, body),
            "Email not confirmed"
        );
    }

    #[test]
    fn falls_back_to_raw_body_then_status() {
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, "upstream down"),
            "upstream down"
        );
        assert_eq!(error_message(StatusCode::UNAUTHORIZED, ""), "Unauthorized");
    }

    #[test]
    fn url_joins_without_double_slash() {
        let client = SupabaseClient::new(
            reqwest::Client::new(),
            "https://project.supabase.co/",
            "service".to_string(),
            "anon".to_string(),
        );
        assert_eq!(
            client.url("/rest/v1/diaries"),
            "https://project.supabase.co/rest/v1/diaries"
        );
    }
}
