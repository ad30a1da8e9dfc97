//! crates/emotion_diary_core/src/domain.rs
//!
//! Defines the core data structures that flow between the web layer and the
//! external providers. Auth objects are owned by the provider, so every field
//! the relay does not name is kept verbatim and handed back untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Email/password pair passed through to the auth provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// A user as returned by the auth provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Provider fields the relay does not interpret (metadata, timestamps, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A session issued by a password sign-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub token_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub user: AuthUser,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A diary entry to insert. Values are forwarded exactly as the client sent
/// them; absent fields are left out of the insert payload so the database
/// applies its own defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDiary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared: Option<Value>,
}

/// Rows echoed back by the database after an insert.
pub type StoredDiaries = Vec<Value>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn auth_user_keeps_unknown_provider_fields() {
        let raw = json!({
            "id": "8c7e2b8e-3f4a-4c55-9a7e-2f1d0d1c9b11",
            "email": "someone@example.com",
            "role": "authenticated",
            "app_metadata": { "provider": "email" }
        });

        let user: AuthUser = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(user.email.as_deref(), Some("someone@example.com"));
        assert_eq!(serde_json::to_value(&user).unwrap(), raw);
    }

    #[test]
    fn new_diary_omits_absent_fields() {
        let diary = NewDiary {
            user_id: Some(json!("u-1")),
            emotion: Some(json!("행복")),
            content: Some(json!("좋은 하루")),
            shared: Some(json!(false)),
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&diary).unwrap(),
            json!({
                "user_id": "u-1",
                "emotion": "행복",
                "content": "좋은 하루",
                "shared": false
            })
        );
    }

    #[test]
    fn new_diary_keeps_value_types_as_sent() {
        let diary: NewDiary =
            serde_json::from_value(json!({ "user_id": 42, "shared": "true" })).unwrap();

        assert_eq!(diary.user_id, Some(json!(42)));
        assert_eq!(diary.shared, Some(json!("true")));
        assert_eq!(
            serde_json::to_value(&diary).unwrap(),
            json!({ "user_id": 42, "shared": "true" })
        );
    }
}
