//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, the concrete implementation of
//! the `DiaryRepository` port. Rows are written through the project's
//! PostgREST endpoint with the service-role key.

use async_trait::async_trait;
use emotion_diary_core::domain::{NewDiary, StoredDiaries};
use emotion_diary_core::ports::{DiaryRepository, PortResult};
use reqwest::RequestBuilder;

use super::supabase::{self, ProjectKey, SupabaseClient};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `DiaryRepository` port.
#[derive(Clone)]
pub struct DbAdapter {
    client: SupabaseClient,
    table: String,
}

impl DbAdapter {
    /// Creates a new `DbAdapter` writing into `table`.
    pub fn new(client: SupabaseClient, table: String) -> Self {
        Self { client, table }
    }

    fn table_path(&self) -> String {
        format!("/rest/v1/{}", self.table)
    }

    /// Single-row insert that asks PostgREST to echo the stored row back.
    fn insert_request(&self, diary: &NewDiary) -> RequestBuilder {
        self.client
            .post(&self.table_path(), ProjectKey::ServiceRole)
            .header("Prefer", "return=representation")
            .json(&[diary])
    }
}

//=========================================================================================
// `DiaryRepository` Trait Implementation
//=========================================================================================

#[async_trait]
impl DiaryRepository for DbAdapter {
    async fn insert_diary(&self, diary: &NewDiary) -> PortResult<StoredDiaries> {
        supabase::send_json(self.insert_request(diary)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn adapter() -> DbAdapter {
        let client = SupabaseClient::new(
            reqwest::Client::new(),
            "https://project.supabase.co",
            "service-key".to_string(),
            "anon-key".to_string(),
        );
        DbAdapter::new(client, "diaries".to_string())
    }

    #[test]
    fn table_path_targets_rest_endpoint() {
        assert_eq!(adapter().table_path(), "/rest/v1/diaries");
    }

    #[test]
    fn insert_sends_one_row_array_and_asks_for_representation() {
        let diary = NewDiary {
            user_id: Some(json!(42)),
            content: Some(json!("좋은 하루")),
            ..Default::default()
        };
        let request = adapter().insert_request(&diary).build().unwrap();

        assert_eq!(
            request.url().as_str(),
            "https://project.supabase.co/rest/v1/diaries"
        );
        assert_eq!(request.headers()["prefer"], "return=representation");
        assert_eq!(request.headers()["apikey"], "service-key");
        assert_eq!(request.headers()["authorization"], "Bearer service-key");

        let bytes = request.body().and_then(|b| b.as_bytes()).unwrap();
        let body: Value = serde_json::from_slice(bytes).unwrap();
        assert_eq!(body, json!([{ "user_id": 42, "content": "좋은 하루" }]));
    }
}
