//! services/api/src/adapters/auth.rs
//!
//! This module contains the adapter for Supabase Auth (GoTrue).
//! It implements the `AuthService` port from the `core` crate.

use async_trait::async_trait;
use emotion_diary_core::domain::{AuthSession, AuthUser, Credentials};
use emotion_diary_core::ports::{AuthService, PortResult};
use reqwest::RequestBuilder;
use serde::Serialize;
use tracing::debug;

use super::supabase::{self, ProjectKey, SupabaseClient};

/// Body of the admin create-user call.
#[derive(Serialize)]
struct CreateUserBody<'a> {
    email: &'a str,
    password: &'a str,
    email_confirm: bool,
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `AuthService` against the project's GoTrue API.
#[derive(Clone)]
pub struct SupabaseAuthAdapter {
    client: SupabaseClient,
}

impl SupabaseAuthAdapter {
    /// Creates a new `SupabaseAuthAdapter`.
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    /// Admin user creation with the service-role key; the address is marked confirmed.
    fn create_user_request(&self, credentials: &Credentials) -> RequestBuilder {
        let body = CreateUserBody {
            email: &credentials.email,
            password: &credentials.password,
            email_confirm: true,
        };
        self.client
            .post("/auth/v1/admin/users", ProjectKey::ServiceRole)
            .json(&body)
    }

    /// Password grant, signed with the anonymous key like a browser client would be.
    fn sign_in_request(&self, credentials: &Credentials) -> RequestBuilder {
        self.client
            .post("/auth/v1/token?grant_type=password", ProjectKey::Anon)
            .json(credentials)
    }

    /// Global logout acting as the token's owner.
    fn sign_out_request(&self, access_token: &str) -> RequestBuilder {
        self.client.post_as_user(
            "/auth/v1/logout?scope=global",
            ProjectKey::ServiceRole,
            access_token,
        )
    }
}

//=========================================================================================
// `AuthService` Trait Implementation
//=========================================================================================

#[async_trait]
impl AuthService for SupabaseAuthAdapter {
    async fn create_user(&self, credentials: &Credentials) -> PortResult<AuthUser> {
        let user: AuthUser = supabase::send_json(self.create_user_request(credentials)).await?;
        debug!(user_id = %user.id, "Supabase user created");
        Ok(user)
    }

    async fn sign_in_with_password(&self, credentials: &Credentials) -> PortResult<AuthSession> {
        supabase::send_json(self.sign_in_request(credentials)).await
    }

    async fn sign_out(&self, access_token: &str) -> PortResult<()> {
        supabase::send(self.sign_out_request(access_token)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn adapter() -> SupabaseAuthAdapter {
        SupabaseAuthAdapter::new(SupabaseClient::new(
            reqwest::Client::new(),
            "https://project.supabase.co",
            "service-key".to_string(),
            "anon-key".to_string(),
        ))
    }

    fn credentials() -> Credentials {
        Credentials {
            email: "diary@example.com".to_string(),
            password: "pw".to_string(),
        }
    }

    fn header<'a>(request: &'a reqwest::Request, name: &str) -> &'a str {
        request.headers()[name].to_str().unwrap()
    }

    fn json_body(request: &reqwest::Request) -> Value {
        let bytes = request.body().and_then(|b| b.as_bytes()).unwrap();
        serde_json::from_slice(bytes).unwrap()
    }

    #[test]
    fn create_user_uses_service_role_and_confirms_email() {
        let request = adapter()
            .create_user_request(&credentials())
            .build()
            .unwrap();

        assert_eq!(request.method(), reqwest::Method::POST);
        assert_eq!(
            request.url().as_str(),
            "https://project.supabase.co/auth/v1/admin/users"
        );
        assert_eq!(header(&request, "apikey"), "service-key");
        assert_eq!(header(&request, "authorization"), "Bearer service-key");
        assert_eq!(
            json_body(&request),
            json!({ "email": "diary@example.com", "password": "pw", "email_confirm": true })
        );
    }

    #[test]
    fn sign_in_uses_anon_key_and_password_grant() {
        let request = adapter().sign_in_request(&credentials()).build().unwrap();

        assert_eq!(
            request.url().as_str(),
            "https://project.supabase.co/auth/v1/token?grant_type=password"
        );
        assert_eq!(header(&request, "apikey"), "anon-key");
        assert_eq!(header(&request, "authorization"), "Bearer anon-key");
        assert_eq!(
            json_body(&request),
            json!({ "email": "diary@example.com", "password": "pw" })
        );
    }

    #[test]
    fn sign_out_acts_as_user_with_service_apikey() {
        let request = adapter().sign_out_request("user-jwt").build().unwrap();

        assert_eq!(
            request.url().as_str(),
            "https://project.supabase.co/auth/v1/logout?scope=global"
        );
        assert_eq!(header(&request, "apikey"), "service-key");
        assert_eq!(header(&request, "authorization"), "Bearer user-jwt");
        assert!(request.body().is_none());
    }
}
