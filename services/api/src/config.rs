//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::{IpAddr, SocketAddr};
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    pub supabase_url: String,
    pub supabase_service_role_key: String,
    pub supabase_anon_key: String,
    pub diary_table: String,
    pub openai_api_key: String,
    pub completion_model: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, e.g. a map in tests.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| ConfigError::MissingVar(key.to_string()))
        };

        // --- Load Server Settings ---
        let host_str = lookup("BIND_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let host = host_str
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidValue("BIND_HOST".to_string(), e.to_string()))?;

        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| ConfigError::InvalidValue("PORT".to_string(), e.to_string()))?,
            None => 3000,
        };

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Load Supabase Settings ---
        let supabase_url = required("SUPABASE_URL")?.trim_end_matches('/').to_string();
        let supabase_service_role_key = required("SUPABASE_SERVICE_ROLE")?;
        let supabase_anon_key = required("SUPABASE_ANON_KEY")?;
        let diary_table = lookup("DIARY_TABLE").unwrap_or_else(|| "diaries".to_string());

        // --- Load Completion Settings ---
        let openai_api_key = required("OPENAI_API_KEY")?;
        let completion_model =
            lookup("COMPLETION_MODEL").unwrap_or_else(|| "gpt-4".to_string());

        Ok(Self {
            bind_address: SocketAddr::new(host, port),
            log_level,
            supabase_url,
            supabase_service_role_key,
            supabase_anon_key,
            diary_table,
            openai_api_key,
            completion_model,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn base_env() -> HashMap<&'static str, String> {
        HashMap::from([
            ("SUPABASE_URL", "https://project.supabase.co/".to_string()),
            ("SUPABASE_SERVICE_ROLE", "service-role".to_string()),
            ("SUPABASE_ANON_KEY", "anon".to_string()),
            ("OPENAI_API_KEY", "sk-test".to_string()),
        ])
    }

    fn load(env: &HashMap<&'static str, String>) -> Result<Config, ConfigError> {
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_optional_vars_are_absent() {
        let config = load(&base_env()).unwrap();

        assert_eq!(config.bind_address, "0.0.0.0:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.supabase_url, "https://project.supabase.co");
        assert_eq!(config.diary_table, "diaries");
        assert_eq!(config.completion_model, "gpt-4");
    }

    #[test]
    fn port_overrides_the_listen_port() {
        let mut env = base_env();
        env.insert("PORT", "8080".to_string());

        let config = load(&env).unwrap();
        assert_eq!(config.bind_address.port(), 8080);
    }

    #[test]
    fn invalid_port_is_rejected() {
        let mut env = base_env();
        env.insert("PORT", "eighty".to_string());

        assert!(matches!(
            load(&env),
            Err(ConfigError::InvalidValue(var, _)) if var == "PORT"
        ));
    }

    #[test]
    fn missing_openai_key_is_reported() {
        let mut env = base_env();
        env.remove("OPENAI_API_KEY");

        assert!(matches!(
            load(&env),
            Err(ConfigError::MissingVar(var)) if var == "OPENAI_API_KEY"
        ));
    }
}
