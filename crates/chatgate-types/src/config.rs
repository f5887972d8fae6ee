//! Startup configuration for the gateway.
//!
//! All settings come from the environment and are loaded once at process
//! start. Required variables that are absent produce a fatal
//! [`ConfigError`]; everything else has a default.

use secrecy::SecretString;

use crate::error::ConfigError;

/// Default Together AI chat-completions endpoint.
fn default_api_url() -> String {
    "https://api.together.xyz/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "meta-llama/Llama-2-7b-chat-hf".to_string()
}

const DEFAULT_MODEL_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CACHE_TTL_SECS: u64 = 60;
const DEFAULT_RATE_LIMIT_MAX: u32 = 5;
const DEFAULT_RATE_LIMIT_WINDOW_SECS: u64 = 60;

/// Completion-provider settings.
///
/// The API key is a [`SecretString`], so Debug output shows it as
/// `[REDACTED]` and never leaks the credential to logs or panic output.
#[derive(Clone, Debug)]
pub struct ModelConfig {
    /// Bearer credential for the provider.
    pub api_key: SecretString,
    /// Full chat-completions endpoint URL.
    pub api_url: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Upper bound on a single completion call.
    pub timeout_secs: u64,
}

/// Top-level gateway configuration.
#[derive(Clone, Debug)]
pub struct GatewayConfig {
    /// SQLite connection string for the conversation store.
    pub database_url: String,
    pub model: ModelConfig,
    /// Response-cache entry lifetime in seconds.
    pub cache_ttl_secs: u64,
    /// Requests admitted per client per window.
    pub rate_limit_max: u32,
    /// Rate-limit window length in seconds.
    pub rate_limit_window_secs: u64,
}

impl GatewayConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("CHATGATE_DATABASE_URL")
            .ok_or(ConfigError::MissingVar("CHATGATE_DATABASE_URL"))?;
        let api_key = lookup("CHATGATE_API_KEY")
            .ok_or(ConfigError::MissingVar("CHATGATE_API_KEY"))?;

        Ok(Self {
            database_url,
            model: ModelConfig {
                api_key: SecretString::from(api_key),
                api_url: lookup("CHATGATE_API_URL").unwrap_or_else(default_api_url),
                model: lookup("CHATGATE_MODEL").unwrap_or_else(default_model),
                timeout_secs: parse_or(
                    &lookup,
                    "CHATGATE_MODEL_TIMEOUT_SECS",
                    DEFAULT_MODEL_TIMEOUT_SECS,
                )?,
            },
            cache_ttl_secs: parse_or(&lookup, "CHATGATE_CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)?,
            rate_limit_max: parse_or(&lookup, "CHATGATE_RATE_LIMIT_MAX", DEFAULT_RATE_LIMIT_MAX)?,
            rate_limit_window_secs: parse_or(
                &lookup,
                "CHATGATE_RATE_LIMIT_WINDOW_SECS",
                DEFAULT_RATE_LIMIT_WINDOW_SECS,
            )?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::InvalidVar {
            var,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn base_env(key: &str) -> Option<String> {
        match key {
            "CHATGATE_DATABASE_URL" => Some("sqlite://chat.db".to_string()),
            "CHATGATE_API_KEY" => Some("tok-test".to_string()),
            _ => None,
        }
    }

    #[test]
    fn test_defaults_applied() {
        let config = GatewayConfig::from_lookup(base_env).unwrap();
        assert_eq!(config.database_url, "sqlite://chat.db");
        assert_eq!(config.model.api_key.expose_secret(), "tok-test");
        assert_eq!(config.model.model, "meta-llama/Llama-2-7b-chat-hf");
        assert!(config.model.api_url.contains("together"));
        assert_eq!(config.cache_ttl_secs, 60);
        assert_eq!(config.rate_limit_max, 5);
        assert_eq!(config.rate_limit_window_secs, 60);
    }

    #[test]
    fn test_missing_database_url_is_fatal() {
        let err = GatewayConfig::from_lookup(|key| match key {
            "CHATGATE_API_KEY" => Some("tok".to_string()),
            _ => None,
        })
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingVar("CHATGATE_DATABASE_URL")
        ));
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        let err = GatewayConfig::from_lookup(|key| match key {
            "CHATGATE_DATABASE_URL" => Some("sqlite://chat.db".to_string()),
            _ => None,
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("CHATGATE_API_KEY")));
    }

    #[test]
    fn test_overrides_win() {
        let config = GatewayConfig::from_lookup(|key| match key {
            "CHATGATE_RATE_LIMIT_MAX" => Some("10".to_string()),
            "CHATGATE_CACHE_TTL_SECS" => Some("5".to_string()),
            other => base_env(other),
        })
        .unwrap();
        assert_eq!(config.rate_limit_max, 10);
        assert_eq!(config.cache_ttl_secs, 5);
    }

    #[test]
    fn test_unparseable_number_rejected() {
        let err = GatewayConfig::from_lookup(|key| match key {
            "CHATGATE_RATE_LIMIT_MAX" => Some("lots".to_string()),
            other => base_env(other),
        })
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidVar {
                var: "CHATGATE_RATE_LIMIT_MAX",
                ..
            }
        ));
    }
}
