//! Error taxonomy for the gateway, one enum per component boundary.
//!
//! The swallow/propagate decision for each class is made by the orchestrator
//! in `chatgate-core`: storage faults abort the request, cache faults are
//! treated as misses, model faults degrade to a fallback reply.

use thiserror::Error;

/// Errors from the conversation store. Surfaced to the caller as a
/// server fault; never retried.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database connection error: {0}")]
    Connection(String),

    #[error("query error: {0}")]
    Query(String),
}

/// Errors from the response cache backend. Always fail-open.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache backend unavailable: {0}")]
    Unavailable(String),
}

/// Errors from the completion provider, normalized by failure class.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Provider answered with a non-2xx status.
    #[error("provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Connect failure, timeout, or other transport-level fault.
    #[error("transport error: {0}")]
    Transport(String),

    /// 2xx response whose body is missing the expected reply shape.
    #[error("malformed provider response: {0}")]
    Malformed(String),
}

/// Startup configuration errors. Fatal: the process must not start.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable '{0}'")]
    MissingVar(&'static str),

    #[error("invalid value for '{var}': {reason}")]
    InvalidVar { var: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::Query("no such table".to_string());
        assert_eq!(err.to_string(), "query error: no such table");
    }

    #[test]
    fn test_model_error_display_includes_status() {
        let err = ModelError::Status {
            status: 503,
            body: "overloaded".to_string(),
        };
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("overloaded"));
    }

    #[test]
    fn test_config_error_names_variable() {
        let err = ConfigError::MissingVar("CHATGATE_API_KEY");
        assert!(err.to_string().contains("CHATGATE_API_KEY"));
    }
}
