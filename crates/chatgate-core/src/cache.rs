//! ResponseCache trait and cache-key fingerprinting.
//!
//! The cache memoizes replies for a short TTL, keyed by a fingerprint of
//! the request content. It is strictly best-effort: the orchestrator treats
//! any backend fault as a miss and never fails a request over it.

use std::time::Duration;

use chatgate_types::error::CacheError;
use sha2::{Digest, Sha256};

/// Short-TTL memoization of replies.
///
/// Implementations live in `chatgate-infra`. Expired entries must report
/// absent on `get` even if the backend has not yet purged them.
pub trait ResponseCache: Send + Sync {
    fn get(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>, CacheError>> + Send;

    fn put(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> impl std::future::Future<Output = Result<(), CacheError>> + Send;
}

/// Deterministic cache key for an inbound message: hex SHA-256 of the
/// trimmed content.
///
/// The session identity is deliberately not part of the key, matching the
/// gateway's content-only caching policy (two sessions asking the same
/// question share a cached reply).
pub fn fingerprint(message: &str) -> String {
    let digest = Sha256::digest(message.trim().as_bytes());
    format!("{:x}", digest)
}
