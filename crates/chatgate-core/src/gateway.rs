//! Chat orchestrator: the per-request state machine.
//!
//! Pipeline: rate check, cache check, session resolve, log user turn,
//! model call, log assistant turn, cache store, respond. Early exits: a
//! rate-check failure and a cache hit both stop the pipeline before any
//! logging; a storage fault aborts the request (earlier writes stay).
//!
//! Constructed once at startup with its backends injected; no global
//! mutable handles.

use std::time::Duration;

use chatgate_types::conversation::Role;
use chatgate_types::error::{ModelError, StorageError};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::cache::{ResponseCache, fingerprint};
use crate::limiter::FixedWindowLimiter;
use crate::model::{CompletionClient, FALLBACK_REPLY};
use crate::session;
use crate::store::ConversationStore;

/// Result of one trip through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatOutcome {
    /// A reply for the caller.
    Reply {
        reply: String,
        /// Resolved session, absent when the reply came from the cache
        /// (cache hits answer before session resolution).
        session_id: Option<Uuid>,
        served_from_cache: bool,
    },
    /// Quota exceeded; the caller should retry after the window.
    RateLimited,
}

/// Orchestrates rate limiting, caching, session identity, the model call,
/// and conversation logging for each request.
///
/// Generic over the store, cache, and model-client ports so the core never
/// depends on `chatgate-infra`.
pub struct ChatGateway<S, C, M> {
    store: S,
    cache: C,
    model: M,
    limiter: FixedWindowLimiter,
    cache_ttl: Duration,
}

impl<S, C, M> ChatGateway<S, C, M>
where
    S: ConversationStore,
    C: ResponseCache,
    M: CompletionClient,
{
    pub fn new(
        store: S,
        cache: C,
        model: M,
        limiter: FixedWindowLimiter,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            store,
            cache,
            model,
            limiter,
            cache_ttl,
        }
    }

    /// Access the conversation store (history reads).
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The rate-limit window, for the API layer's retry hint.
    pub fn retry_after(&self) -> Duration {
        self.limiter.window()
    }

    /// Handle one chat request.
    ///
    /// `client_key` identifies the caller for rate limiting;
    /// `session_token` is the raw `session_id` header, if any. Only storage
    /// faults surface as errors: cache faults degrade to misses and model
    /// faults degrade to [`FALLBACK_REPLY`].
    pub async fn handle_chat(
        &self,
        client_key: &str,
        session_token: Option<&str>,
        user_input: &str,
    ) -> Result<ChatOutcome, StorageError> {
        if !self.limiter.allow(client_key) {
            debug!(client = %client_key, "request rejected by rate limiter");
            return Ok(ChatOutcome::RateLimited);
        }

        let cache_key = fingerprint(user_input);
        match self.cache.get(&cache_key).await {
            Ok(Some(reply)) => {
                debug!(key = %cache_key, "cache hit");
                return Ok(ChatOutcome::Reply {
                    reply,
                    session_id: None,
                    served_from_cache: true,
                });
            }
            Ok(None) => {}
            // Fail-open: an unreachable cache is a miss, never a failure.
            Err(e) => warn!(error = %e, "cache get failed, treating as miss"),
        }

        let session_id = session::resolve(session_token);

        self.store
            .append(session_id, Role::User, user_input)
            .await?;
        info!(session_id = %session_id, "user turn logged");

        let reply = match self.model.complete(user_input).await {
            Ok(content) => content,
            Err(e) => {
                log_model_error(&e);
                FALLBACK_REPLY.to_string()
            }
        };

        self.store
            .append(session_id, Role::Assistant, &reply)
            .await?;
        info!(session_id = %session_id, "assistant turn logged");

        if let Err(e) = self.cache.put(&cache_key, &reply, self.cache_ttl).await {
            warn!(error = %e, "cache put failed, reply not memoized");
        }

        Ok(ChatOutcome::Reply {
            reply,
            session_id: Some(session_id),
            served_from_cache: false,
        })
    }
}

/// Log a swallowed model fault with its failure class.
fn log_model_error(err: &ModelError) {
    match err {
        ModelError::Status { status, body } => {
            error!(status = *status, body = %body, "provider returned error status");
        }
        ModelError::Transport(msg) => error!(error = %msg, "provider transport fault"),
        ModelError::Malformed(msg) => error!(error = %msg, "provider response malformed"),
    }
}
