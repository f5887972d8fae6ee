//! CompletionClient trait definition.
//!
//! One outbound call per request, single attempt, bounded timeout. The
//! client returns honest errors; the decision to degrade into
//! [`FALLBACK_REPLY`] belongs to the orchestrator, which keeps the chat
//! endpoint always answering with something.

use chatgate_types::error::ModelError;

/// Reply substituted for every swallowed [`ModelError`].
pub const FALLBACK_REPLY: &str = "I'm having trouble responding. Please try again later.";

/// Outbound completion call against the configured provider.
///
/// Implementations live in `chatgate-infra` (e.g. `OpenAiCompatClient`).
pub trait CompletionClient: Send + Sync {
    /// Request a single-turn completion for `prompt`.
    fn complete(
        &self,
        prompt: &str,
    ) -> impl std::future::Future<Output = Result<String, ModelError>> + Send;
}
