//! ConversationStore trait definition.
//!
//! The durable append-only log of conversation turns. Implementations live
//! in `chatgate-infra` (e.g. `SqliteConversationStore`). Uses native async
//! fn in traits (RPITIT, Rust 2024 edition).

use chatgate_types::conversation::{ConversationTurn, Role};
use chatgate_types::error::StorageError;
use uuid::Uuid;

/// Durable persistence for conversation turns.
pub trait ConversationStore: Send + Sync {
    /// Append one turn: mints a fresh id, stamps the current UTC time, and
    /// persists atomically. Returns the turn as written.
    fn append(
        &self,
        session_id: Uuid,
        role: Role,
        message: &str,
    ) -> impl std::future::Future<Output = Result<ConversationTurn, StorageError>> + Send;

    /// All turns for a session, ordered by timestamp ascending (id ascending
    /// as tiebreak).
    fn list(
        &self,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Vec<ConversationTurn>, StorageError>> + Send;
}
