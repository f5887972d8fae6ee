//! SQLite conversation store implementation.
//!
//! Implements `ConversationStore` from `chatgate-core` using sqlx with
//! split read/write pools: raw queries, a private Row struct, rfc3339
//! datetimes stored as TEXT.

use chatgate_core::store::ConversationStore;
use chatgate_types::conversation::{ConversationTurn, Role};
use chatgate_types::error::StorageError;
use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ConversationStore`.
pub struct SqliteConversationStore {
    pool: DatabasePool,
}

impl SqliteConversationStore {
    /// Create a new store backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row type for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

struct TurnRow {
    id: String,
    session_id: String,
    role: String,
    message: String,
    timestamp: String,
}

impl TurnRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            session_id: row.try_get("session_id")?,
            role: row.try_get("role")?,
            message: row.try_get("message")?,
            timestamp: row.try_get("timestamp")?,
        })
    }

    fn into_turn(self) -> Result<ConversationTurn, StorageError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| StorageError::Query(format!("invalid turn id: {e}")))?;
        let session_id = Uuid::parse_str(&self.session_id)
            .map_err(|e| StorageError::Query(format!("invalid session_id: {e}")))?;
        let role: Role = self.role.parse().map_err(StorageError::Query)?;
        let timestamp = parse_datetime(&self.timestamp)?;

        Ok(ConversationTurn {
            id,
            session_id,
            role,
            message: self.message,
            timestamp,
        })
    }
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StorageError::Query(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

// ---------------------------------------------------------------------------
// ConversationStore implementation
// ---------------------------------------------------------------------------

impl ConversationStore for SqliteConversationStore {
    async fn append(
        &self,
        session_id: Uuid,
        role: Role,
        message: &str,
    ) -> Result<ConversationTurn, StorageError> {
        let turn = ConversationTurn {
            id: Uuid::now_v7(),
            session_id,
            role,
            message: message.to_string(),
            timestamp: Utc::now(),
        };

        // Single INSERT: the turn is either fully visible or absent.
        sqlx::query(
            r#"INSERT INTO conversation_history (id, session_id, role, message, timestamp)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(turn.id.to_string())
        .bind(turn.session_id.to_string())
        .bind(turn.role.to_string())
        .bind(&turn.message)
        .bind(format_datetime(&turn.timestamp))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| StorageError::Query(e.to_string()))?;

        Ok(turn)
    }

    async fn list(&self, session_id: &Uuid) -> Result<Vec<ConversationTurn>, StorageError> {
        let rows = sqlx::query(
            "SELECT * FROM conversation_history WHERE session_id = ? ORDER BY timestamp ASC, id ASC",
        )
        .bind(session_id.to_string())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| StorageError::Query(e.to_string()))?;

        let mut turns = Vec::with_capacity(rows.len());
        for row in &rows {
            let turn_row =
                TurnRow::from_row(row).map_err(|e| StorageError::Query(e.to_string()))?;
            turns.push(turn_row.into_turn()?);
        }

        Ok(turns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    #[tokio::test]
    async fn test_append_and_list_roundtrip() {
        let store = SqliteConversationStore::new(test_pool().await);
        let session = Uuid::new_v4();

        let user_turn = store.append(session, Role::User, "Hello").await.unwrap();
        let bot_turn = store
            .append(session, Role::Assistant, "Hi there!")
            .await
            .unwrap();
        assert_ne!(user_turn.id, bot_turn.id);

        let turns = store.list(&session).await.unwrap();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, Role::User);
        assert_eq!(turns[0].message, "Hello");
        assert_eq!(turns[1].role, Role::Assistant);
        assert_eq!(turns[1].message, "Hi there!");
    }

    #[tokio::test]
    async fn test_list_ordering_deterministic() {
        let store = SqliteConversationStore::new(test_pool().await);
        let session = Uuid::new_v4();

        for i in 0..6 {
            let role = if i % 2 == 0 { Role::User } else { Role::Assistant };
            store
                .append(session, role, &format!("turn {i}"))
                .await
                .unwrap();
        }

        let turns = store.list(&session).await.unwrap();
        let messages: Vec<&str> = turns.iter().map(|t| t.message.as_str()).collect();
        assert_eq!(
            messages,
            vec!["turn 0", "turn 1", "turn 2", "turn 3", "turn 4", "turn 5"]
        );
        // v7 ids are time-sortable, so id order agrees with append order
        // even when timestamps collide.
        let mut ids: Vec<Uuid> = turns.iter().map(|t| t.id).collect();
        let sorted = {
            let mut v = ids.clone();
            v.sort();
            v
        };
        assert_eq!(ids, sorted);
        ids.dedup();
        assert_eq!(ids.len(), 6);
    }

    #[tokio::test]
    async fn test_sessions_isolated() {
        let store = SqliteConversationStore::new(test_pool().await);
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        store.append(a, Role::User, "for a").await.unwrap();
        store.append(b, Role::User, "for b").await.unwrap();

        let turns_a = store.list(&a).await.unwrap();
        assert_eq!(turns_a.len(), 1);
        assert_eq!(turns_a[0].message, "for a");
    }

    #[tokio::test]
    async fn test_list_unknown_session_empty() {
        let store = SqliteConversationStore::new(test_pool().await);
        let turns = store.list(&Uuid::new_v4()).await.unwrap();
        assert!(turns.is_empty());
    }
}
