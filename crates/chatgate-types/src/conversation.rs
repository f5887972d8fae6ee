//! Conversation turn types.
//!
//! A turn is one message (user or assistant) in a conversation. Turns are
//! immutable once written: the gateway appends them and never updates or
//! deletes them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Author of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            other => Err(format!("invalid role: '{other}'")),
        }
    }
}

/// One persisted message in a conversation.
///
/// `id` is a UUIDv7, so ids within a session are time-sortable and break
/// ties between turns stamped in the same instant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub id: Uuid,
    pub session_id: Uuid,
    pub role: Role,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}
