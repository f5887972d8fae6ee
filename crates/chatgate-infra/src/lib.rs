//! Infrastructure layer for Chatgate.
//!
//! Contains implementations of the ports defined in `chatgate-core`:
//! SQLite conversation storage, the in-process TTL response cache, and the
//! completion-provider HTTP client.

pub mod cache;
pub mod llm;
pub mod sqlite;
