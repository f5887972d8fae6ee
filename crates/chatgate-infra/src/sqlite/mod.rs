//! SQLite-backed persistence.

pub mod conversation;
pub mod pool;
