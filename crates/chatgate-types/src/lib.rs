//! Shared domain types for Chatgate.
//!
//! This crate contains the domain types used across the gateway:
//! conversation turns, the error taxonomy, and startup configuration.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror,
//! secrecy.

pub mod config;
pub mod conversation;
pub mod error;
