//! Orchestration logic and backend trait definitions for Chatgate.
//!
//! This crate defines the "ports" (store, cache, model-client traits) that
//! the infrastructure layer implements, plus the per-request pipeline that
//! ties them together. It depends only on `chatgate-types` -- never on
//! `chatgate-infra` or any database/IO crate.

pub mod cache;
pub mod gateway;
pub mod limiter;
pub mod model;
pub mod session;
pub mod store;
