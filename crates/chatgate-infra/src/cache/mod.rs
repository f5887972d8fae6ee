//! Response-cache backends.

pub mod memory;

pub use memory::MemoryResponseCache;
