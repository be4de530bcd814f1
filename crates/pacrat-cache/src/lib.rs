//! Query result caching for Pacrat
//!
//! This crate provides the in-process cache that sits between the provider
//! adapters and the upstream HTTP APIs: a capacity-bounded store mapping a
//! canonical request descriptor to a previously normalized result, with
//! per-entry expiration.

pub mod key;
pub mod store;

// Re-export main types
pub use key::CacheKey;
pub use store::{CacheStats, QueryCache, DEFAULT_CAPACITY, DEFAULT_TTL};
