//! Package index provider adapters for Pacrat
//!
//! This crate translates the uniform `search`/`info` contract into the HTTP
//! calls of each upstream index (PyPI, npm, crates.io, Docker Hub) and
//! normalizes the structurally divergent responses into the shared result
//! shapes. Each adapter checks the query cache before touching the network
//! and stores only complete normalized results, never raw payloads or
//! failures.

pub mod client;
pub mod crates_io;
pub mod dockerhub;
pub mod npm;
pub mod pypi;

// Re-export main types
pub use client::{ClientConfig, HttpClient, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
pub use crates_io::CratesIoProvider;
pub use dockerhub::DockerHubProvider;
pub use npm::NpmProvider;
pub use pypi::PypiProvider;

use std::sync::Arc;

use pacrat_cache::{CacheKey, QueryCache};
use pacrat_core::error::PacratError;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, PacratError>;

/// Largest accepted search result count; limits are clamped to `1..=49`
pub const MAX_SEARCH_LIMIT: usize = 49;

pub(crate) fn clamp_limit(limit: usize) -> usize {
    limit.clamp(1, MAX_SEARCH_LIMIT)
}

/// Look up a normalized result, deserializing it back into its typed shape.
/// A value that no longer matches the expected shape reads as a miss.
pub(crate) fn cache_lookup<T>(cache: &Option<Arc<QueryCache>>, key: &CacheKey) -> Option<T>
where
    T: DeserializeOwned,
{
    let value = cache.as_deref()?.get(key)?;
    serde_json::from_value(value).ok()
}

/// Store a fully normalized result under its canonical key.
pub(crate) fn cache_store<T>(cache: &Option<Arc<QueryCache>>, key: &CacheKey, value: &T)
where
    T: Serialize,
{
    if let Some(cache) = cache.as_deref() {
        if let Ok(value) = serde_json::to_value(value) {
            cache.put(key.clone(), value);
        }
    }
}
