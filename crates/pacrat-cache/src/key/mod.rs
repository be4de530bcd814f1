//! Canonical cache keys for provider requests.

use std::fmt;

use pacrat_core::Index;

/// Deterministic cache key derived from an operation and its parameters.
///
/// Every parameter that affects a result (query text, limit, exact version
/// or its absence) is part of the encoding, so two logically identical
/// requests always render to the same key and two different requests never
/// share one. Index names are already canonical lowercase via
/// [`Index::as_str`]; an omitted version is rendered as `@latest`, which
/// cannot collide with a literal version (version strings never contain
/// `@`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Key for a `search` operation
    pub fn search(index: Index, query: &str, limit: usize) -> Self {
        CacheKey(format!("search:{index}:{query}:{limit}"))
    }

    /// Key for an `info` operation
    pub fn info(index: Index, name: &str, version: Option<&str>) -> Self {
        CacheKey(format!(
            "info:{index}:{name}:{}",
            version.unwrap_or("@latest")
        ))
    }

    /// Key for a Docker Hub tag enumeration
    pub fn docker_tags(name: &str) -> Self {
        CacheKey(format!("tags:{}:{name}", Index::Docker))
    }

    /// Key for a single Docker Hub tag lookup
    pub fn docker_tag_info(name: &str, tag: &str) -> Self {
        CacheKey(format!("tag-info:{}:{name}:{tag}", Index::Docker))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests;
