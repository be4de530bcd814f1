//! Normalized package search and info shapes.
//!
//! The three package indexes return structurally divergent documents;
//! providers flatten them into these two structs. Fields that only some
//! backends supply are optional and omitted from serialized output when
//! absent.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One row of a package search, normalized across PyPI, npm and crates.io.
///
/// Rows keep the upstream ordering; the sequence length is bounded by the
/// caller's limit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResult {
    pub name: String,
    pub version: String,
    pub description: String,
    /// npm: publishing user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    /// npm: publication date of the listed version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// npm: homepage/repository/npm links
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<BTreeMap<String, String>>,
    /// crates.io: all-time download count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downloads: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Details for a single package, normalized across PyPI, npm and crates.io.
///
/// `version` is always a concrete resolved version string. When the caller
/// omitted one, the provider resolved the backend's notion of "latest"
/// before building this value; a symbolic alias never appears here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageInfo {
    pub name: String,
    pub version: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    /// crates.io: docs.rs or custom documentation link
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downloads: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recent_downloads: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    /// npm: runtime dependencies of the resolved version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<BTreeMap<String, String>>,
    /// Known versions, in the backend's own ordering
    #[serde(skip_serializing_if = "Option::is_none")]
    pub versions: Option<Vec<String>>,
    /// crates.io: whether the resolved version was yanked
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yanked: Option<bool>,
}
