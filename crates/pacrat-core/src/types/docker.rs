//! Docker Hub result shapes.
//!
//! Docker Hub is the one backend with a nested result: a repository has
//! tags, and each tag carries one image descriptor per platform.

use serde::{Deserialize, Serialize};

/// One row of a Docker Hub repository search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DockerSearchResult {
    pub name: String,
    pub description: String,
    pub star_count: u64,
    pub pull_count: u64,
    pub is_official: bool,
    pub is_automated: bool,
}

/// Per-platform image descriptor within a tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DockerImage {
    pub architecture: String,
    pub os: String,
    /// Compressed size in bytes
    pub size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

/// One tag of a repository, with its platform images.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DockerTag {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    pub images: Vec<DockerImage>,
}

/// Tag enumeration for a repository.
///
/// `name` is always namespace-qualified (`library/nginx`), even when the
/// caller asked for an official image without its namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DockerTagList {
    pub name: String,
    pub repository: String,
    pub tag_count: u64,
    pub tags: Vec<DockerTag>,
}

/// One resolved tag with its manifest's platform images.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DockerTagInfo {
    pub name: String,
    pub tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    pub full_size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    pub images: Vec<DockerImage>,
}
