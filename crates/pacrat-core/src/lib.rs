//! # pacrat-core
//!
//! Core types shared across all Pacrat crates.
//!
//! This crate provides:
//! - The `Index` identifier for the supported package indexes
//! - Normalized `SearchResult` and `PackageInfo` shapes returned by every
//!   provider regardless of which upstream API answered
//! - The Docker Hub tag/image structures (the only nested result shape)
//! - The `PacratError` enum for unified error handling
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: Normalized result types and the index identifier
//! - `error`: Error types and result aliases

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{PacratError, PacratResult};
pub use types::{
    DockerImage, DockerSearchResult, DockerTag, DockerTagInfo, DockerTagList, Index, PackageInfo,
    SearchResult,
};
