//! Normalized result types.
//!
//! Every provider maps its backend-specific response document into these
//! shapes, so callers see one contract no matter which index answered.

mod docker;
mod index;
mod package;

pub use docker::{DockerImage, DockerSearchResult, DockerTag, DockerTagInfo, DockerTagList};
pub use index::Index;
pub use package::{PackageInfo, SearchResult};
