//! Docker Hub provider adapter.
//!
//! Official images are published without a namespace; a name with no `/`
//! is qualified with the `library/` namespace before any URL is built.
//! Tag results carry one image descriptor per platform, the only nested
//! shape among the backends.

use std::sync::Arc;

use serde::Deserialize;

use pacrat_cache::{CacheKey, QueryCache};
use pacrat_core::{
    DockerImage, DockerSearchResult, DockerTag, DockerTagInfo, DockerTagList, Index,
};

use crate::client::HttpClient;
use crate::{cache_lookup, cache_store, clamp_limit, ProviderResult};

const DOCKER_HUB_BASE_URL: &str = "https://hub.docker.com";

/// Tags fetched per repository; Docker Hub caps page_size at 100
const TAG_PAGE_SIZE: usize = 100;

/// Raw `/v2/search/repositories` response
#[derive(Debug, Deserialize)]
struct DockerSearchResponse {
    #[serde(default)]
    results: Vec<DockerSearchRow>,
}

#[derive(Debug, Deserialize)]
struct DockerSearchRow {
    repo_name: String,
    #[serde(default)]
    short_description: Option<String>,
    #[serde(default)]
    star_count: u64,
    #[serde(default)]
    pull_count: u64,
    #[serde(default)]
    is_official: bool,
    #[serde(default)]
    is_automated: bool,
}

/// Raw `/v2/repositories/{name}/tags` page
#[derive(Debug, Deserialize)]
struct DockerTagPage {
    #[serde(default)]
    count: u64,
    #[serde(default)]
    results: Vec<DockerTagRow>,
}

/// One tag document; also the shape of the single-tag endpoint
#[derive(Debug, Deserialize)]
struct DockerTagRow {
    name: String,
    #[serde(default)]
    digest: Option<String>,
    #[serde(default)]
    last_updated: Option<String>,
    #[serde(default)]
    full_size: Option<u64>,
    #[serde(default)]
    images: Vec<DockerImageRow>,
}

#[derive(Debug, Deserialize)]
struct DockerImageRow {
    #[serde(default)]
    architecture: Option<String>,
    #[serde(default)]
    os: Option<String>,
    #[serde(default)]
    size: Option<u64>,
    #[serde(default)]
    digest: Option<String>,
}

impl DockerImageRow {
    fn normalize(self) -> DockerImage {
        DockerImage {
            architecture: self.architecture.unwrap_or_default(),
            os: self.os.unwrap_or_default(),
            size: self.size.unwrap_or_default(),
            digest: self.digest,
        }
    }
}

/// Docker Hub adapter
#[derive(Debug, Clone)]
pub struct DockerHubProvider {
    http: HttpClient,
    cache: Option<Arc<QueryCache>>,
    base_url: String,
}

impl DockerHubProvider {
    pub fn new(http: HttpClient, cache: Option<Arc<QueryCache>>) -> Self {
        DockerHubProvider {
            http,
            cache,
            base_url: DOCKER_HUB_BASE_URL.to_string(),
        }
    }

    /// Search Docker Hub repositories matching `query`
    pub async fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> ProviderResult<Vec<DockerSearchResult>> {
        let limit = clamp_limit(limit);
        let key = CacheKey::search(Index::Docker, query, limit);
        if let Some(hit) = cache_lookup(&self.cache, &key) {
            return Ok(hit);
        }

        let url = format!("{}/v2/search/repositories", self.base_url);
        let raw: DockerSearchResponse = self
            .http
            .get_json(
                Index::Docker,
                &url,
                &[
                    ("query", query.to_string()),
                    ("page_size", limit.to_string()),
                ],
            )
            .await?;

        // The upstream may ignore page_size bounds, so re-truncate
        let results: Vec<DockerSearchResult> = raw
            .results
            .into_iter()
            .take(limit)
            .map(|row| DockerSearchResult {
                name: row.repo_name,
                description: row.short_description.unwrap_or_default(),
                star_count: row.star_count,
                pull_count: row.pull_count,
                is_official: row.is_official,
                is_automated: row.is_automated,
            })
            .collect();

        cache_store(&self.cache, &key, &results);
        Ok(results)
    }

    /// Enumerate tags for an image, nested platform descriptors included
    pub async fn tags(&self, name: &str) -> ProviderResult<DockerTagList> {
        let qualified = qualify(name);
        // Keyed on the qualified name so `nginx` and `library/nginx` share
        // one entry
        let key = CacheKey::docker_tags(&qualified);
        if let Some(hit) = cache_lookup(&self.cache, &key) {
            return Ok(hit);
        }

        let url = format!("{}/v2/repositories/{qualified}/tags", self.base_url);
        let raw: DockerTagPage = self
            .http
            .get_json(
                Index::Docker,
                &url,
                &[("page_size", TAG_PAGE_SIZE.to_string())],
            )
            .await?;

        let list = DockerTagList {
            repository: format!("{}/v2/repositories/{qualified}", self.base_url),
            name: qualified,
            tag_count: raw.count,
            tags: raw
                .results
                .into_iter()
                .map(|row| DockerTag {
                    name: row.name,
                    digest: row.digest,
                    last_updated: row.last_updated,
                    images: row.images.into_iter().map(DockerImageRow::normalize).collect(),
                })
                .collect(),
        };

        cache_store(&self.cache, &key, &list);
        Ok(list)
    }

    /// Resolve one tag to its manifest's platform images
    pub async fn tag_info(&self, name: &str, tag: &str) -> ProviderResult<DockerTagInfo> {
        let qualified = qualify(name);
        let key = CacheKey::docker_tag_info(&qualified, tag);
        if let Some(hit) = cache_lookup(&self.cache, &key) {
            return Ok(hit);
        }

        let url = format!("{}/v2/repositories/{qualified}/tags/{tag}", self.base_url);
        let raw: DockerTagRow = self.http.get_json(Index::Docker, &url, &[]).await?;

        let info = DockerTagInfo {
            name: qualified,
            tag: raw.name,
            digest: raw.digest,
            full_size: raw.full_size.unwrap_or_default(),
            last_updated: raw.last_updated,
            images: raw.images.into_iter().map(DockerImageRow::normalize).collect(),
        };

        cache_store(&self.cache, &key, &info);
        Ok(info)
    }
}

/// Qualify an image name: official images carry no namespace and live
/// under `library/`
fn qualify(name: &str) -> String {
    if name.contains('/') {
        name.to_string()
    } else {
        format!("library/{name}")
    }
}
