//! crates.io provider adapter.
//!
//! Info takes up to two calls: the crate summary (which embeds the version
//! list) and, only when the caller pinned a version, that version's detail
//! for license and yanked state. A failed detail call falls back to
//! crate-level defaults instead of failing the whole operation.

use std::sync::Arc;

use serde::Deserialize;

use pacrat_cache::{CacheKey, QueryCache};
use pacrat_core::{Index, PackageInfo, PacratError, SearchResult};

use crate::client::HttpClient;
use crate::{cache_lookup, cache_store, clamp_limit, ProviderResult};

const CRATES_IO_BASE_URL: &str = "https://crates.io";

/// Raw `/api/v1/crates?q=` response
#[derive(Debug, Deserialize)]
struct CratesSearchResponse {
    #[serde(default)]
    crates: Vec<CrateSummary>,
}

/// Crate-level summary, shared by search rows and the crate detail document
#[derive(Debug, Deserialize)]
struct CrateSummary {
    name: String,
    #[serde(default)]
    max_version: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    homepage: Option<String>,
    #[serde(default)]
    documentation: Option<String>,
    #[serde(default)]
    repository: Option<String>,
    #[serde(default)]
    downloads: Option<u64>,
    #[serde(default)]
    recent_downloads: Option<u64>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    updated_at: Option<String>,
}

/// Raw `/api/v1/crates/{name}` response
#[derive(Debug, Deserialize)]
struct CrateResponse {
    #[serde(rename = "crate")]
    krate: CrateSummary,
    /// Newest first; the head is the latest version
    #[serde(default)]
    versions: Vec<CrateVersion>,
    #[serde(default)]
    categories: Vec<CrateCategory>,
    #[serde(default)]
    keywords: Vec<CrateKeyword>,
}

#[derive(Debug, Clone, Deserialize)]
struct CrateVersion {
    num: String,
    #[serde(default)]
    yanked: bool,
    #[serde(default)]
    license: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CrateCategory {
    slug: String,
}

#[derive(Debug, Deserialize)]
struct CrateKeyword {
    id: String,
}

/// Raw `/api/v1/crates/{name}/{version}` response
#[derive(Debug, Deserialize)]
struct CrateVersionResponse {
    version: CrateVersion,
}

/// crates.io adapter
#[derive(Debug, Clone)]
pub struct CratesIoProvider {
    http: HttpClient,
    cache: Option<Arc<QueryCache>>,
    base_url: String,
}

impl CratesIoProvider {
    pub fn new(http: HttpClient, cache: Option<Arc<QueryCache>>) -> Self {
        CratesIoProvider {
            http,
            cache,
            base_url: CRATES_IO_BASE_URL.to_string(),
        }
    }

    /// Search crates.io for crates matching `query`
    pub async fn search(&self, query: &str, limit: usize) -> ProviderResult<Vec<SearchResult>> {
        let limit = clamp_limit(limit);
        let key = CacheKey::search(Index::Crates, query, limit);
        if let Some(hit) = cache_lookup(&self.cache, &key) {
            return Ok(hit);
        }

        let url = format!("{}/api/v1/crates", self.base_url);
        let raw: CratesSearchResponse = self
            .http
            .get_json(
                Index::Crates,
                &url,
                &[("q", query.to_string()), ("per_page", limit.to_string())],
            )
            .await?;

        let results: Vec<SearchResult> = raw
            .crates
            .into_iter()
            .take(limit)
            .map(|krate| SearchResult {
                name: krate.name,
                version: krate.max_version.unwrap_or_default(),
                description: krate.description.unwrap_or_default(),
                downloads: krate.downloads,
                created_at: krate.created_at,
                updated_at: krate.updated_at,
                ..SearchResult::default()
            })
            .collect();

        cache_store(&self.cache, &key, &results);
        Ok(results)
    }

    /// Get details for `name`.
    ///
    /// The version sub-document is resolved in three explicit branches: a
    /// pinned version goes through a second call, a failed second call
    /// substitutes crate-level defaults, and an omitted version reuses the
    /// head of the embedded versions list without another request.
    pub async fn info(&self, name: &str, version: Option<&str>) -> ProviderResult<PackageInfo> {
        let key = CacheKey::info(Index::Crates, name, version);
        if let Some(hit) = cache_lookup(&self.cache, &key) {
            return Ok(hit);
        }

        let url = format!("{}/api/v1/crates/{name}", self.base_url);
        let raw: CrateResponse = self.http.get_json(Index::Crates, &url, &[]).await?;

        let detail = match version {
            Some(requested) => self.version_detail(name, requested).await?,
            None => match raw.versions.first() {
                Some(latest) => latest.clone(),
                None => CrateVersion {
                    num: raw.krate.max_version.clone().unwrap_or_default(),
                    yanked: false,
                    license: None,
                },
            },
        };

        let info = PackageInfo {
            name: raw.krate.name,
            version: detail.num,
            description: raw.krate.description.unwrap_or_default(),
            homepage: raw.krate.homepage,
            documentation: raw.krate.documentation,
            repository: raw.krate.repository,
            downloads: raw.krate.downloads,
            recent_downloads: raw.krate.recent_downloads,
            categories: Some(raw.categories.into_iter().map(|c| c.slug).collect()),
            keywords: Some(raw.keywords.into_iter().map(|k| k.id).collect()),
            license: detail.license,
            yanked: Some(detail.yanked),
            versions: Some(raw.versions.into_iter().map(|v| v.num).collect()),
            ..PackageInfo::default()
        };

        cache_store(&self.cache, &key, &info);
        Ok(info)
    }

    /// Fetch one version's detail, substituting crate-level defaults when
    /// the upstream answers badly. Parse failures still propagate; a
    /// malformed body is never silently swallowed.
    async fn version_detail(&self, name: &str, requested: &str) -> ProviderResult<CrateVersion> {
        let url = format!("{}/api/v1/crates/{name}/{requested}", self.base_url);
        match self
            .http
            .get_json::<CrateVersionResponse>(Index::Crates, &url, &[])
            .await
        {
            Ok(response) => Ok(response.version),
            Err(PacratError::UpstreamStatus { .. }) | Err(PacratError::Network { .. }) => {
                Ok(CrateVersion {
                    num: requested.to_string(),
                    yanked: false,
                    license: None,
                })
            }
            Err(other) => Err(other),
        }
    }
}
