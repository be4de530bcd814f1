//! PyPI provider adapter.
//!
//! Package info uses PyPI's JSON API. PyPI exposes no JSON search endpoint,
//! so search fetches the HTML results page and extracts the
//! `package-snippet` fields with precompiled regexes.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use pacrat_cache::{CacheKey, QueryCache};
use pacrat_core::{Index, PackageInfo, PacratError, SearchResult};

use crate::client::HttpClient;
use crate::{cache_lookup, cache_store, clamp_limit, ProviderResult};

const PYPI_BASE_URL: &str = "https://pypi.org";

/// Raw `/pypi/{name}/json` response
#[derive(Debug, Deserialize)]
struct PypiResponse {
    info: PypiInfo,
    /// Version string -> release files; only the keys matter here
    #[serde(default)]
    releases: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct PypiInfo {
    name: String,
    version: String,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    home_page: Option<String>,
    #[serde(default)]
    license: Option<String>,
}

static SNIPPET_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"package-snippet__name">([^<]+)</span>"#).expect("literal pattern")
});
static SNIPPET_VERSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"package-snippet__version">([^<]+)</span>"#).expect("literal pattern")
});
static SNIPPET_DESCRIPTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"package-snippet__description">([^<]*)</p>"#).expect("literal pattern")
});

/// PyPI adapter
#[derive(Debug, Clone)]
pub struct PypiProvider {
    http: HttpClient,
    cache: Option<Arc<QueryCache>>,
    base_url: String,
}

impl PypiProvider {
    pub fn new(http: HttpClient, cache: Option<Arc<QueryCache>>) -> Self {
        PypiProvider {
            http,
            cache,
            base_url: PYPI_BASE_URL.to_string(),
        }
    }

    /// Search PyPI for packages matching `query`.
    ///
    /// Fetches the HTML results page; rows come back in PyPI's own order,
    /// truncated to `limit`.
    pub async fn search(&self, query: &str, limit: usize) -> ProviderResult<Vec<SearchResult>> {
        let limit = clamp_limit(limit);
        let key = CacheKey::search(Index::Pypi, query, limit);
        if let Some(hit) = cache_lookup(&self.cache, &key) {
            return Ok(hit);
        }

        let url = format!("{}/search/", self.base_url);
        let page = self
            .http
            .get_text(
                Index::Pypi,
                &url,
                &[("q", query.to_string()), ("page", "1".to_string())],
            )
            .await?;

        let results = parse_search_page(&page, limit)?;

        cache_store(&self.cache, &key, &results);
        Ok(results)
    }

    /// Get details for `name`, version-specific when `version` is given.
    pub async fn info(&self, name: &str, version: Option<&str>) -> ProviderResult<PackageInfo> {
        let key = CacheKey::info(Index::Pypi, name, version);
        if let Some(hit) = cache_lookup(&self.cache, &key) {
            return Ok(hit);
        }

        let url = match version {
            Some(version) => format!("{}/pypi/{name}/{version}/json", self.base_url),
            None => format!("{}/pypi/{name}/json", self.base_url),
        };
        let raw: PypiResponse = self.http.get_json(Index::Pypi, &url, &[]).await?;

        let info = PackageInfo {
            name: raw.info.name,
            version: raw.info.version,
            description: raw.info.summary.unwrap_or_default(),
            author: raw.info.author,
            homepage: raw.info.home_page,
            license: raw.info.license,
            versions: Some(raw.releases.keys().cloned().collect()),
            ..PackageInfo::default()
        };

        cache_store(&self.cache, &key, &info);
        Ok(info)
    }
}

/// Extract search rows from PyPI's HTML results page.
///
/// A page without any `package-snippet` marker is a legitimate empty
/// result. A marker whose name or version cannot be extracted means the
/// markup changed shape, which surfaces as a parse failure rather than
/// fabricated rows.
fn parse_search_page(page: &str, limit: usize) -> ProviderResult<Vec<SearchResult>> {
    let mut results = Vec::new();
    for chunk in page.split("class=\"package-snippet\"").skip(1) {
        let name = SNIPPET_NAME.captures(chunk).map(|c| c[1].trim().to_string());
        let version = SNIPPET_VERSION
            .captures(chunk)
            .map(|c| c[1].trim().to_string());
        let (name, version) = match (name, version) {
            (Some(name), Some(version)) => (name, version),
            _ => {
                return Err(PacratError::parse(
                    Index::Pypi,
                    "search result snippet is missing its name or version",
                ))
            }
        };
        let description = SNIPPET_DESCRIPTION
            .captures(chunk)
            .map(|c| c[1].trim().to_string())
            .unwrap_or_default();

        results.push(SearchResult {
            name,
            version,
            description,
            ..SearchResult::default()
        });
        if results.len() == limit {
            break;
        }
    }
    Ok(results)
}

#[cfg(test)]
mod tests;
