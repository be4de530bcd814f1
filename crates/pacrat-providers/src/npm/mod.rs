//! npm provider adapter.
//!
//! Search uses the registry's `/-/v1/search` endpoint. Info fetches either
//! a version-scoped document directly, or the full packument, resolving the
//! `dist-tags.latest` alias to its concrete version before flattening.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Deserialize;

use pacrat_cache::{CacheKey, QueryCache};
use pacrat_core::{Index, PackageInfo, PacratError, SearchResult};

use crate::client::HttpClient;
use crate::{cache_lookup, cache_store, clamp_limit, ProviderResult};

const NPM_BASE_URL: &str = "https://registry.npmjs.org";

/// Raw `/-/v1/search` response
#[derive(Debug, Deserialize)]
struct NpmSearchResponse {
    #[serde(default)]
    objects: Vec<NpmSearchObject>,
}

#[derive(Debug, Deserialize)]
struct NpmSearchObject {
    package: NpmSearchPackage,
}

#[derive(Debug, Deserialize)]
struct NpmSearchPackage {
    name: String,
    version: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    publisher: Option<NpmPublisher>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    links: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Deserialize)]
struct NpmPublisher {
    #[serde(default)]
    username: Option<String>,
}

/// Raw full packument; `versions` values stay as JSON until one is selected
#[derive(Debug, Deserialize)]
struct NpmPackument {
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "dist-tags", default)]
    dist_tags: BTreeMap<String, String>,
    #[serde(default)]
    versions: serde_json::Map<String, serde_json::Value>,
}

/// Raw version-scoped document (also the shape of a packument sub-document)
#[derive(Debug, Deserialize)]
struct NpmVersionDoc {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    author: Option<NpmAuthor>,
    #[serde(default)]
    homepage: Option<String>,
    #[serde(default)]
    license: Option<NpmLicense>,
    #[serde(default)]
    dependencies: Option<BTreeMap<String, String>>,
}

/// npm authors are either a plain string or an object with a name
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NpmAuthor {
    Name(String),
    Detailed {
        #[serde(default)]
        name: Option<String>,
    },
}

impl NpmAuthor {
    fn into_name(self) -> Option<String> {
        match self {
            NpmAuthor::Name(name) => Some(name),
            NpmAuthor::Detailed { name } => name,
        }
    }
}

/// Old packages publish licenses as `{"type": "..."}` objects
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NpmLicense {
    Spdx(String),
    Detailed {
        #[serde(rename = "type", default)]
        kind: Option<String>,
    },
}

impl NpmLicense {
    fn into_spdx(self) -> Option<String> {
        match self {
            NpmLicense::Spdx(spdx) => Some(spdx),
            NpmLicense::Detailed { kind } => kind,
        }
    }
}

/// npm registry adapter
#[derive(Debug, Clone)]
pub struct NpmProvider {
    http: HttpClient,
    cache: Option<Arc<QueryCache>>,
    base_url: String,
}

impl NpmProvider {
    pub fn new(http: HttpClient, cache: Option<Arc<QueryCache>>) -> Self {
        NpmProvider {
            http,
            cache,
            base_url: NPM_BASE_URL.to_string(),
        }
    }

    /// Search npm for packages matching `query`
    pub async fn search(&self, query: &str, limit: usize) -> ProviderResult<Vec<SearchResult>> {
        let limit = clamp_limit(limit);
        let key = CacheKey::search(Index::Npm, query, limit);
        if let Some(hit) = cache_lookup(&self.cache, &key) {
            return Ok(hit);
        }

        let url = format!("{}/-/v1/search", self.base_url);
        let raw: NpmSearchResponse = self
            .http
            .get_json(
                Index::Npm,
                &url,
                &[("text", query.to_string()), ("size", limit.to_string())],
            )
            .await?;

        let results: Vec<SearchResult> = raw
            .objects
            .into_iter()
            .take(limit)
            .map(|object| SearchResult {
                name: object.package.name,
                version: object.package.version,
                description: object.package.description.unwrap_or_default(),
                publisher: object.package.publisher.and_then(|p| p.username),
                date: object.package.date,
                links: object.package.links,
                ..SearchResult::default()
            })
            .collect();

        cache_store(&self.cache, &key, &results);
        Ok(results)
    }

    /// Get details for `name`.
    ///
    /// With a version, the registry answers with a flat version-scoped
    /// document. Without one, the full packument is fetched and the
    /// `dist-tags.latest` alias resolved to its concrete version, so the
    /// returned `version` is never the literal `"latest"`.
    pub async fn info(&self, name: &str, version: Option<&str>) -> ProviderResult<PackageInfo> {
        let key = CacheKey::info(Index::Npm, name, version);
        if let Some(hit) = cache_lookup(&self.cache, &key) {
            return Ok(hit);
        }

        let encoded = encode_package_name(name);
        let info = match version {
            Some(version) => {
                let url = format!("{}/{encoded}/{version}", self.base_url);
                let doc: NpmVersionDoc = self.http.get_json(Index::Npm, &url, &[]).await?;
                flatten_version_doc(doc, name, version, None)
            }
            None => {
                let url = format!("{}/{encoded}", self.base_url);
                let packument: NpmPackument = self.http.get_json(Index::Npm, &url, &[]).await?;
                resolve_latest(packument, name)?
            }
        };

        cache_store(&self.cache, &key, &info);
        Ok(info)
    }
}

/// Scoped package names keep their `@` but percent-encode the separator
/// (`@types/node` -> `@types%2fnode`)
fn encode_package_name(name: &str) -> String {
    if name.starts_with('@') {
        name.replace('/', "%2f")
    } else {
        name.to_string()
    }
}

fn flatten_version_doc(
    doc: NpmVersionDoc,
    fallback_name: &str,
    fallback_version: &str,
    versions: Option<Vec<String>>,
) -> PackageInfo {
    PackageInfo {
        name: doc.name.unwrap_or_else(|| fallback_name.to_string()),
        version: doc
            .version
            .unwrap_or_else(|| fallback_version.to_string()),
        description: doc.description.unwrap_or_default(),
        author: doc.author.and_then(NpmAuthor::into_name),
        homepage: doc.homepage,
        license: doc.license.and_then(NpmLicense::into_spdx),
        dependencies: doc.dependencies,
        versions,
        ..PackageInfo::default()
    }
}

/// Select the `dist-tags.latest` sub-document and flatten it, keeping the
/// parent's full version enumeration in its published order.
fn resolve_latest(packument: NpmPackument, requested_name: &str) -> ProviderResult<PackageInfo> {
    let latest = packument
        .dist_tags
        .get("latest")
        .cloned()
        .ok_or_else(|| PacratError::parse(Index::Npm, "packument has no dist-tags.latest"))?;

    let subdoc = packument.versions.get(&latest).cloned().ok_or_else(|| {
        PacratError::parse(
            Index::Npm,
            format!("dist-tags.latest points at missing version {latest}"),
        )
    })?;
    let doc: NpmVersionDoc = serde_json::from_value(subdoc)
        .map_err(|e| PacratError::parse(Index::Npm, e.to_string()))?;

    let versions: Vec<String> = packument.versions.keys().cloned().collect();
    let mut info = flatten_version_doc(doc, requested_name, &latest, Some(versions));
    if let Some(name) = packument.name {
        info.name = name;
    }
    info.version = latest;
    Ok(info)
}
