//! Unit tests for cache key canonicalization

use pacrat_core::Index;

use super::*;

#[test]
fn identical_requests_render_identical_keys() {
    let a = CacheKey::search(Index::Npm, "express", 5);
    let b = CacheKey::search(Index::Npm, "express", 5);
    assert_eq!(a, b);
    assert_eq!(a.as_str(), "search:npm:express:5");
}

#[test]
fn limit_is_part_of_the_key() {
    let five = CacheKey::search(Index::Crates, "serde", 5);
    let ten = CacheKey::search(Index::Crates, "serde", 10);
    assert_ne!(five, ten);
}

#[test]
fn absent_version_differs_from_every_literal_version() {
    let latest = CacheKey::info(Index::Pypi, "requests", None);
    let pinned = CacheKey::info(Index::Pypi, "requests", Some("2.31.0"));
    assert_ne!(latest, pinned);
    assert_eq!(latest.as_str(), "info:pypi:requests:@latest");
}

#[test]
fn operations_never_collide_across_kinds() {
    let search = CacheKey::search(Index::Docker, "nginx", 5);
    let tags = CacheKey::docker_tags("nginx");
    let tag_info = CacheKey::docker_tag_info("nginx", "latest");
    assert_ne!(search.as_str(), tags.as_str());
    assert_ne!(tags.as_str(), tag_info.as_str());
}

#[test]
fn docker_keys_embed_the_qualified_name() {
    assert_eq!(
        CacheKey::docker_tag_info("bitnami/nginx", "1.25").as_str(),
        "tag-info:docker:bitnami/nginx:1.25"
    );
}
