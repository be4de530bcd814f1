//! Cache hot-path benchmarks

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pacrat_cache::{CacheKey, QueryCache};
use pacrat_core::Index;
use serde_json::json;

fn bench_get_hit(c: &mut Criterion) {
    let cache = QueryCache::new(1024, Duration::from_secs(3600));
    for i in 0..1024 {
        cache.put(
            CacheKey::search(Index::Crates, &format!("query-{i}"), 5),
            json!({"name": format!("crate-{i}"), "version": "1.0.0"}),
        );
    }
    let key = CacheKey::search(Index::Crates, "query-512", 5);

    c.bench_function("cache_get_hit", |b| {
        b.iter(|| black_box(cache.get(black_box(&key))));
    });
}

fn bench_put_with_eviction(c: &mut Criterion) {
    let cache = QueryCache::new(256, Duration::from_secs(3600));
    let mut i = 0u64;

    c.bench_function("cache_put_evicting", |b| {
        b.iter(|| {
            i += 1;
            cache.put(
                CacheKey::search(Index::Npm, &format!("query-{i}"), 5),
                json!({"seq": i}),
            );
        });
    });
}

criterion_group!(benches, bench_get_hit, bench_put_with_eviction);
criterion_main!(benches);
