//! Throughput benchmarks: lookaside (LFU and LRU) vs Moka vs QuickCache.
//!
//! Every group runs one workload against each cache in turn, so the
//! criterion reports line up side by side. The comparison is not entirely
//! apples-to-apples — lookaside is unsynchronized while the others carry
//! their concurrency machinery — but it bounds the single-thread cost.
//!
//! Run with:
//!     cargo bench --bench throughput

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use lookaside::{Cache, CacheBuilder, PolicyKind};
use moka::sync::Cache as MokaCache;
use quick_cache::sync::Cache as QuickCache;

/// Capacity of every cache under test; the read groups pre-fill to this size.
const CAP: u64 = 10_000;

/// Length of the hot loop inside one criterion iteration.
const OPS: u64 = 1_000;

fn lookaside_cache(policy: PolicyKind) -> Cache<u64, u64> {
    CacheBuilder::new().capacity(CAP).policy(policy).build()
}

// ---------------------------------------------------------------------------
// Group 1: get_hit
// ---------------------------------------------------------------------------
// Every probed key is resident, which isolates the read path: one index
// probe plus the policy's access bookkeeping, never an eviction.

fn bench_get_hit(c: &mut Criterion) {
    let mut lfu = lookaside_cache(PolicyKind::Lfu);
    let mut lru = lookaside_cache(PolicyKind::Lru);
    for i in 0..CAP {
        lfu.insert(i, i * 2);
        lru.insert(i, i * 2);
    }

    let moka: MokaCache<u64, u64> = MokaCache::new(CAP);
    for i in 0..CAP {
        moka.insert(i, i * 2);
    }

    let qc: QuickCache<u64, u64> = QuickCache::new(CAP as usize);
    for i in 0..CAP {
        qc.insert(i, i * 2);
    }

    let mut group = c.benchmark_group("get_hit");
    group.throughput(Throughput::Elements(OPS));

    group.bench_function("lookaside_lfu", |b| {
        b.iter(|| {
            for i in 0..OPS {
                black_box(lfu.get(black_box(&i)));
            }
        })
    });

    group.bench_function("lookaside_lru", |b| {
        b.iter(|| {
            for i in 0..OPS {
                black_box(lru.get(black_box(&i)));
            }
        })
    });

    group.bench_function("moka", |b| {
        b.iter(|| {
            for i in 0..OPS {
                black_box(moka.get(black_box(&i)));
            }
        })
    });

    group.bench_function("quick_cache", |b| {
        b.iter(|| {
            for i in 0..OPS {
                black_box(qc.get(black_box(&i)));
            }
        })
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Group 2: insert_evicting
// ---------------------------------------------------------------------------
// Sequential inserts of always-new keys — the cache must evict on every
// admission to stay within capacity.

fn bench_insert_evicting(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_evicting");
    group.throughput(Throughput::Elements(OPS));

    group.bench_function("lookaside_lfu", |b| {
        let mut cache = lookaside_cache(PolicyKind::Lfu);
        let mut key = 0u64;
        b.iter(|| {
            for _ in 0..OPS {
                cache.insert(black_box(key), black_box(key));
                key = key.wrapping_add(1);
            }
        })
    });

    group.bench_function("lookaside_lru", |b| {
        let mut cache = lookaside_cache(PolicyKind::Lru);
        let mut key = 0u64;
        b.iter(|| {
            for _ in 0..OPS {
                cache.insert(black_box(key), black_box(key));
                key = key.wrapping_add(1);
            }
        })
    });

    group.bench_function("moka", |b| {
        let cache: MokaCache<u64, u64> = MokaCache::new(CAP);
        let mut key = 0u64;
        b.iter(|| {
            for _ in 0..OPS {
                cache.insert(black_box(key), black_box(key));
                key = key.wrapping_add(1);
            }
        })
    });

    group.bench_function("quick_cache", |b| {
        let cache: QuickCache<u64, u64> = QuickCache::new(CAP as usize);
        let mut key = 0u64;
        b.iter(|| {
            for _ in 0..OPS {
                cache.insert(black_box(key), black_box(key));
                key = key.wrapping_add(1);
            }
        })
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Group 3: mixed_80r_20w
// ---------------------------------------------------------------------------
// Four reads per write over a working set twice the capacity, so admissions
// keep evicting throughout. A prime stride scatters the key sequence.

fn bench_mixed_80r_20w(c: &mut Criterion) {
    const WORKING_SET: u64 = CAP * 2;
    const STEP: u64 = 7_919; // prime

    let mut group = c.benchmark_group("mixed_80r_20w");
    group.throughput(Throughput::Elements(OPS));

    group.bench_function("lookaside_lfu", |b| {
        let mut cache = lookaside_cache(PolicyKind::Lfu);
        for i in 0..CAP {
            cache.insert(i, i);
        }
        let mut cursor = 0u64;
        b.iter(|| {
            for i in 0..OPS {
                let key = cursor % WORKING_SET;
                if i % 5 == 0 {
                    cache.update(black_box(key), black_box(key));
                } else {
                    black_box(cache.get(black_box(&key)));
                }
                cursor = cursor.wrapping_add(STEP);
            }
        })
    });

    group.bench_function("lookaside_lru", |b| {
        let mut cache = lookaside_cache(PolicyKind::Lru);
        for i in 0..CAP {
            cache.insert(i, i);
        }
        let mut cursor = 0u64;
        b.iter(|| {
            for i in 0..OPS {
                let key = cursor % WORKING_SET;
                if i % 5 == 0 {
                    cache.update(black_box(key), black_box(key));
                } else {
                    black_box(cache.get(black_box(&key)));
                }
                cursor = cursor.wrapping_add(STEP);
            }
        })
    });

    group.bench_function("moka", |b| {
        let cache: MokaCache<u64, u64> = MokaCache::new(CAP);
        for i in 0..CAP {
            cache.insert(i, i);
        }
        let mut cursor = 0u64;
        b.iter(|| {
            for i in 0..OPS {
                let key = cursor % WORKING_SET;
                if i % 5 == 0 {
                    cache.insert(black_box(key), black_box(key));
                } else {
                    black_box(cache.get(black_box(&key)));
                }
                cursor = cursor.wrapping_add(STEP);
            }
        })
    });

    group.bench_function("quick_cache", |b| {
        let cache: QuickCache<u64, u64> = QuickCache::new(CAP as usize);
        for i in 0..CAP {
            cache.insert(i, i);
        }
        let mut cursor = 0u64;
        b.iter(|| {
            for i in 0..OPS {
                let key = cursor % WORKING_SET;
                if i % 5 == 0 {
                    cache.insert(black_box(key), black_box(key));
                } else {
                    black_box(cache.get(black_box(&key)));
                }
                cursor = cursor.wrapping_add(STEP);
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_get_hit, bench_insert_evicting, bench_mixed_80r_20w);
criterion_main!(benches);
