//! Hit-rate comparison: lookaside LFU / lookaside LRU / Moka / QuickCache.
//!
//! Replays one Zipf(s=1.0) access trace — the standard rank-frequency
//! workload for cache studies — against every cache in look-aside mode:
//! a miss is followed by an insert of the missing key.
//!
//! Run with:
//!     cargo run --example hit_rate --release

use std::time::{Duration, Instant};

use lookaside::{Cache, CacheBuilder, PolicyKind};
use moka::sync::Cache as MokaCache;
use quick_cache::sync::Cache as QuickCache;

/// Entries each cache may hold.
const CAP: usize = 10_000;
/// Distinct keys in the trace; ten times the capacity, so the working set
/// never fits and the policies have to earn their hit rate.
const POOL: usize = 100_000;
/// Accesses replayed against each cache.
const TRACE: usize = 500_000;

// ---------------------------------------------------------------------------
// Zipf(s=1.0) trace generation.
//
// At s = 1 the rank CDF is close to harmonic, F(r) ≈ ln(r) / ln(N), so
// inverting a uniform draw u gives rank exp(u · ln N). That yields the
// classic 1/r rank-frequency curve without any table precomputation.
// ---------------------------------------------------------------------------

/// SplitMix64 — tiny, seedable, and plenty for workload generation.
struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    fn new(seed: u64) -> Self {
        SplitMix64 { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut word = self.state;
        word = (word ^ (word >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        word = (word ^ (word >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        word ^ (word >> 31)
    }

    /// Uniform draw in (0, 1].
    fn next_unit(&mut self) -> f64 {
        // 53 high bits fill an f64 mantissa exactly; the +1 excludes zero.
        ((self.next_u64() >> 11) + 1) as f64 * (1.0 / (1u64 << 53) as f64)
    }
}

fn zipf_trace(seed: u64, universe: usize, len: usize) -> Vec<u64> {
    let mut rng = SplitMix64::new(seed);
    let ln_n = (universe as f64).ln();
    (0..len)
        .map(|_| {
            let rank = (rng.next_unit() * ln_n).exp() as usize;
            (rank.clamp(1, universe) - 1) as u64
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Per-cache runners
// ---------------------------------------------------------------------------

fn run_lookaside(policy: PolicyKind, trace: &[u64]) -> (usize, Duration) {
    let mut cache: Cache<u64, u64> = CacheBuilder::new()
        .capacity(CAP as u64)
        .policy(policy)
        .build();
    let start = Instant::now();
    let mut hits = 0usize;
    for &key in trace {
        if cache.get(&key).is_some() {
            hits += 1;
        } else {
            cache.insert(key, key);
        }
    }
    (hits, start.elapsed())
}

fn run_moka(trace: &[u64]) -> (usize, Duration) {
    let cache: MokaCache<u64, u64> = MokaCache::new(CAP as u64);
    let start = Instant::now();
    let mut hits = 0usize;
    for &key in trace {
        if cache.get(&key).is_some() {
            hits += 1;
        } else {
            cache.insert(key, key);
        }
    }
    (hits, start.elapsed())
}

fn run_quick_cache(trace: &[u64]) -> (usize, Duration) {
    let cache: QuickCache<u64, u64> = QuickCache::new(CAP);
    let start = Instant::now();
    let mut hits = 0usize;
    for &key in trace {
        if cache.get(&key).is_some() {
            hits += 1;
        } else {
            cache.insert(key, key);
        }
    }
    (hits, start.elapsed())
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() {
    println!("lookaside — hit-rate comparison");
    println!();
    println!("  Distribution : Zipf(s = 1.0)");
    println!("  Key universe : {POOL} unique keys");
    println!(
        "  Capacity     : {CAP} entries ({:.0}% of universe)",
        CAP as f64 / POOL as f64 * 100.0
    );
    println!("  Trace length : {TRACE} accesses");
    println!();

    let trace = zipf_trace(42, POOL, TRACE);

    println!("{:<16} {:>10} {:>10} {:>12}", "Cache", "Hits", "Hit Rate", "Time (ms)");
    println!("{}", "-".repeat(52));

    let print_row = |name: &str, hits: usize, elapsed: Duration| {
        println!(
            "{:<16} {:>10} {:>9.2}% {:>12.1}",
            name,
            hits,
            hits as f64 / TRACE as f64 * 100.0,
            elapsed.as_millis(),
        );
    };

    let (hits, elapsed) = run_lookaside(PolicyKind::Lfu, &trace);
    print_row("lookaside_lfu", hits, elapsed);

    let (hits, elapsed) = run_lookaside(PolicyKind::Lru, &trace);
    print_row("lookaside_lru", hits, elapsed);

    let (hits, elapsed) = run_moka(&trace);
    print_row("moka", hits, elapsed);

    let (hits, elapsed) = run_quick_cache(&trace);
    print_row("quick_cache", hits, elapsed);

    println!();
    println!("Caches start cold; a miss inserts the key, so hit rate is measured");
    println!("online from the first access. Time includes the miss-path inserts.");
}
