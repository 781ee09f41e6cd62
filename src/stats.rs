//! Hit/miss/eviction accounting.
//!
//! The cache does not own its statistics: it borrows an opaque sink and
//! reports one tick per observable event. Hosts that do not care pass no
//! sink at all, which suppresses accounting entirely.

use std::sync::atomic::{AtomicU64, Ordering};

// ---------------------------------------------------------------------------
// TickEvent
// ---------------------------------------------------------------------------

/// One observable cache event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickEvent {
    /// A lookup (or a presence probe) found the key resident.
    Hit,
    /// A lookup found the key absent.
    Miss,
    /// An entry was dropped to make room for a new key.
    Eviction,
}

// ---------------------------------------------------------------------------
// StatsSink trait
// ---------------------------------------------------------------------------

/// A collaborator that receives one call per cache event.
///
/// The cache holds the sink behind an [`Arc`](std::sync::Arc) and calls it
/// synchronously from inside its operations, so implementations should be
/// cheap — a counter bump, not I/O.
pub trait StatsSink: Send + Sync + 'static {
    fn record_tick(&self, event: TickEvent);
}

// ---------------------------------------------------------------------------
// StatsCounter
// ---------------------------------------------------------------------------

/// A ready-made [`StatsSink`] backed by atomic counters.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use lookaside::{Cache, CacheBuilder, StatsCounter};
///
/// let stats = Arc::new(StatsCounter::new());
/// let mut cache: Cache<u64, u64> = CacheBuilder::new()
///     .capacity(10)
///     .stats_sink(stats.clone())
///     .build();
///
/// cache.insert(1, 1);
/// cache.get(&1);
/// cache.get(&2);
///
/// let m = stats.snapshot();
/// assert_eq!((m.hits, m.misses), (1, 1));
/// ```
pub struct StatsCounter {
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl StatsCounter {
    pub fn new() -> Self {
        StatsCounter {
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    /// Returns a point-in-time snapshot of the counters.
    pub fn snapshot(&self) -> Metrics {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let evictions = self.evictions.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total == 0 {
            0.0_f64
        } else {
            hits as f64 / total as f64
        };
        Metrics {
            hits,
            misses,
            evictions,
            hit_rate,
        }
    }
}

impl StatsSink for StatsCounter {
    #[inline]
    fn record_tick(&self, event: TickEvent) {
        let counter = match event {
            TickEvent::Hit => &self.hits,
            TickEvent::Miss => &self.misses,
            TickEvent::Eviction => &self.evictions,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

impl Default for StatsCounter {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

/// A point-in-time snapshot of cache statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    /// Number of cache hits (key found).
    pub hits: u64,
    /// Number of cache misses (key not found).
    pub misses: u64,
    /// Number of entries evicted due to capacity pressure.
    pub evictions: u64,
    /// `hits / (hits + misses)`, or `0.0` if no requests have been made.
    pub hit_rate: f64,
}

impl Metrics {
    pub fn request_count(&self) -> u64 {
        self.hits + self.misses
    }
}
