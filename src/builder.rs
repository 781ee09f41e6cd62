use std::hash::Hash;
use std::sync::Arc;

use crate::cache::Cache;
use crate::policy::PolicyKind;
use crate::stats::StatsSink;

/// Number of entries a cache admits when no capacity is configured.
pub const DEFAULT_CAPACITY: u64 = 1024;

/// Builder for configuring and constructing a [`Cache`].
///
/// # Example
/// ```
/// use lookaside::{Cache, CacheBuilder, PolicyKind};
///
/// let cache: Cache<u64, String> = CacheBuilder::new()
///     .capacity(4096)
///     .policy(PolicyKind::Lfu)
///     .build();
/// assert_eq!(cache.capacity(), 4096);
/// ```
pub struct CacheBuilder {
    capacity: u64,
    policy: PolicyKind,
    stats: Option<Arc<dyn StatsSink>>,
}

impl CacheBuilder {
    pub fn new() -> Self {
        CacheBuilder {
            capacity: DEFAULT_CAPACITY,
            policy: PolicyKind::default(),
            stats: None,
        }
    }

    /// Set the maximum number of resident entries (default: 1024).
    ///
    /// A zero capacity is rejected when the cache is built.
    pub fn capacity(mut self, capacity: u64) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the eviction policy (default: [`PolicyKind::Lfu`], or
    /// [`PolicyKind::Lru`] when the `lru-default` feature is enabled).
    pub fn policy(mut self, policy: PolicyKind) -> Self {
        self.policy = policy;
        self
    }

    /// Register a statistics sink.
    ///
    /// The cache reports one tick per hit, miss and eviction. Without a
    /// sink no accounting happens at all.
    pub fn stats_sink(mut self, sink: Arc<dyn StatsSink>) -> Self {
        self.stats = Some(sink);
        self
    }

    /// Builds the cache.
    ///
    /// # Panics
    ///
    /// Panics if the configured capacity is zero.
    pub fn build<K, V>(self) -> Cache<K, V>
    where
        K: Hash + Eq + Clone,
    {
        Cache::with_options(self.capacity, self.policy, self.stats)
    }
}

impl Default for CacheBuilder {
    fn default() -> Self {
        Self::new()
    }
}
