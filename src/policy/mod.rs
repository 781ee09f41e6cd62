pub mod lfu;
pub mod lru;

use lfu::LfuPolicy;
use lru::LruPolicy;

/// Which eviction policy a cache uses, chosen at construction time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolicyKind {
    /// Least-frequently-used: evicts the key with the fewest recorded
    /// accesses, breaking ties by arrival order in the minimum bucket.
    Lfu,
    /// Least-recently-used: evicts the key whose last touch is oldest.
    Lru,
}

impl Default for PolicyKind {
    /// `Lfu`, unless the `lru-default` feature flips it.
    fn default() -> Self {
        if cfg!(feature = "lru-default") {
            PolicyKind::Lru
        } else {
            PolicyKind::Lfu
        }
    }
}

/// Opaque handle to a policy ordering node.
///
/// Returned by [`Policy::mark_insertion`] and stored in the cache entry;
/// the cache hands it back on access and removal but never looks inside it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct NodeId(usize);

impl NodeId {
    #[inline]
    fn index(self) -> usize {
        self.0
    }
}

/// The eviction policy behind a cache.
///
/// With exactly two implementations, a tagged enum beats a boxed trait
/// object: call sites dispatch statically and the policy lives inline in
/// the cache. Every method is O(1) amortized.
pub(crate) enum Policy<K> {
    Lfu(LfuPolicy<K>),
    Lru(LruPolicy<K>),
}

impl<K: Eq> Policy<K> {
    pub(crate) fn new(kind: PolicyKind) -> Self {
        match kind {
            PolicyKind::Lfu => Policy::Lfu(LfuPolicy::new()),
            PolicyKind::Lru => Policy::Lru(LruPolicy::new()),
        }
    }

    pub(crate) fn kind(&self) -> PolicyKind {
        match self {
            Policy::Lfu(_) => PolicyKind::Lfu,
            Policy::Lru(_) => PolicyKind::Lru,
        }
    }

    /// Starts tracking `key`; returns the handle the entry must carry.
    pub(crate) fn mark_insertion(&mut self, key: K) -> NodeId {
        match self {
            Policy::Lfu(p) => p.mark_insertion(key),
            Policy::Lru(p) => p.mark_insertion(key),
        }
    }

    /// Records an access to the key behind `handle`.
    pub(crate) fn mark_access(&mut self, key: &K, handle: NodeId) {
        match self {
            Policy::Lfu(p) => p.mark_access(key, handle),
            Policy::Lru(p) => p.mark_access(key, handle),
        }
    }

    /// Picks and removes the eviction victim.
    ///
    /// `None` when nothing is tracked (only reachable on an empty cache).
    pub(crate) fn evict(&mut self) -> Option<K> {
        match self {
            Policy::Lfu(p) => p.evict(),
            Policy::Lru(p) => p.evict(),
        }
    }

    /// Removes the specific key behind `handle` and returns it.
    pub(crate) fn evict_entry(&mut self, handle: NodeId) -> Option<K> {
        match self {
            Policy::Lfu(p) => p.evict_entry(handle),
            Policy::Lru(p) => p.evict_entry(handle),
        }
    }

    /// Number of keys currently tracked.
    pub(crate) fn len(&self) -> usize {
        match self {
            Policy::Lfu(p) => p.len(),
            Policy::Lru(p) => p.len(),
        }
    }
}
