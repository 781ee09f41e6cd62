use std::hash::Hash;
use std::sync::Arc;

use ahash::AHashMap;

use crate::builder::{CacheBuilder, DEFAULT_CAPACITY};
use crate::policy::{NodeId, Policy, PolicyKind};
use crate::stats::{StatsSink, TickEvent};

// ---------------------------------------------------------------------------
// CacheEntry
// ---------------------------------------------------------------------------

/// The unit stored in the hash index.
///
/// Besides the owned value, each entry carries an opaque back-link into the
/// policy's ordering structure. The policy issues it when the entry is
/// admitted and is the only layer that interprets it; the cache just stores
/// it and hands it back on access and removal. Since admission and binding
/// happen together, an entry without a handle cannot exist.
struct CacheEntry<V> {
    value: V,
    node: NodeId,
}

// ---------------------------------------------------------------------------
// Cache
// ---------------------------------------------------------------------------

/// A fixed-capacity, in-memory, look-aside key/value cache.
///
/// The cache is consulted before a more expensive lookup: a miss tells the
/// host to compute the value and [`insert`](Cache::insert) it, a hit returns
/// the cached value and records the access with the eviction policy. When
/// the index is full, the policy picks the victim in O(1).
///
/// All operations are synchronous and unsynchronized; callers that share a
/// cache across threads must serialize access externally.
///
/// # Example
/// ```
/// use lookaside::{Cache, CacheBuilder, PolicyKind};
///
/// let mut cache: Cache<String, String> = CacheBuilder::new()
///     .capacity(100)
///     .policy(PolicyKind::Lru)
///     .build();
/// cache.insert("hello".to_string(), "world".to_string());
/// assert_eq!(cache.get(&"hello".to_string()), Some(&"world".to_string()));
/// ```
pub struct Cache<K, V> {
    index: AHashMap<K, CacheEntry<V>>,
    policy: Policy<K>,
    /// Maximum number of resident entries. Always at least 1.
    capacity: u64,
    /// `None` suppresses accounting.
    stats: Option<Arc<dyn StatsSink>>,
}

impl<K, V> Cache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Creates a cache with the default capacity ([`DEFAULT_CAPACITY`])
    /// and the default eviction policy.
    pub fn new() -> Self {
        Self::with_options(DEFAULT_CAPACITY, PolicyKind::default(), None)
    }

    /// Creates a cache holding at most `capacity` entries under the default
    /// eviction policy.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_capacity(capacity: u64) -> Self {
        Self::with_options(capacity, PolicyKind::default(), None)
    }

    /// Returns a [`CacheBuilder`] for configuring a new cache.
    pub fn builder() -> CacheBuilder {
        CacheBuilder::new()
    }

    pub(crate) fn with_options(
        capacity: u64,
        policy: PolicyKind,
        stats: Option<Arc<dyn StatsSink>>,
    ) -> Self {
        assert!(capacity > 0, "capacity must be greater than 0");
        Cache {
            index: AHashMap::with_capacity(capacity as usize),
            policy: Policy::new(policy),
            capacity,
            stats,
        }
    }

    // -----------------------------------------------------------------------
    // Look-aside operations
    // -----------------------------------------------------------------------

    /// Returns the value for `key` if it is resident.
    ///
    /// A hit records an access with the policy and ticks the hit counter;
    /// a miss ticks the miss counter.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let handle = match self.index.get(key) {
            Some(entry) => entry.node,
            None => {
                self.tick(TickEvent::Miss);
                return None;
            }
        };
        self.policy.mark_access(key, handle);
        self.tick(TickEvent::Hit);
        // Re-borrow after the policy touch; the entry cannot have moved.
        self.index.get(key).map(|entry| &entry.value)
    }

    /// Inserts `value` for `key` unless the key is already resident.
    ///
    /// Insertion is idempotent: a second insert of the same key leaves the
    /// stored value and the policy state untouched (use
    /// [`update`](Cache::update) to replace a value). Admitting a new key
    /// evicts victims until the index has room.
    pub fn insert(&mut self, key: K, value: V) {
        if self.index.contains_key(&key) {
            // A true hit, even though no value is returned.
            self.tick(TickEvent::Hit);
            return;
        }

        self.evict_to_capacity();

        let node = self.policy.mark_insertion(key.clone());
        self.index.insert(key, CacheEntry { value, node });
        debug_assert_eq!(self.index.len(), self.policy.len());
    }

    /// Replaces the value for `key`, inserting it if absent.
    ///
    /// On a resident key this is the only way a value mutates: the old value
    /// is dropped, the new one takes its place, and the policy records an
    /// access (not an insertion).
    pub fn update(&mut self, key: K, value: V) {
        if !self.index.contains_key(&key) {
            self.insert(key, value);
            return;
        }

        if let Some(entry) = self.index.get_mut(&key) {
            entry.value = value;
            self.policy.mark_access(&key, entry.node);
        }
        self.tick(TickEvent::Hit);
    }

    /// Removes the entry for `key`, if present. Unknown keys are a no-op.
    pub fn remove(&mut self, key: &K) {
        if let Some(entry) = self.index.remove(key) {
            self.policy.evict_entry(entry.node);
        }
        debug_assert_eq!(self.index.len(), self.policy.len());
    }

    // -----------------------------------------------------------------------
    // Capacity enforcement
    // -----------------------------------------------------------------------

    /// Evicts until the index can admit one more entry.
    ///
    /// A loop rather than a single eviction: a policy may need to reclaim
    /// more than one entry per admission. Stops early only if the policy
    /// runs dry, which cannot happen while the index is non-empty.
    fn evict_to_capacity(&mut self) {
        while self.index.len() as u64 >= self.capacity {
            let Some(victim) = self.policy.evict() else { break };
            if self.index.remove(&victim).is_some() {
                self.tick(TickEvent::Eviction);
            }
        }
    }

    // -----------------------------------------------------------------------
    // Administration
    // -----------------------------------------------------------------------

    /// Drops every entry and resets the policy. Stats are not reset.
    pub fn clear(&mut self) {
        self.index.clear();
        self.policy = Policy::new(self.policy.kind());
    }

    // -----------------------------------------------------------------------
    // Introspection
    // -----------------------------------------------------------------------

    /// Returns `true` if the key is resident, without recording an access.
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Number of resident entries.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// The maximum number of entries this cache admits.
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// The eviction policy this cache was built with.
    pub fn policy_kind(&self) -> PolicyKind {
        self.policy.kind()
    }

    #[inline]
    fn tick(&self, event: TickEvent) {
        if let Some(sink) = &self.stats {
            sink.record_tick(event);
        }
    }
}

impl<K, V> Default for Cache<K, V>
where
    K: Hash + Eq + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// The index and the policy must track exactly the same key set; the
    /// counts diverging means an ordering node leaked or went missing.
    #[test]
    fn index_and_policy_stay_in_agreement() {
        for kind in [PolicyKind::Lfu, PolicyKind::Lru] {
            let mut cache: Cache<u64, u64> = Cache::with_options(4, kind, None);
            for step in 0u64..500 {
                match step % 5 {
                    0 => cache.insert(step % 13, step),
                    1 => {
                        cache.get(&(step % 7));
                    }
                    2 => cache.update(step % 11, step),
                    3 => cache.remove(&(step % 13)),
                    _ => {
                        cache.get(&(step % 3));
                    }
                }
                assert_eq!(
                    cache.index.len(),
                    cache.policy.len(),
                    "{kind:?} diverged at step {step}"
                );
                assert!(cache.index.len() as u64 <= cache.capacity);
            }
        }
    }

    #[test]
    fn a_single_slot_cache_churns_cleanly() {
        for kind in [PolicyKind::Lfu, PolicyKind::Lru] {
            let mut cache: Cache<u64, u64> = Cache::with_options(1, kind, None);
            for i in 0..10u64 {
                cache.insert(i, i);
                assert_eq!(cache.get(&i), Some(&i));
            }
            assert_eq!(cache.len(), 1);
            assert_eq!(cache.get(&0), None);
        }
    }
}
