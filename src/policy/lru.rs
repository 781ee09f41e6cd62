use super::NodeId;

/// Sentinel indices in the `nodes` arena.
const HEAD: usize = 0; // most-recently-used end
const TAIL: usize = 1; // least-recently-used end
const NULL: usize = usize::MAX;

struct LruNode<K> {
    /// `None` for the HEAD/TAIL sentinels and for slots on the free-list.
    key: Option<K>,
    /// Index toward HEAD (more recently used).
    prev: usize,
    /// Index toward TAIL (less recently used).
    next: usize,
}

/// O(1) LRU policy backed by an index-arena doubly-linked list.
///
/// The list runs from HEAD (most recently used) to TAIL (least recently
/// used); the victim is always the node before TAIL. There is no key
/// lookup structure here — the cache entry carries the node's handle, so
/// access and targeted removal reach the node directly.
pub struct LruPolicy<K> {
    /// Index 0 = HEAD sentinel, 1 = TAIL sentinel, 2+ = real entries.
    nodes: Vec<LruNode<K>>,
    /// Indices of freed (reusable) slots.
    free_list: Vec<usize>,
    len: usize,
}

impl<K: Eq> LruPolicy<K> {
    pub fn new() -> Self {
        let mut nodes: Vec<LruNode<K>> = Vec::with_capacity(16);
        // HEAD sentinel (index 0): next points to TAIL initially
        nodes.push(LruNode {
            key: None,
            prev: NULL,
            next: TAIL,
        });
        // TAIL sentinel (index 1): prev points to HEAD initially
        nodes.push(LruNode {
            key: None,
            prev: HEAD,
            next: NULL,
        });

        LruPolicy {
            nodes,
            free_list: Vec::new(),
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    // -----------------------------------------------------------------------
    // Policy operations
    // -----------------------------------------------------------------------

    /// Starts tracking `key` as the most-recently-used entry.
    pub fn mark_insertion(&mut self, key: K) -> NodeId {
        let idx = self.alloc_node(key);
        self.link_after_head(idx);
        self.len += 1;
        NodeId(idx)
    }

    /// Moves the key behind `handle` to the most-recently-used position.
    ///
    /// # Panics
    ///
    /// Panics when the handle's key disagrees with `key` — that means the
    /// cache handed back a handle belonging to a different entry, an
    /// unrecoverable bookkeeping error.
    pub fn mark_access(&mut self, key: &K, handle: NodeId) {
        let idx = handle.index();
        if self.nodes[idx].key.as_ref() != Some(key) {
            panic!("policy handle does not match the accessed key");
        }

        if self.nodes[HEAD].next == idx {
            // Already the most-recently-used node.
            return;
        }
        self.unlink(idx);
        self.link_after_head(idx);
    }

    /// Removes and returns the least-recently-used key, or `None` when
    /// nothing is tracked.
    pub fn evict(&mut self) -> Option<K> {
        let lru = self.nodes[TAIL].prev;
        if lru == HEAD {
            return None;
        }
        self.remove_node(lru)
    }

    /// Removes the specific key behind `handle`, regardless of its position.
    pub fn evict_entry(&mut self, handle: NodeId) -> Option<K> {
        self.remove_node(handle.index())
    }

    // -----------------------------------------------------------------------
    // List maintenance
    // -----------------------------------------------------------------------

    /// Links `idx` immediately after the HEAD sentinel (marks it MRU).
    fn link_after_head(&mut self, idx: usize) {
        let old_first = self.nodes[HEAD].next;
        self.nodes[idx].prev = HEAD;
        self.nodes[idx].next = old_first;
        self.nodes[HEAD].next = idx;
        self.nodes[old_first].prev = idx;
    }

    /// Detaches `idx` from its current position in the list.
    fn unlink(&mut self, idx: usize) {
        let prev = self.nodes[idx].prev;
        let next = self.nodes[idx].next;
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
        self.nodes[idx].prev = NULL;
        self.nodes[idx].next = NULL;
    }

    fn remove_node(&mut self, idx: usize) -> Option<K> {
        self.unlink(idx);
        let key = self.nodes[idx].key.take()?;
        self.free_list.push(idx);
        self.len -= 1;
        Some(key)
    }

    /// Allocates a new node (reusing from the free list when available).
    fn alloc_node(&mut self, key: K) -> usize {
        if let Some(idx) = self.free_list.pop() {
            self.nodes[idx].key = Some(key);
            self.nodes[idx].prev = NULL;
            self.nodes[idx].next = NULL;
            idx
        } else {
            let idx = self.nodes.len();
            self.nodes.push(LruNode {
                key: Some(key),
                prev: NULL,
                next: NULL,
            });
            idx
        }
    }
}
