use super::NodeId;

/// Null link in the arenas.
const NULL: usize = usize::MAX;

/// One tracked key. Lives in exactly one bucket's key list.
struct KeyNode<K> {
    /// `None` only while the slot is parked on the free-list.
    key: Option<K>,
    /// Index of the owning bucket in `buckets`.
    bucket: usize,
    /// Neighbour toward the bucket's head (older arrival).
    prev: usize,
    /// Neighbour toward the bucket's tail (newer arrival).
    next: usize,
}

/// One distinct access frequency currently observed.
///
/// A bucket exists only while at least one key sits at its frequency; it is
/// unlinked and recycled the moment its key list empties.
struct FrequencyNode {
    frequency: u64,
    /// Neighbour buckets in the ascending frequency list.
    prev: usize,
    next: usize,
    /// Key list ends: `head` is the oldest arrival at this frequency (the
    /// eviction victim), `tail` the newest.
    head: usize,
    tail: usize,
}

/// Constant-time LFU eviction policy.
///
/// ## Algorithm
///
/// The classic O(1) LFU of Shah, Mitra and Matani (<http://dhruvbird.com/lfu.pdf>):
/// a doubly-linked list of frequency buckets sorted ascending, each owning a
/// doubly-linked FIFO list of the keys currently at that frequency.
///
/// ```text
///   min_bucket ─► [freq 1] ◄──► [freq 2] ◄──► [freq 5]
///                    │             │             │
///                  C ◄─► D         B             A        (head = oldest)
/// ```
///
/// - **Insertion** lands the key at the tail of the frequency-1 bucket,
///   creating the bucket if the list head is not at frequency 1.
/// - **Access** moves the key to the `frequency + 1` bucket, splicing a new
///   bucket immediately after the current one when the successor's frequency
///   is not contiguous.
/// - **Eviction** takes the head of the minimum bucket's key list — the
///   oldest arrival among the least-frequently-used keys.
///
/// Every step touches a constant number of links, so all operations are O(1).
///
/// ## Representation
///
/// Key nodes and buckets live in index arenas (`Vec` plus a free-list of
/// recycled slots) and link to each other by index, with `usize::MAX` as the
/// null link. The handle returned by `mark_insertion` is the key node's
/// arena index; the cache entry carries it so access and targeted removal
/// never have to look the key up again.
pub struct LfuPolicy<K> {
    nodes: Vec<KeyNode<K>>,
    buckets: Vec<FrequencyNode>,
    /// Recycled `nodes` slots.
    node_free: Vec<usize>,
    /// Recycled `buckets` slots.
    bucket_free: Vec<usize>,
    /// Head of the ascending frequency list — the minimum bucket.
    /// `NULL` when no keys are tracked.
    min_bucket: usize,
    len: usize,
}

impl<K: Eq> LfuPolicy<K> {
    pub fn new() -> Self {
        LfuPolicy {
            nodes: Vec::new(),
            buckets: Vec::new(),
            node_free: Vec::new(),
            bucket_free: Vec::new(),
            min_bucket: NULL,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    // -----------------------------------------------------------------------
    // Policy operations
    // -----------------------------------------------------------------------

    /// Starts tracking `key` at frequency 1.
    ///
    /// Returns the handle the owning cache entry must carry.
    pub fn mark_insertion(&mut self, key: K) -> NodeId {
        let bucket = if self.min_bucket == NULL || self.buckets[self.min_bucket].frequency != 1 {
            self.splice_bucket_at_head(1)
        } else {
            self.min_bucket
        };

        let id = self.alloc_node(key);
        self.push_back(bucket, id);
        self.len += 1;
        NodeId(id)
    }

    /// Promotes the key behind `handle` to the next frequency bucket.
    pub fn mark_access(&mut self, key: &K, handle: NodeId) {
        let id = handle.index();
        debug_assert!(
            self.nodes[id].key.as_ref() == Some(key),
            "policy handle does not belong to the accessed key"
        );

        let cur = self.nodes[id].bucket;
        let next = self.buckets[cur].next;
        let target = if next == NULL || self.buckets[next].frequency != self.buckets[cur].frequency + 1
        {
            self.splice_bucket_after(cur, self.buckets[cur].frequency + 1)
        } else {
            next
        };

        self.detach_key(id);
        self.push_back(target, id);

        if self.buckets[cur].head == NULL {
            self.free_bucket(cur);
        }
    }

    /// Removes and returns the eviction victim: the oldest arrival in the
    /// minimum-frequency bucket. `None` when nothing is tracked.
    pub fn evict(&mut self) -> Option<K> {
        if self.min_bucket == NULL {
            return None;
        }
        let id = self.buckets[self.min_bucket].head;
        self.evict_node(id)
    }

    /// Removes the specific key behind `handle`, wherever its bucket sits in
    /// the frequency list.
    pub fn evict_entry(&mut self, handle: NodeId) -> Option<K> {
        self.evict_node(handle.index())
    }

    fn evict_node(&mut self, id: usize) -> Option<K> {
        let bucket = self.nodes[id].bucket;
        self.detach_key(id);

        let key = self.nodes[id].key.take()?;
        self.node_free.push(id);
        self.len -= 1;

        if self.buckets[bucket].head == NULL {
            self.free_bucket(bucket);
        }
        Some(key)
    }

    // -----------------------------------------------------------------------
    // Key-list maintenance
    // -----------------------------------------------------------------------

    /// Appends node `id` at the tail of `bucket`'s key list (newest arrival).
    fn push_back(&mut self, bucket: usize, id: usize) {
        let tail = self.buckets[bucket].tail;
        self.nodes[id].bucket = bucket;
        self.nodes[id].prev = tail;
        self.nodes[id].next = NULL;
        if tail != NULL {
            self.nodes[tail].next = id;
        } else {
            self.buckets[bucket].head = id;
        }
        self.buckets[bucket].tail = id;
    }

    /// Detaches node `id` from its bucket's key list, fixing both list ends.
    fn detach_key(&mut self, id: usize) {
        let bucket = self.nodes[id].bucket;
        let prev = self.nodes[id].prev;
        let next = self.nodes[id].next;
        if prev != NULL {
            self.nodes[prev].next = next;
        } else {
            self.buckets[bucket].head = next;
        }
        if next != NULL {
            self.nodes[next].prev = prev;
        } else {
            self.buckets[bucket].tail = prev;
        }
        self.nodes[id].prev = NULL;
        self.nodes[id].next = NULL;
    }

    // -----------------------------------------------------------------------
    // Frequency-list maintenance
    // -----------------------------------------------------------------------

    /// Splices a fresh bucket at the head of the frequency list and makes it
    /// the new minimum.
    fn splice_bucket_at_head(&mut self, frequency: u64) -> usize {
        let b = self.alloc_bucket(frequency);
        self.buckets[b].next = self.min_bucket;
        if self.min_bucket != NULL {
            self.buckets[self.min_bucket].prev = b;
        }
        self.min_bucket = b;
        b
    }

    /// Splices a fresh bucket immediately after `after`.
    fn splice_bucket_after(&mut self, after: usize, frequency: u64) -> usize {
        let b = self.alloc_bucket(frequency);
        let next = self.buckets[after].next;
        self.buckets[b].prev = after;
        self.buckets[b].next = next;
        self.buckets[after].next = b;
        if next != NULL {
            self.buckets[next].prev = b;
        }
        b
    }

    /// Unlinks an emptied bucket and recycles its slot.
    fn free_bucket(&mut self, b: usize) {
        debug_assert!(self.buckets[b].head == NULL);
        let prev = self.buckets[b].prev;
        let next = self.buckets[b].next;
        if prev != NULL {
            self.buckets[prev].next = next;
        } else {
            self.min_bucket = next;
        }
        if next != NULL {
            self.buckets[next].prev = prev;
        }
        self.bucket_free.push(b);
    }

    // -----------------------------------------------------------------------
    // Arena allocation
    // -----------------------------------------------------------------------

    fn alloc_node(&mut self, key: K) -> usize {
        if let Some(id) = self.node_free.pop() {
            let node = &mut self.nodes[id];
            node.key = Some(key);
            node.bucket = NULL;
            node.prev = NULL;
            node.next = NULL;
            id
        } else {
            let id = self.nodes.len();
            self.nodes.push(KeyNode {
                key: Some(key),
                bucket: NULL,
                prev: NULL,
                next: NULL,
            });
            id
        }
    }

    fn alloc_bucket(&mut self, frequency: u64) -> usize {
        if let Some(b) = self.bucket_free.pop() {
            let bucket = &mut self.buckets[b];
            bucket.frequency = frequency;
            bucket.prev = NULL;
            bucket.next = NULL;
            bucket.head = NULL;
            bucket.tail = NULL;
            b
        } else {
            let b = self.buckets.len();
            self.buckets.push(FrequencyNode {
                frequency,
                prev: NULL,
                next: NULL,
                head: NULL,
                tail: NULL,
            });
            b
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
