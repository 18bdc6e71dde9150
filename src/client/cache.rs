//! Client-side LRU read cache (spec §4.5), keyed by `(path, offset)`.
//!
//! Grounded in the original C `client/src/cache.c`: an intrusive doubly
//! linked list (head = MRU, tail = LRU) behind one mutex. Rust expresses the
//! list as an arena of slots addressed by index rather than raw pointers,
//! following the same non-owning-reference pattern used by the directory
//! tree's `NodeId`.

use std::collections::HashMap;
use std::sync::Mutex;

type SlotId = usize;
type Key = (String, u64);

struct Slot {
    key: Key,
    data: Vec<u8>,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

struct Inner {
    capacity: usize,
    slots: Vec<Slot>,
    free: Vec<SlotId>,
    index: HashMap<Key, SlotId>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl Inner {
    fn unlink(&mut self, id: SlotId) {
        let (prev, next) = (self.slots[id].prev, self.slots[id].next);
        match prev {
            Some(p) => self.slots[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.slots[n].prev = prev,
            None => self.tail = prev,
        }
        self.slots[id].prev = None;
        self.slots[id].next = None;
    }

    fn push_front(&mut self, id: SlotId) {
        self.slots[id].next = self.head;
        self.slots[id].prev = None;
        if let Some(head) = self.head {
            self.slots[head].prev = Some(id);
        }
        self.head = Some(id);
        if self.tail.is_none() {
            self.tail = Some(id);
        }
    }

    fn move_to_front(&mut self, id: SlotId) {
        if self.head == Some(id) {
            return;
        }
        self.unlink(id);
        self.push_front(id);
    }

    fn evict_tail(&mut self) {
        let Some(tail) = self.tail else { return };
        self.unlink(tail);
        self.index.remove(&self.slots[tail].key);
        self.free.push(tail);
    }
}

/// Read-through LRU cache with a fixed entry capacity set at construction.
pub struct LruCache {
    inner: Mutex<Inner>,
}

impl LruCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                capacity,
                slots: Vec::new(),
                free: Vec::new(),
                index: HashMap::new(),
                head: None,
                tail: None,
            }),
        }
    }

    /// Returns up to `length` bytes cached at exactly `(path, offset)`, or
    /// `None` if there is no entry covering at least `length` bytes.
    pub fn get(&self, path: &str, offset: u64, length: usize) -> Option<Vec<u8>> {
        let mut inner = self.inner.lock().unwrap();
        let key = (path.to_string(), offset);
        let id = *inner.index.get(&key)?;
        if inner.slots[id].data.len() < length {
            return None;
        }
        let data = inner.slots[id].data[..length].to_vec();
        inner.move_to_front(id);
        Some(data)
    }

    /// Inserts or replaces the entry at `(path, offset)`, evicting the LRU
    /// tail if the cache is at capacity.
    pub fn put(&self, path: &str, offset: u64, data: &[u8]) {
        let mut inner = self.inner.lock().unwrap();
        let key = (path.to_string(), offset);
        if let Some(&id) = inner.index.get(&key) {
            inner.slots[id].data = data.to_vec();
            inner.move_to_front(id);
            return;
        }
        if inner.index.len() >= inner.capacity {
            inner.evict_tail();
        }
        let slot = Slot { key: key.clone(), data: data.to_vec(), prev: None, next: None };
        let id = match inner.free.pop() {
            Some(id) => {
                inner.slots[id] = slot;
                id
            }
            None => {
                inner.slots.push(slot);
                inner.slots.len() - 1
            }
        };
        inner.index.insert(key, id);
        inner.push_front(id);
    }

    /// Removes the entry at `(path, offset)`, if any (write-through
    /// invalidation, spec §4.5).
    pub fn invalidate(&self, path: &str, offset: u64) {
        let mut inner = self.inner.lock().unwrap();
        let key = (path.to_string(), offset);
        if let Some(id) = inner.index.remove(&key) {
            inner.unlink(id);
            inner.free.push(id);
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_then_get_round_trips() {
        let cache = LruCache::new(2);
        cache.put("a.txt", 0, b"hello");
        assert_eq!(cache.get("a.txt", 0, 5), Some(b"hello".to_vec()));
    }

    #[test]
    fn get_requires_sufficient_length() {
        let cache = LruCache::new(2);
        cache.put("a.txt", 0, b"hi");
        assert_eq!(cache.get("a.txt", 0, 5), None);
    }

    #[test]
    fn eviction_drops_least_recently_used() {
        let cache = LruCache::new(2);
        cache.put("a.txt", 0, b"a");
        cache.put("b.txt", 0, b"b");
        cache.put("c.txt", 0, b"c"); // evicts a.txt, the LRU tail
        assert_eq!(cache.get("a.txt", 0, 1), None);
        assert_eq!(cache.get("b.txt", 0, 1), Some(b"b".to_vec()));
        assert_eq!(cache.get("c.txt", 0, 1), Some(b"c".to_vec()));
    }

    #[test]
    fn touching_an_entry_protects_it_from_eviction() {
        let cache = LruCache::new(2);
        cache.put("a.txt", 0, b"a");
        cache.put("b.txt", 0, b"b");
        cache.get("a.txt", 0, 1); // a.txt is now MRU
        cache.put("c.txt", 0, b"c"); // evicts b.txt instead
        assert_eq!(cache.get("b.txt", 0, 1), None);
        assert_eq!(cache.get("a.txt", 0, 1), Some(b"a".to_vec()));
    }

    #[test]
    fn invalidate_removes_entry() {
        let cache = LruCache::new(2);
        cache.put("a.txt", 0, b"a");
        cache.invalidate("a.txt", 0);
        assert_eq!(cache.get("a.txt", 0, 1), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn replacing_an_entry_does_not_grow_size() {
        let cache = LruCache::new(2);
        cache.put("a.txt", 0, b"a");
        cache.put("a.txt", 0, b"aa");
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("a.txt", 0, 2), Some(b"aa".to_vec()));
    }
}
