//! NS-side path -> metadata lookup cache, consulted on `GET_LOCATION`.
//!
//! Grounded in the original C `naming_server/src/cache.c`: an intrusive
//! doubly linked list (head = MRU, tail = LRU) behind one mutex, sized by
//! the `-c/--cache-size` CLI flag. Expressed here as an arena of slots
//! addressed by index rather than raw pointers, the same non-owning-handle
//! idiom already used by the client read cache and the directory tree's
//! `NodeId`.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::directory::FileMetadata;

type SlotId = usize;

struct Slot {
    path: String,
    metadata: FileMetadata,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

struct Inner {
    capacity: usize,
    slots: Vec<Slot>,
    free: Vec<SlotId>,
    index: HashMap<String, SlotId>,
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
        self.index.remove(&self.slots[tail].path);
        self.free.push(tail);
    }
}

/// Read-through LRU cache of `path -> FileMetadata`, fronting the directory
/// tree on the `GET_LOCATION` fast path.
pub struct LookupCache {
    inner: Mutex<Inner>,
}

impl LookupCache {
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

    pub fn get(&self, path: &str) -> Option<FileMetadata> {
        let mut inner = self.inner.lock().unwrap();
        let id = *inner.index.get(path)?;
        let metadata = inner.slots[id].metadata.clone();
        inner.move_to_front(id);
        Some(metadata)
    }

    pub fn put(&self, path: &str, metadata: FileMetadata) {
        let mut inner = self.inner.lock().unwrap();
        if inner.capacity == 0 {
            return;
        }
        if let Some(&id) = inner.index.get(path) {
            inner.slots[id].metadata = metadata;
            inner.move_to_front(id);
            return;
        }
        if inner.index.len() >= inner.capacity {
            inner.evict_tail();
        }
        let slot = Slot { path: path.to_string(), metadata, prev: None, next: None };
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
        inner.index.insert(path.to_string(), id);
        inner.push_front(id);
    }

    /// Drops a cached entry. Called whenever `SS_REGISTER` rewrites a
    /// path's owner, so a stale location is never served from the cache.
    pub fn invalidate(&self, path: &str) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(id) = inner.index.remove(path) {
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
