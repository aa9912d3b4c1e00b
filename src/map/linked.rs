//! Hash map with a deterministic iteration order: a doubly-linked
//! chain of entries layered over the dual-strategy store, in either
//! insertion order or access order, plus the remove-eldest eviction
//! hook that makes caller-built LRU caches a one-liner.
//!
//! The chain lives in a `SecondaryMap` keyed by the same arena handles
//! as the store, so linking and unlinking never touches the hash
//! indexes. In access-order mode a successful `get`/`get_mut`/`put` on
//! an existing key moves that entry to the tail and counts as a
//! structural modification (outstanding cursors fail), matching the
//! emulated library's documented behavior.

use slotmap::{DefaultKey, SecondaryMap};

use crate::cursor::ModCount;
use crate::error::{Error, Result};
use crate::hash::store::DualStore;
use crate::hash::HashKey;

/// Decides, after each insertion of a new key, whether the eldest
/// entry (the chain head at the moment of the check: least recently
/// inserted, or least recently accessed in access-order mode) should
/// be removed.
pub trait EvictionPolicy<K, V> {
    fn remove_eldest(&mut self, eldest: (&K, &V), len: usize) -> bool;
}

/// Default policy: never evict.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepAll;

impl<K, V> EvictionPolicy<K, V> for KeepAll {
    fn remove_eldest(&mut self, _eldest: (&K, &V), _len: usize) -> bool {
        false
    }
}

/// Evict the eldest entry whenever the map grows past the capacity.
#[derive(Debug, Clone, Copy)]
pub struct CapacityEviction(pub usize);

impl<K, V> EvictionPolicy<K, V> for CapacityEviction {
    fn remove_eldest(&mut self, _eldest: (&K, &V), len: usize) -> bool {
        len > self.0
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Links {
    prev: Option<DefaultKey>,
    next: Option<DefaultKey>,
}

pub struct LinkedHashMap<K: HashKey + Eq, V, E: EvictionPolicy<K, V> = KeepAll> {
    store: DualStore<K, V>,
    links: SecondaryMap<DefaultKey, Links>,
    head: Option<DefaultKey>,
    tail: Option<DefaultKey>,
    access_order: bool,
    eviction: E,
    mods: ModCount,
}

impl<K: HashKey + Eq, V> LinkedHashMap<K, V, KeepAll> {
    /// Insertion-order map with no eviction.
    pub fn new() -> Self {
        Self::with_policy(false, KeepAll)
    }

    /// Choose insertion order (`false`) or access order (`true`).
    pub fn with_order(access_order: bool) -> Self {
        Self::with_policy(access_order, KeepAll)
    }
}

impl<K: HashKey + Eq, V> Default for LinkedHashMap<K, V, KeepAll> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: HashKey + Eq, V, E: EvictionPolicy<K, V>> LinkedHashMap<K, V, E> {
    pub fn with_policy(access_order: bool, eviction: E) -> Self {
        Self {
            store: DualStore::new(),
            links: SecondaryMap::new(),
            head: None,
            tail: None,
            access_order,
            eviction,
            mods: ModCount::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Insert or replace. Replacement keeps the entry's chain position
    /// in insertion-order mode and moves it to the tail in access-order
    /// mode; insertion of a new key links at the tail and then consults
    /// the eviction policy with the current eldest entry.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let (handle, old) = self.store.put(key, value);
        if old.is_some() {
            if self.access_order {
                self.move_to_tail(handle);
                self.mods.bump();
            }
            return old;
        }
        self.links.insert(handle, Links::default());
        self.link_tail(handle);
        self.mods.bump();
        self.maybe_evict();
        None
    }

    /// Lookup; in access-order mode a hit moves the entry to the tail
    /// and is a structural modification.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let handle = self.store.find(key)?;
        if self.access_order {
            self.move_to_tail(handle);
            self.mods.bump();
        }
        self.store.value(handle)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let handle = self.store.find(key)?;
        if self.access_order {
            self.move_to_tail(handle);
            self.mods.bump();
        }
        self.store.value_mut(handle)
    }

    /// Lookup that never reorders, even in access-order mode.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.store.find(key).and_then(|h| self.store.value(h))
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.store.find(key).is_some()
    }

    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.store.contains_value(value)
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        let handle = self.store.find(key)?;
        self.remove_handle(handle).map(|(_, v)| v)
    }

    pub fn clear(&mut self) {
        if !self.store.is_empty() {
            self.store.clear();
            self.links.clear();
            self.head = None;
            self.tail = None;
            self.mods.bump();
        }
    }

    /// The eldest entry: chain head; least recently inserted, or least
    /// recently accessed in access-order mode.
    pub fn eldest(&self) -> Option<(&K, &V)> {
        self.head.and_then(|h| self.store.pair(h))
    }

    /// Borrow-checked traversal in chain order.
    pub fn entries(&self) -> ChainIter<'_, K, V, E> {
        ChainIter {
            map: self,
            next: self.head,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries().map(|(_, v)| v)
    }

    /// Fail-fast cursor in chain order.
    pub fn cursor(&self) -> Cursor<K, V> {
        Cursor {
            next: self.head,
            last: None,
            expected: self.mods.snapshot(),
            _pd: core::marker::PhantomData,
        }
    }

    fn maybe_evict(&mut self) {
        let evict = match self.head {
            Some(h) => match self.store.pair(h) {
                Some(pair) => self.eviction.remove_eldest(pair, self.store.len()),
                None => false,
            },
            None => false,
        };
        if evict {
            if let Some(h) = self.head {
                self.remove_handle(h);
            }
        }
    }

    fn remove_handle(&mut self, handle: DefaultKey) -> Option<(K, V)> {
        self.unlink(handle);
        self.links.remove(handle);
        let removed = self.store.remove_handle(handle);
        if removed.is_some() {
            self.mods.bump();
        }
        removed
    }

    fn link_tail(&mut self, handle: DefaultKey) {
        self.links[handle] = Links {
            prev: self.tail,
            next: None,
        };
        match self.tail {
            Some(t) => self.links[t].next = Some(handle),
            None => self.head = Some(handle),
        }
        self.tail = Some(handle);
    }

    fn unlink(&mut self, handle: DefaultKey) {
        let Links { prev, next } = self.links[handle];
        match prev {
            Some(p) => self.links[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.links[n].prev = prev,
            None => self.tail = prev,
        }
    }

    fn move_to_tail(&mut self, handle: DefaultKey) {
        if self.tail == Some(handle) {
            return;
        }
        self.unlink(handle);
        self.link_tail(handle);
    }
}

/// Borrowing iterator in chain order.
pub struct ChainIter<'a, K: HashKey + Eq, V, E: EvictionPolicy<K, V>> {
    map: &'a LinkedHashMap<K, V, E>,
    next: Option<DefaultKey>,
}

impl<'a, K: HashKey + Eq, V, E: EvictionPolicy<K, V>> Iterator for ChainIter<'a, K, V, E> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.next?;
        self.next = self.map.links.get(handle).and_then(|l| l.next);
        self.map.store.pair(handle)
    }
}

/// Fail-fast cursor over a [`LinkedHashMap`], walking the chain.
pub struct Cursor<K: HashKey + Eq, V> {
    next: Option<DefaultKey>,
    last: Option<DefaultKey>,
    expected: u64,
    _pd: core::marker::PhantomData<fn(&K, &V)>,
}

impl<K: HashKey + Eq, V> Cursor<K, V> {
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn next<'a, E: EvictionPolicy<K, V>>(
        &mut self,
        map: &'a LinkedHashMap<K, V, E>,
    ) -> Result<(&'a K, &'a V)> {
        map.mods.check(self.expected)?;
        let handle = self.next.ok_or(Error::NoSuchElement)?;
        self.next = map.links.get(handle).and_then(|l| l.next);
        self.last = Some(handle);
        map.store.pair(handle).ok_or(Error::ConcurrentModification)
    }

    pub fn remove<E: EvictionPolicy<K, V>>(
        &mut self,
        map: &mut LinkedHashMap<K, V, E>,
    ) -> Result<(K, V)> {
        let last = self
            .last
            .take()
            .ok_or(Error::IllegalState("remove before next"))?;
        map.mods.check(self.expected)?;
        let removed = map
            .remove_handle(last)
            .ok_or(Error::ConcurrentModification)?;
        self.expected = map.mods.snapshot();
        Ok(removed)
    }

    pub fn set_value<E: EvictionPolicy<K, V>>(
        &mut self,
        map: &mut LinkedHashMap<K, V, E>,
        value: V,
    ) -> Result<V> {
        let last = self.last.ok_or(Error::IllegalState("set before next"))?;
        map.mods.check(self.expected)?;
        map.store
            .replace_value(last, value)
            .ok_or(Error::ConcurrentModification)
    }

    pub fn for_each_remaining<E: EvictionPolicy<K, V>, F: FnMut(&K, &V)>(
        mut self,
        map: &LinkedHashMap<K, V, E>,
        mut f: F,
    ) -> Result<()> {
        map.mods.check(self.expected)?;
        while let Some(handle) = self.next {
            self.next = map.links.get(handle).and_then(|l| l.next);
            if let Some((k, v)) = map.store.pair(handle) {
                f(k, v);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order<E: EvictionPolicy<String, i32>>(m: &LinkedHashMap<String, i32, E>) -> Vec<String> {
        m.keys().cloned().collect()
    }

    /// Invariant: insertion-order mode iterates in insertion order;
    /// replacement keeps position; re-insertion after removal moves to
    /// the tail.
    #[test]
    fn insertion_order() {
        let mut m: LinkedHashMap<String, i32> = LinkedHashMap::new();
        for k in ["a", "b", "c"] {
            m.put(k.to_string(), 0);
        }
        m.put("b".to_string(), 1); // replace: position preserved
        assert_eq!(order(&m), ["a", "b", "c"]);
        m.remove(&"a".to_string());
        m.put("a".to_string(), 2);
        assert_eq!(order(&m), ["b", "c", "a"]);
        assert_eq!(m.eldest().map(|(k, _)| k.clone()), Some("b".to_string()));
    }

    /// Invariant: access-order mode moves touched entries to the tail
    /// on get and on replacing put; peek never reorders.
    #[test]
    fn access_order_reorders() {
        let mut m: LinkedHashMap<String, i32> = LinkedHashMap::with_order(true);
        for k in ["a", "b", "c"] {
            m.put(k.to_string(), 0);
        }
        assert!(m.get(&"a".to_string()).is_some());
        assert_eq!(order(&m), ["b", "c", "a"]);
        m.put("b".to_string(), 9);
        assert_eq!(order(&m), ["c", "a", "b"]);
        m.peek(&"c".to_string());
        assert_eq!(order(&m), ["c", "a", "b"]);
        // A miss does not reorder.
        assert!(m.get(&"zz".to_string()).is_none());
        assert_eq!(order(&m), ["c", "a", "b"]);
    }

    /// Invariant: the pinned eldest semantics — insert A,B,C, access A,
    /// insert D with capacity 3: B (least recently accessed at the
    /// moment of the check) is evicted, leaving C,A,D.
    #[test]
    fn lru_eviction_scenario() {
        let mut m: LinkedHashMap<String, i32, CapacityEviction> =
            LinkedHashMap::with_policy(true, CapacityEviction(3));
        m.put("A".to_string(), 1);
        m.put("B".to_string(), 2);
        m.put("C".to_string(), 3);
        assert!(m.get(&"A".to_string()).is_some());
        m.put("D".to_string(), 4);
        assert_eq!(order(&m), ["C", "A", "D"]);
        assert!(!m.contains_key(&"B".to_string()));
        assert_eq!(m.len(), 3);
    }

    /// Invariant: in access-order mode a successful get is structural,
    /// so it fails outstanding cursors; in insertion-order mode it does
    /// not.
    #[test]
    fn access_order_get_is_structural() {
        let mut m: LinkedHashMap<String, i32> = LinkedHashMap::with_order(true);
        m.put("a".to_string(), 1);
        m.put("b".to_string(), 2);
        let mut c = m.cursor();
        m.get(&"a".to_string());
        assert_eq!(c.next(&m), Err(Error::ConcurrentModification));

        let mut m: LinkedHashMap<String, i32> = LinkedHashMap::new();
        m.put("a".to_string(), 1);
        let mut c = m.cursor();
        m.get(&"a".to_string());
        assert!(c.next(&m).is_ok());
    }

    /// Invariant: cursor removal unlinks from the chain and continues
    /// in order.
    #[test]
    fn cursor_removal_keeps_order() {
        let mut m: LinkedHashMap<String, i32> = LinkedHashMap::new();
        for (i, k) in ["a", "b", "c", "d"].iter().enumerate() {
            m.put(k.to_string(), i as i32);
        }
        let mut c = m.cursor();
        c.next(&m).unwrap();
        let (k, _) = c.next(&m).unwrap();
        assert_eq!(k, "b");
        c.remove(&mut m).unwrap();
        let (k, _) = c.next(&m).unwrap();
        assert_eq!(k, "c");
        assert_eq!(order(&m), ["a", "c", "d"]);
    }
}
