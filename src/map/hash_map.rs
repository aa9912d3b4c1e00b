//! Value-equality hash map over the dual-strategy store, with the
//! fail-fast cursor protocol.

use slotmap::DefaultKey;

use crate::cursor::ModCount;
use crate::error::{Error, Result};
use crate::hash::store::DualStore;
use crate::hash::HashKey;

/// Hash map with the emulated library's observable behavior: put
/// returns the previous value, lookups return `None` for absence, and
/// structural changes (insert/remove/clear, never value replacement)
/// invalidate every outstanding cursor.
pub struct HashMap<K: HashKey + Eq, V> {
    store: DualStore<K, V>,
    mods: ModCount,
}

impl<K: HashKey + Eq, V> HashMap<K, V> {
    pub fn new() -> Self {
        Self {
            store: DualStore::new(),
            mods: ModCount::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Insert or replace; returns the previous value for the key.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let (_, old) = self.store.put(key, value);
        if old.is_none() {
            self.mods.bump();
        }
        old
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.store.find(key).and_then(|h| self.store.value(h))
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.store.find(key).and_then(|h| self.store.value_mut(h))
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.store.find(key).is_some()
    }

    /// Linear scan over values.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.store.contains_value(value)
    }

    /// Remove a key; returns its value if it was present.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, v)| v)
    }

    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let removed = self.store.remove_key(key);
        if removed.is_some() {
            self.mods.bump();
        }
        removed
    }

    pub fn clear(&mut self) {
        if !self.store.is_empty() {
            self.store.clear();
            self.mods.bump();
        }
    }

    /// Bulk insert with per-entry put semantics.
    pub fn put_all<I: IntoIterator<Item = (K, V)>>(&mut self, entries: I) {
        for (k, v) in entries {
            self.put(k, v);
        }
    }

    /// Borrow-checked traversal of entries; order is unspecified. For
    /// iteration that must survive interleaved mutation, use
    /// [`cursor`](Self::cursor).
    pub fn entries(&self) -> impl Iterator<Item = (&K, &V)> {
        self.store.iter().map(|(_, k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.store.iter().map(|(_, k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.store.iter().map(|(_, _, v)| v)
    }

    /// Fail-fast entry cursor; snapshots the modification counter.
    pub fn cursor(&self) -> Cursor<K, V> {
        Cursor {
            handles: self.store.handles(),
            pos: 0,
            last: None,
            expected: self.mods.snapshot(),
            _pd: core::marker::PhantomData,
        }
    }

}

impl<K: HashKey + Eq, V> Default for HashMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: HashKey + Eq, V> FromIterator<(K, V)> for HashMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut m = Self::new();
        m.put_all(iter);
        m
    }
}

/// Fail-fast cursor over a [`HashMap`]. Holds no borrow: every method
/// takes the map, and a structural change made by anything other than
/// this cursor's own `remove` turns the next call into
/// [`Error::ConcurrentModification`].
pub struct Cursor<K: HashKey + Eq, V> {
    handles: Vec<DefaultKey>,
    pos: usize,
    last: Option<DefaultKey>,
    expected: u64,
    _pd: core::marker::PhantomData<fn(&K, &V)>,
}

impl<K: HashKey + Eq, V> Cursor<K, V> {
    pub fn has_next(&self) -> bool {
        self.pos < self.handles.len()
    }

    /// Step to the next entry. Checks the modification counter first.
    pub fn next<'a>(&mut self, map: &'a HashMap<K, V>) -> Result<(&'a K, &'a V)> {
        map.mods.check(self.expected)?;
        let handle = *self
            .handles
            .get(self.pos)
            .ok_or(Error::NoSuchElement)?;
        self.pos += 1;
        self.last = Some(handle);
        map.store.pair(handle).ok_or(Error::ConcurrentModification)
    }

    /// Remove the entry last returned by `next`, then resynchronize so
    /// this cursor (and only this cursor) keeps working.
    pub fn remove(&mut self, map: &mut HashMap<K, V>) -> Result<(K, V)> {
        let last = self
            .last
            .take()
            .ok_or(Error::IllegalState("remove before next"))?;
        map.mods.check(self.expected)?;
        let removed = map
            .store
            .remove_handle(last)
            .ok_or(Error::ConcurrentModification)?;
        map.mods.bump();
        self.expected = map.mods.snapshot();
        Ok(removed)
    }

    /// Entry-view `setValue`: replace the value of the entry last
    /// returned by `next`, in place, without a structural change.
    pub fn set_value(&mut self, map: &mut HashMap<K, V>, value: V) -> Result<V> {
        let last = self.last.ok_or(Error::IllegalState("set before next"))?;
        map.mods.check(self.expected)?;
        map.store
            .replace_value(last, value)
            .ok_or(Error::ConcurrentModification)
    }

    /// Consume the rest of the sequence with a single up-front counter
    /// check instead of one per step.
    pub fn for_each_remaining<F: FnMut(&K, &V)>(mut self, map: &HashMap<K, V>, mut f: F) -> Result<()> {
        map.mods.check(self.expected)?;
        while self.pos < self.handles.len() {
            let handle = self.handles[self.pos];
            self.pos += 1;
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

    /// Invariant: put returns the previous value and replacement does
    /// not change the size.
    #[test]
    fn put_get_replace() {
        let mut m: HashMap<String, i32> = HashMap::new();
        assert_eq!(m.put("a".to_string(), 1), None);
        assert_eq!(m.put("a".to_string(), 2), Some(1));
        assert_eq!(m.get(&"a".to_string()), Some(&2));
        assert_eq!(m.len(), 1);
        assert!(m.contains_key(&"a".to_string()));
        assert!(!m.contains_key(&"b".to_string()));
        assert_eq!(m.remove(&"a".to_string()), Some(2));
        assert_eq!(m.remove(&"a".to_string()), None);
        assert!(m.is_empty());
    }

    /// Invariant: contains_value scans by value equality.
    #[test]
    fn contains_value_scan() {
        let mut m: HashMap<i64, String> = HashMap::new();
        m.put(1, "x".to_string());
        m.put(2, "y".to_string());
        assert!(m.contains_value(&"x".to_string()));
        assert!(!m.contains_value(&"z".to_string()));
    }

    /// Invariant: the cursor walks every live entry exactly once and
    /// supports in-place value replacement via `set_value`.
    #[test]
    fn cursor_walks_and_sets() {
        let mut m: HashMap<String, i32> = HashMap::new();
        for (i, k) in ["a", "b", "c"].iter().enumerate() {
            m.put((*k).to_string(), i as i32);
        }
        let mut seen = std::collections::BTreeSet::new();
        let mut c = m.cursor();
        while c.has_next() {
            let (k, _) = c.next(&m).unwrap();
            seen.insert(k.clone());
        }
        assert_eq!(seen.len(), 3);
        assert_eq!(c.next(&m), Err(Error::NoSuchElement));

        let mut c = m.cursor();
        c.next(&m).unwrap();
        let old = c.set_value(&mut m, 99).unwrap();
        assert!(m.contains_value(&99));
        assert!(!m.contains_value(&old));
        // set_value is not structural; the same cursor continues.
        while c.has_next() {
            c.next(&m).unwrap();
        }
    }

    /// Invariant: mutating the map outside a live cursor makes the
    /// cursor's next call fail with ConcurrentModification; the
    /// cursor's own remove resynchronizes it.
    #[test]
    fn fail_fast_and_resync() {
        let mut m: HashMap<String, i32> = HashMap::new();
        for k in ["a", "b", "c", "d"] {
            m.put(k.to_string(), 0);
        }
        let mut c = m.cursor();
        c.next(&m).unwrap();
        m.put("e".to_string(), 0);
        assert_eq!(c.next(&m), Err(Error::ConcurrentModification));

        let mut c = m.cursor();
        c.next(&m).unwrap();
        let _ = c.remove(&mut m).unwrap();
        // Own removal: this cursor continues...
        c.next(&m).unwrap();
        assert_eq!(m.len(), 4);
        // ...but a second cursor does not see the resync and fails.
        let mut other = m.cursor();
        other.next(&m).unwrap();
        m.put("f".to_string(), 0);
        assert_eq!(other.next(&m), Err(Error::ConcurrentModification));
    }

    /// Invariant: remove before next, and double remove, are illegal
    /// states rather than silent no-ops.
    #[test]
    fn cursor_remove_protocol() {
        let mut m: HashMap<String, i32> = HashMap::new();
        m.put("a".to_string(), 1);
        let mut c = m.cursor();
        assert_eq!(
            c.remove(&mut m),
            Err(Error::IllegalState("remove before next"))
        );
        c.next(&m).unwrap();
        c.remove(&mut m).unwrap();
        assert_eq!(
            c.remove(&mut m),
            Err(Error::IllegalState("remove before next"))
        );
    }

    /// Invariant: for_each_remaining checks the counter once up front
    /// and then consumes everything left.
    #[test]
    fn for_each_remaining_bulk() {
        let mut m: HashMap<i64, i32> = HashMap::new();
        for i in 0..10 {
            m.put(i, i as i32);
        }
        let mut c = m.cursor();
        c.next(&m).unwrap();
        let mut count = 0;
        c.for_each_remaining(&m, |_, _| count += 1).unwrap();
        assert_eq!(count, 9);

        let c = m.cursor();
        m.put(100, 0);
        assert_eq!(
            c.for_each_remaining(&m, |_, _| {}),
            Err(Error::ConcurrentModification)
        );
    }

    /// Invariant: clear on an empty map is not a structural change, so
    /// cursors over the empty map stay valid.
    #[test]
    fn clear_empty_is_not_structural() {
        let mut m: HashMap<String, i32> = HashMap::new();
        let c = m.cursor();
        m.clear();
        assert!(c.for_each_remaining(&m, |_, _| {}).is_ok());
        m.put("a".to_string(), 1);
        let mut c = m.cursor();
        m.clear();
        assert_eq!(c.next(&m), Err(Error::ConcurrentModification));
    }
}
