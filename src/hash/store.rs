//! DualStore: the dual-strategy key store behind every hash container.
//!
//! Entries live in a slotmap arena and are reached through one of two
//! indexes, chosen once per key at the call boundary:
//! - string-like keys (those with a `string_form`) go through a native
//!   dictionary keyed by the text itself, constant-time and free of
//!   user hash code calls;
//! - all other keys go through bucket chains keyed by their 32-bit hash
//!   code, scanned linearly under the key type's `Eq`. Equal computed
//!   hashes share a chain; there is no tree-ification, so pathological
//!   collisions degrade to a linear scan and nothing more.
//!
//! Every entry caches its hash at insertion; user `hash_code` is never
//! invoked again for a stored key. The debug-only reentry check covers
//! the sections that run user code (`hash_code`, `Eq` probing).

use hashbrown::{hash_table, HashMap, HashTable};
use slotmap::{DefaultKey, SlotMap};

use crate::guard::ReentryCheck;
use crate::hash::HashKey;

/// Which index holds an entry. Decided once, at insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Text,
    Code,
}

#[derive(Debug)]
struct Slot<K, V> {
    key: K,
    value: V,
    hash: i32,
    route: Route,
}

/// Spread a 32-bit hash code over 64 bits for the bucket table. The
/// mapping is injective on the low 32 bits, so one hash code still
/// means one chain.
#[inline]
fn widen(hash: i32) -> u64 {
    (hash as u32 as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15)
}

pub(crate) struct DualStore<K, V> {
    slots: SlotMap<DefaultKey, Slot<K, V>>,
    text: HashMap<Box<str>, DefaultKey>,
    codes: HashTable<DefaultKey>,
    reentry: ReentryCheck,
}

impl<K, V> DualStore<K, V>
where
    K: HashKey + Eq,
{
    pub(crate) fn new() -> Self {
        Self {
            slots: SlotMap::with_key(),
            text: HashMap::new(),
            codes: HashTable::new(),
            reentry: ReentryCheck::new(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Locate a key via its route; `None` means absent.
    pub(crate) fn find(&self, key: &K) -> Option<DefaultKey> {
        let _g = self.reentry.enter();
        if let Some(text) = key.string_form() {
            return self.text.get(text).copied();
        }
        let hash = key.hash_code();
        self.codes
            .find(widen(hash), |&kk| {
                self.slots.get(kk).map(|s| &s.key == key).unwrap_or(false)
            })
            .copied()
    }

    /// Insert or replace. Replacement swaps the value in place and is
    /// not a structural change; the caller inspects the returned old
    /// value to decide whether to bump its modification counter.
    pub(crate) fn put(&mut self, key: K, value: V) -> (DefaultKey, Option<V>) {
        let _g = self.reentry.enter();
        match key.string_form() {
            Some(text) => {
                let text: Box<str> = text.into();
                if let Some(&kk) = self.text.get(&*text) {
                    let old = core::mem::replace(&mut self.slots[kk].value, value);
                    return (kk, Some(old));
                }
                let hash = key.hash_code();
                let kk = self.slots.insert(Slot {
                    key,
                    value,
                    hash,
                    route: Route::Text,
                });
                self.text.insert(text, kk);
                (kk, None)
            }
            None => {
                let hash = key.hash_code();
                let slots = &mut self.slots;
                match self.codes.entry(
                    widen(hash),
                    |&kk| slots.get(kk).map(|s| s.key == key).unwrap_or(false),
                    |&kk| widen(slots.get(kk).map(|s| s.hash).unwrap_or(0)),
                ) {
                    hash_table::Entry::Occupied(e) => {
                        let kk = *e.get();
                        let old = core::mem::replace(&mut slots[kk].value, value);
                        (kk, Some(old))
                    }
                    hash_table::Entry::Vacant(v) => {
                        let kk = slots.insert(Slot {
                            key,
                            value,
                            hash,
                            route: Route::Code,
                        });
                        let _ = v.insert(kk);
                        (kk, None)
                    }
                }
            }
        }
    }

    pub(crate) fn remove_key(&mut self, key: &K) -> Option<(K, V)> {
        let handle = self.find(key)?;
        self.remove_handle(handle)
    }

    pub(crate) fn remove_handle(&mut self, handle: DefaultKey) -> Option<(K, V)> {
        let _g = self.reentry.enter();
        let slot = self.slots.remove(handle)?;
        match slot.route {
            Route::Text => {
                // Route::Text slots always expose their text.
                let text = slot.key.string_form().unwrap();
                self.text.remove(text);
            }
            Route::Code => {
                // Index and slots are kept in sync; the entry must exist.
                self.codes
                    .find_entry(widen(slot.hash), |&kk| kk == handle)
                    .unwrap()
                    .remove();
            }
        }
        Some((slot.key, slot.value))
    }

    pub(crate) fn key(&self, handle: DefaultKey) -> Option<&K> {
        self.slots.get(handle).map(|s| &s.key)
    }

    pub(crate) fn value(&self, handle: DefaultKey) -> Option<&V> {
        self.slots.get(handle).map(|s| &s.value)
    }

    pub(crate) fn value_mut(&mut self, handle: DefaultKey) -> Option<&mut V> {
        self.slots.get_mut(handle).map(|s| &mut s.value)
    }

    pub(crate) fn pair(&self, handle: DefaultKey) -> Option<(&K, &V)> {
        self.slots.get(handle).map(|s| (&s.key, &s.value))
    }

    /// Replace a value in place through a handle; not structural.
    pub(crate) fn replace_value(&mut self, handle: DefaultKey, value: V) -> Option<V> {
        self.slots
            .get_mut(handle)
            .map(|s| core::mem::replace(&mut s.value, value))
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.text.clear();
        self.codes.clear();
    }

    /// Snapshot of live handles in storage order; cursor material.
    pub(crate) fn handles(&self) -> Vec<DefaultKey> {
        self.slots.keys().collect()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (DefaultKey, &K, &V)> {
        self.slots.iter().map(|(kk, s)| (kk, &s.key, &s.value))
    }

    pub(crate) fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.slots.values().any(|s| s.value == *value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: string keys route to the text index, others to the
    /// code buckets, and both resolve through `find`.
    #[test]
    fn routing() {
        let mut m: DualStore<String, i32> = DualStore::new();
        let (h, old) = m.put("a".to_string(), 1);
        assert!(old.is_none());
        assert_eq!(m.find(&"a".to_string()), Some(h));
        assert_eq!(m.text.len(), 1);
        assert_eq!(m.codes.len(), 0);

        let mut n: DualStore<i64, i32> = DualStore::new();
        let (h, _) = n.put(42, 1);
        assert_eq!(n.find(&42), Some(h));
        assert_eq!(n.codes.len(), 1);
    }

    /// Invariant: put on an existing key replaces the value in place,
    /// keeping the handle and returning the old value.
    #[test]
    fn replace_in_place() {
        let mut m: DualStore<String, i32> = DualStore::new();
        let (h1, _) = m.put("k".to_string(), 1);
        let (h2, old) = m.put("k".to_string(), 2);
        assert_eq!(h1, h2);
        assert_eq!(old, Some(1));
        assert_eq!(m.value(h1), Some(&2));
        assert_eq!(m.len(), 1);

        let mut n: DualStore<i64, i32> = DualStore::new();
        let (h1, _) = n.put(9, 1);
        let (h2, old) = n.put(9, 2);
        assert_eq!(h1, h2);
        assert_eq!(old, Some(1));
    }

    /// Invariant: removal clears both the slot and its index entry; a
    /// stale handle never resolves, even after slot reuse.
    #[test]
    fn remove_and_stale_handles() {
        let mut m: DualStore<String, i32> = DualStore::new();
        let (h, _) = m.put("k".to_string(), 1);
        assert_eq!(m.remove_key(&"k".to_string()), Some(("k".to_string(), 1)));
        assert!(m.find(&"k".to_string()).is_none());
        assert!(m.value(h).is_none());
        assert!(m.text.is_empty());

        let (h2, _) = m.put("k".to_string(), 2);
        assert_ne!(h, h2, "generational handles must not alias");
        assert!(m.value(h).is_none());
    }

    /// Invariant: keys sharing one hash code live in one chain and are
    /// told apart by `Eq`.
    #[test]
    fn collision_chain() {
        // hash_long xors the halves, so equal halves hash to 0 just
        // like the value 0 itself.
        let a: i64 = 0x0000_0001_0000_0001;
        let b: i64 = 0;
        assert_eq!(crate::num::hash_long(a), crate::num::hash_long(b));
        let mut m: DualStore<i64, &'static str> = DualStore::new();
        m.put(a, "a");
        m.put(b, "b");
        assert_eq!(m.len(), 2);
        let ha = m.find(&a).unwrap();
        let hb = m.find(&b).unwrap();
        assert_ne!(ha, hb);
        assert_eq!(m.value(ha), Some(&"a"));
        assert_eq!(m.value(hb), Some(&"b"));
        m.remove_key(&a);
        assert_eq!(m.find(&b), Some(hb));
        assert!(m.find(&a).is_none());
    }

    /// Invariant: the None sentinel key stores and resolves alongside
    /// Some keys of the same type.
    #[test]
    fn null_sentinel_key() {
        let mut m: DualStore<Option<String>, i32> = DualStore::new();
        m.put(None, 0);
        m.put(Some("a".to_string()), 1);
        assert!(m.find(&None).is_some());
        assert_eq!(m.value(m.find(&None).unwrap()), Some(&0));
        assert_eq!(m.value(m.find(&Some("a".to_string())).unwrap()), Some(&1));
        assert_eq!(m.remove_key(&None), Some((None, 0)));
        assert!(m.find(&None).is_none());
        assert_eq!(m.len(), 1);
    }

    /// Invariant: clear empties every index and the arena together.
    #[test]
    fn clear_resets_all() {
        let mut m: DualStore<Option<String>, i32> = DualStore::new();
        m.put(Some("s".to_string()), 1);
        m.put(None, 2);
        m.clear();
        assert_eq!(m.len(), 0);
        assert!(m.text.is_empty());
        assert_eq!(m.codes.len(), 0);
        assert!(m.find(&Some("s".to_string())).is_none());
    }
}
