//! Hash set: a thin layer over [`HashMap`] with unit values.

use crate::error::Result;
use crate::hash::HashKey;
use crate::map::hash_map::{self, HashMap};

pub struct HashSet<T: HashKey + Eq> {
    map: HashMap<T, ()>,
}

impl<T: HashKey + Eq> HashSet<T> {
    pub fn new() -> Self {
        Self { map: HashMap::new() }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Add an element; `false` if it was already present.
    pub fn add(&mut self, value: T) -> bool {
        self.map.put(value, ()).is_none()
    }

    pub fn contains(&self, value: &T) -> bool {
        self.map.contains_key(value)
    }

    /// Remove an element; `true` if it was present.
    pub fn remove(&mut self, value: &T) -> bool {
        self.map.remove(value).is_some()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.map.keys()
    }

    /// Fail-fast cursor over the elements.
    pub fn cursor(&self) -> Cursor<T> {
        Cursor(self.map.cursor())
    }
}

impl<T: HashKey + Eq> Default for HashSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: HashKey + Eq> FromIterator<T> for HashSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut s = Self::new();
        for v in iter {
            s.add(v);
        }
        s
    }
}

/// Fail-fast cursor over a [`HashSet`]; same protocol as the map
/// cursor it wraps.
pub struct Cursor<T: HashKey + Eq>(hash_map::Cursor<T, ()>);

impl<T: HashKey + Eq> Cursor<T> {
    pub fn has_next(&self) -> bool {
        self.0.has_next()
    }

    pub fn next<'a>(&mut self, set: &'a HashSet<T>) -> Result<&'a T> {
        self.0.next(&set.map).map(|(k, _)| k)
    }

    pub fn remove(&mut self, set: &mut HashSet<T>) -> Result<T> {
        self.0.remove(&mut set.map).map(|(k, _)| k)
    }

    pub fn for_each_remaining<F: FnMut(&T)>(self, set: &HashSet<T>, mut f: F) -> Result<()> {
        self.0.for_each_remaining(&set.map, |k, _| f(k))
    }
}
