//! Sorted set: a thin layer over [`TreeMap`] with unit values.
//!
//! Navigation and views mirror the map surface element-wise; range
//! views reuse the map's [`RangeView`] bounds wrapped for set-shaped
//! access.

use crate::cmp::{Comparator, Natural};
use crate::error::Result;
use crate::tree::map::{self, RangeView, TreeMap};

pub struct TreeSet<T, C: Comparator<T> = Natural> {
    map: TreeMap<T, (), C>,
}

impl<T: Ord> TreeSet<T, Natural> {
    pub fn new() -> Self {
        Self { map: TreeMap::new() }
    }
}

impl<T: Ord> Default for TreeSet<T, Natural> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for TreeSet<T, Natural> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut s = Self::new();
        for v in iter {
            s.add(v);
        }
        s
    }
}

impl<T, C: Comparator<T>> TreeSet<T, C> {
    pub fn with_comparator(cmp: C) -> Self {
        Self {
            map: TreeMap::with_comparator(cmp),
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Add an element; `false` if an equal element was already present.
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

    // Navigation.

    pub fn first(&self) -> Option<&T> {
        self.map.first_key()
    }

    pub fn last(&self) -> Option<&T> {
        self.map.last_key()
    }

    /// Smallest element >= the probe.
    pub fn ceiling(&self, value: &T) -> Option<&T> {
        self.map.ceiling_entry(value).map(|(k, _)| k)
    }

    /// Largest element <= the probe.
    pub fn floor(&self, value: &T) -> Option<&T> {
        self.map.floor_entry(value).map(|(k, _)| k)
    }

    /// Smallest element strictly greater than the probe.
    pub fn higher(&self, value: &T) -> Option<&T> {
        self.map.higher_entry(value).map(|(k, _)| k)
    }

    /// Largest element strictly less than the probe.
    pub fn lower(&self, value: &T) -> Option<&T> {
        self.map.lower_entry(value).map(|(k, _)| k)
    }

    /// Remove and return the smallest element.
    pub fn poll_first(&mut self) -> Option<T>
    where
        T: Clone,
    {
        let first = self.first()?.clone();
        self.map.remove_entry(&first).map(|(k, _)| k)
    }

    /// Remove and return the largest element.
    pub fn poll_last(&mut self) -> Option<T>
    where
        T: Clone,
    {
        let last = self.last()?.clone();
        self.map.remove_entry(&last).map(|(k, _)| k)
    }

    // Views.

    pub fn head_set(&self, to: T, inclusive: bool) -> SetView<T> {
        SetView(self.map.head_map(to, inclusive))
    }

    pub fn tail_set(&self, from: T, inclusive: bool) -> SetView<T> {
        SetView(self.map.tail_map(from, inclusive))
    }

    pub fn sub_set(
        &self,
        from: T,
        from_inclusive: bool,
        to: T,
        to_inclusive: bool,
    ) -> Result<SetView<T>> {
        Ok(SetView(self.map.sub_map(from, from_inclusive, to, to_inclusive)?))
    }

    /// Reversed live view over the same elements.
    pub fn descending(&self) -> SetView<T> {
        SetView(self.map.descending())
    }

    // Iteration.

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.map.keys()
    }

    /// Fail-fast ascending cursor.
    pub fn cursor(&self) -> Cursor<T> {
        Cursor(self.map.cursor())
    }

    pub fn descending_cursor(&self) -> Cursor<T> {
        Cursor(self.map.descending_cursor())
    }
}

/// Fail-fast cursor over a [`TreeSet`]; same protocol as the map cursor
/// it wraps.
pub struct Cursor<T>(map::Cursor<T, ()>);

impl<T> Cursor<T> {
    pub fn has_next(&self) -> bool {
        self.0.has_next()
    }

    pub fn next<'a, C: Comparator<T>>(&mut self, set: &'a TreeSet<T, C>) -> Result<&'a T> {
        self.0.next(&set.map).map(|(k, _)| k)
    }

    pub fn remove<C: Comparator<T>>(&mut self, set: &mut TreeSet<T, C>) -> Result<T> {
        self.0.remove(&mut set.map).map(|(k, _)| k)
    }

    pub fn for_each_remaining<C: Comparator<T>, F: FnMut(&T)>(
        self,
        set: &TreeSet<T, C>,
        mut f: F,
    ) -> Result<()> {
        self.0.for_each_remaining(&set.map, |k, _| f(k))
    }
}

/// Live window over a [`TreeSet`]: the map view's bounds, set-shaped.
#[derive(Debug, Clone)]
pub struct SetView<T>(RangeView<T>);

impl<T> SetView<T> {
    pub fn contains<C: Comparator<T>>(&self, set: &TreeSet<T, C>, value: &T) -> bool {
        self.0.contains_key(&set.map, value)
    }

    /// Add through the view; the element must lie within the bounds.
    pub fn add<C: Comparator<T>>(&self, set: &mut TreeSet<T, C>, value: T) -> Result<bool> {
        Ok(self.0.put(&mut set.map, value, ())?.is_none())
    }

    /// Remove through the view; out-of-range elements are simply absent.
    pub fn remove<C: Comparator<T>>(&self, set: &mut TreeSet<T, C>, value: &T) -> bool {
        self.0.remove(&mut set.map, value).is_some()
    }

    pub fn first<'a, C: Comparator<T>>(&self, set: &'a TreeSet<T, C>) -> Option<&'a T> {
        self.0.first_entry(&set.map).map(|(k, _)| k)
    }

    pub fn last<'a, C: Comparator<T>>(&self, set: &'a TreeSet<T, C>) -> Option<&'a T> {
        self.0.last_entry(&set.map).map(|(k, _)| k)
    }

    pub fn len<C: Comparator<T>>(&self, set: &TreeSet<T, C>) -> usize
    where
        T: Clone,
    {
        self.0.len(&set.map)
    }

    pub fn is_empty<C: Comparator<T>>(&self, set: &TreeSet<T, C>) -> bool {
        self.0.is_empty(&set.map)
    }

    /// Fail-fast cursor over the view, in view order.
    pub fn cursor<C: Comparator<T>>(&self, set: &TreeSet<T, C>) -> Cursor<T>
    where
        T: Clone,
    {
        Cursor(self.0.cursor(&set.map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    /// Invariant: elements come back sorted regardless of insertion
    /// order, and duplicates are rejected.
    #[test]
    fn sorted_unique_elements() {
        let mut s: TreeSet<i32> = TreeSet::new();
        for v in [5, 1, 3, 5, 2, 1] {
            s.add(v);
        }
        assert_eq!(s.len(), 4);
        let got: Vec<i32> = s.iter().copied().collect();
        assert_eq!(got, [1, 2, 3, 5]);
        assert!(!s.add(3));
    }

    /// Invariant: navigation is inclusive for ceiling/floor, strict for
    /// higher/lower, and poll drains from the named end.
    #[test]
    fn navigation_and_poll() {
        let mut s: TreeSet<i32> = [10, 20, 30].into_iter().collect();
        assert_eq!(s.ceiling(&20), Some(&20));
        assert_eq!(s.higher(&20), Some(&30));
        assert_eq!(s.floor(&20), Some(&20));
        assert_eq!(s.lower(&20), Some(&10));
        assert_eq!(s.poll_first(), Some(10));
        assert_eq!(s.poll_last(), Some(30));
        assert_eq!(s.len(), 1);
        assert_eq!(s.poll_first(), Some(20));
        assert_eq!(s.poll_first(), None);
    }

    /// Invariant: a tail-set window is live, rejects out-of-range adds,
    /// and walks in ascending order from its low bound.
    #[test]
    fn tail_set_window() {
        let mut s: TreeSet<i32> = [1, 4, 7, 9].into_iter().collect();
        let tail = s.tail_set(4, true);
        assert!(tail.contains(&s, &4));
        assert!(!tail.contains(&s, &1));
        assert_eq!(tail.add(&mut s, 2), Err(Error::KeyOutOfRange));
        assert_eq!(tail.add(&mut s, 5), Ok(true));
        assert_eq!(tail.first(&s), Some(&4));
        assert_eq!(tail.last(&s), Some(&9));

        let mut c = tail.cursor(&s);
        let mut got = Vec::new();
        while c.has_next() {
            got.push(*c.next(&s).unwrap());
        }
        assert_eq!(got, [4, 5, 7, 9]);
    }

    /// Invariant: the descending cursor fails fast under outside
    /// mutation like any other cursor.
    #[test]
    fn descending_cursor_fail_fast() {
        let mut s: TreeSet<i32> = [1, 2, 3].into_iter().collect();
        let mut c = s.descending_cursor();
        assert_eq!(c.next(&s), Ok(&3));
        s.add(0);
        assert!(c.next(&s).is_err());
    }
}
