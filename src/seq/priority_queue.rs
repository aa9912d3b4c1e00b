//! Priority queue: a dense binary min-heap under a caller-supplied
//! comparator.
//!
//! The heap invariant is `heap[parent] <= heap[child]` under the
//! comparator, so `peek` and `poll` see the least element. Iteration
//! order is the heap's internal layout, not sorted order; draining
//! through `poll` is the sorted walk.

use crate::cmp::{Comparator, Natural};
use crate::cursor::ModCount;
use crate::error::{Error, Result};
use crate::guard::ReentryCheck;

pub struct PriorityQueue<T, C: Comparator<T> = Natural> {
    heap: Vec<T>,
    cmp: C,
    mods: ModCount,
    reentry: ReentryCheck,
}

impl<T: Ord> PriorityQueue<T, Natural> {
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<T: Ord> Default for PriorityQueue<T, Natural> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for PriorityQueue<T, Natural> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut q = Self::new();
        for v in iter {
            q.offer(v);
        }
        q
    }
}

impl<T, C: Comparator<T>> PriorityQueue<T, C> {
    pub fn with_comparator(cmp: C) -> Self {
        Self {
            heap: Vec::new(),
            cmp,
            mods: ModCount::new(),
            reentry: ReentryCheck::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Insert, restoring the heap by sifting the new element up.
    pub fn offer(&mut self, value: T) {
        let _g = self.reentry.enter();
        self.heap.push(value);
        self.sift_up(self.heap.len() - 1);
        self.mods.bump();
    }

    /// Least element without removal.
    pub fn peek(&self) -> Option<&T> {
        self.heap.first()
    }

    /// Remove and return the least element.
    pub fn poll(&mut self) -> Option<T> {
        let _g = self.reentry.enter();
        if self.heap.is_empty() {
            return None;
        }
        let v = self.heap.swap_remove(0);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        self.mods.bump();
        Some(v)
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.heap.contains(value)
    }

    /// Remove the first occurrence by equality; `false` if absent.
    pub fn remove_item(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        let _g = self.reentry.enter();
        let Some(i) = self.heap.iter().position(|v| v == value) else {
            return false;
        };
        let last = self.heap.len() - 1;
        self.heap.swap(i, last);
        self.heap.pop();
        if i < self.heap.len() {
            // The element moved into the hole may belong either way.
            if self.sift_down(i) == i {
                self.sift_up(i);
            }
        }
        self.mods.bump();
        true
    }

    pub fn clear(&mut self) {
        if !self.heap.is_empty() {
            self.heap.clear();
            self.mods.bump();
        }
    }

    /// Borrowing iterator in heap layout order, not sorted order.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.heap.iter()
    }

    /// Fail-fast cursor in heap layout order.
    pub fn cursor(&self) -> Cursor<T> {
        Cursor {
            i: 0,
            expected: self.mods.snapshot(),
            _pd: core::marker::PhantomData,
        }
    }

    fn less(&self, a: usize, b: usize) -> bool {
        self.cmp.compare(&self.heap[a], &self.heap[b]) == core::cmp::Ordering::Less
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.less(i, parent) {
                self.heap.swap(i, parent);
                i = parent;
            } else {
                break;
            }
        }
    }

    /// Returns the element's final index.
    fn sift_down(&mut self, mut i: usize) -> usize {
        loop {
            let left = 2 * i + 1;
            if left >= self.heap.len() {
                return i;
            }
            let right = left + 1;
            let least = if right < self.heap.len() && self.less(right, left) {
                right
            } else {
                left
            };
            if self.less(least, i) {
                self.heap.swap(least, i);
                i = least;
            } else {
                return i;
            }
        }
    }
}

/// Fail-fast cursor over the heap's layout.
pub struct Cursor<T> {
    i: usize,
    expected: u64,
    _pd: core::marker::PhantomData<fn(&T)>,
}

impl<T> Cursor<T> {
    pub fn has_next<C: Comparator<T>>(&self, queue: &PriorityQueue<T, C>) -> bool {
        self.i < queue.heap.len()
    }

    pub fn next<'a, C: Comparator<T>>(&mut self, queue: &'a PriorityQueue<T, C>) -> Result<&'a T> {
        queue.mods.check(self.expected)?;
        let v = queue.heap.get(self.i).ok_or(Error::NoSuchElement)?;
        self.i += 1;
        Ok(v)
    }

    pub fn for_each_remaining<C: Comparator<T>, F: FnMut(&T)>(
        mut self,
        queue: &PriorityQueue<T, C>,
        mut f: F,
    ) -> Result<()> {
        queue.mods.check(self.expected)?;
        while let Some(v) = queue.heap.get(self.i) {
            f(v);
            self.i += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: draining through poll yields ascending order
    /// regardless of offer order.
    #[test]
    fn drains_sorted() {
        let mut q: PriorityQueue<i32> = [5, 1, 4, 2, 3].into_iter().collect();
        let mut got = Vec::new();
        while let Some(v) = q.poll() {
            got.push(v);
        }
        assert_eq!(got, [1, 2, 3, 4, 5]);
        assert_eq!(q.poll(), None);
        assert_eq!(q.peek(), None);
    }

    /// Invariant: peek is the least element and does not remove it.
    #[test]
    fn peek_is_least() {
        let mut q: PriorityQueue<i32> = PriorityQueue::new();
        q.offer(7);
        assert_eq!(q.peek(), Some(&7));
        q.offer(3);
        assert_eq!(q.peek(), Some(&3));
        q.offer(5);
        assert_eq!(q.peek(), Some(&3));
        assert_eq!(q.len(), 3);
    }

    /// Invariant: removing an interior element re-heapifies; the drain
    /// afterwards is still sorted.
    #[test]
    fn remove_item_reheapifies() {
        let mut q: PriorityQueue<i32> = (0..20).rev().collect();
        assert!(q.remove_item(&7));
        assert!(!q.remove_item(&7));
        assert!(q.contains(&8));
        let mut got = Vec::new();
        while let Some(v) = q.poll() {
            got.push(v);
        }
        let want: Vec<i32> = (0..20).filter(|v| *v != 7).collect();
        assert_eq!(got, want);
    }

    /// Invariant: a reversed comparator makes poll yield the greatest
    /// element first.
    #[test]
    fn max_heap_via_comparator() {
        use crate::cmp::Reversed;
        let mut q: PriorityQueue<i32, Reversed<Natural>> =
            PriorityQueue::with_comparator(Reversed(Natural));
        for v in [2, 9, 4] {
            q.offer(v);
        }
        assert_eq!(q.poll(), Some(9));
        assert_eq!(q.poll(), Some(4));
        assert_eq!(q.poll(), Some(2));
    }

    /// Invariant: the cursor fails fast on structural mutation and
    /// visits every element once in layout order.
    #[test]
    fn cursor_fail_fast() {
        let mut q: PriorityQueue<i32> = [3, 1, 2].into_iter().collect();
        let mut c = q.cursor();
        c.next(&q).unwrap();
        q.offer(0);
        assert_eq!(c.next(&q), Err(Error::ConcurrentModification));

        let c = q.cursor();
        let mut seen = Vec::new();
        c.for_each_remaining(&q, |v| seen.push(*v)).unwrap();
        seen.sort_unstable();
        assert_eq!(seen, [0, 1, 2, 3]);
    }
}
