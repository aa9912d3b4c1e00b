//! Double-ended queue over a power-of-two ring buffer.
//!
//! Capacity is always a power of two so wrapping is a mask, never a
//! division. Slots hold `Option<T>`; exactly the `len` logical
//! positions starting at `head` are occupied. Growth doubles the
//! buffer and compacts the live run to the front.

use crate::cursor::ModCount;
use crate::error::{Error, Result};

const MIN_CAPACITY: usize = 8;

pub struct ArrayDeque<T> {
    ring: Vec<Option<T>>,
    head: usize,
    len: usize,
    mods: ModCount,
}

impl<T> ArrayDeque<T> {
    pub fn new() -> Self {
        Self::with_capacity(MIN_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let cap = capacity.max(MIN_CAPACITY).next_power_of_two();
        Self {
            ring: (0..cap).map(|_| None).collect(),
            head: 0,
            len: 0,
            mods: ModCount::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn add_first(&mut self, value: T) {
        if self.len == self.ring.len() {
            self.grow();
        }
        let mask = self.ring.len() - 1;
        self.head = self.head.wrapping_sub(1) & mask;
        self.ring[self.head] = Some(value);
        self.len += 1;
        self.mods.bump();
    }

    pub fn add_last(&mut self, value: T) {
        if self.len == self.ring.len() {
            self.grow();
        }
        let i = self.phys(self.len);
        self.ring[i] = Some(value);
        self.len += 1;
        self.mods.bump();
    }

    pub fn poll_first(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let v = self.ring[self.head].take();
        self.head = (self.head + 1) & (self.ring.len() - 1);
        self.len -= 1;
        self.mods.bump();
        v
    }

    pub fn poll_last(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let i = self.phys(self.len - 1);
        let v = self.ring[i].take();
        self.len -= 1;
        self.mods.bump();
        v
    }

    pub fn peek_first(&self) -> Option<&T> {
        if self.len == 0 {
            return None;
        }
        self.ring[self.head].as_ref()
    }

    pub fn peek_last(&self) -> Option<&T> {
        if self.len == 0 {
            return None;
        }
        self.ring[self.phys(self.len - 1)].as_ref()
    }

    // Stack and queue aliases.

    /// Stack push onto the front.
    pub fn push(&mut self, value: T) {
        self.add_first(value);
    }

    /// Stack pop from the front.
    pub fn pop(&mut self) -> Result<T> {
        self.poll_first().ok_or(Error::NoSuchElement)
    }

    /// Queue append at the back.
    pub fn offer(&mut self, value: T) {
        self.add_last(value);
    }

    pub fn poll(&mut self) -> Option<T> {
        self.poll_first()
    }

    pub fn peek(&self) -> Option<&T> {
        self.peek_first()
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|v| v == value)
    }

    pub fn clear(&mut self) {
        if self.len > 0 {
            for slot in &mut self.ring {
                *slot = None;
            }
            self.head = 0;
            self.len = 0;
            self.mods.bump();
        }
    }

    /// Borrowing front-to-back iterator.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { deque: self, i: 0 }
    }

    /// Fail-fast front-to-back cursor.
    pub fn cursor(&self) -> Cursor<T> {
        Cursor {
            i: 0,
            expected: self.mods.snapshot(),
            _pd: core::marker::PhantomData,
        }
    }

    fn phys(&self, i: usize) -> usize {
        (self.head + i) & (self.ring.len() - 1)
    }

    fn grow(&mut self) {
        let old_cap = self.ring.len();
        let mut next: Vec<Option<T>> = (0..old_cap * 2).map(|_| None).collect();
        for i in 0..self.len {
            let j = (self.head + i) & (old_cap - 1);
            next[i] = self.ring[j].take();
        }
        self.ring = next;
        self.head = 0;
    }
}

impl<T> Default for ArrayDeque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for ArrayDeque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut d = Self::new();
        for v in iter {
            d.add_last(v);
        }
        d
    }
}

pub struct Iter<'a, T> {
    deque: &'a ArrayDeque<T>,
    i: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.i >= self.deque.len {
            return None;
        }
        let slot = &self.deque.ring[self.deque.phys(self.i)];
        self.i += 1;
        // The first `len` logical positions are always occupied.
        Some(slot.as_ref().unwrap())
    }
}

/// Fail-fast front-to-back cursor; positions are logical offsets from
/// the head, so it stays cheap across wrapping.
pub struct Cursor<T> {
    i: usize,
    expected: u64,
    _pd: core::marker::PhantomData<fn(&T)>,
}

impl<T> Cursor<T> {
    pub fn has_next(&self, deque: &ArrayDeque<T>) -> bool {
        self.i < deque.len
    }

    pub fn next<'a>(&mut self, deque: &'a ArrayDeque<T>) -> Result<&'a T> {
        deque.mods.check(self.expected)?;
        if self.i >= deque.len {
            return Err(Error::NoSuchElement);
        }
        let slot = &deque.ring[deque.phys(self.i)];
        self.i += 1;
        slot.as_ref().ok_or(Error::ConcurrentModification)
    }

    pub fn for_each_remaining<F: FnMut(&T)>(mut self, deque: &ArrayDeque<T>, mut f: F) -> Result<()> {
        deque.mods.check(self.expected)?;
        while self.i < deque.len {
            if let Some(v) = deque.ring[deque.phys(self.i)].as_ref() {
                f(v);
            }
            self.i += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: FIFO through offer/poll, LIFO through push/pop, and
    /// both ends peek correctly.
    #[test]
    fn both_ends() {
        let mut d: ArrayDeque<i32> = ArrayDeque::new();
        d.offer(1);
        d.offer(2);
        d.push(0);
        assert_eq!(d.peek_first(), Some(&0));
        assert_eq!(d.peek_last(), Some(&2));
        assert_eq!(d.poll(), Some(0));
        assert_eq!(d.poll_last(), Some(2));
        assert_eq!(d.pop(), Ok(1));
        assert_eq!(d.pop(), Err(Error::NoSuchElement));
        assert_eq!(d.peek(), None);
    }

    /// Invariant: the ring wraps and grows transparently; a workload
    /// larger than the initial capacity keeps order at both ends.
    #[test]
    fn wrap_and_grow() {
        let mut d: ArrayDeque<i32> = ArrayDeque::new();
        // Rotate to force head away from zero, then overfill.
        for i in 0..6 {
            d.add_last(i);
        }
        for _ in 0..4 {
            let v = d.poll_first().unwrap();
            d.add_last(v);
        }
        for i in 6..40 {
            d.add_last(i);
        }
        assert_eq!(d.len(), 40);
        let got: Vec<i32> = d.iter().copied().collect();
        let want: Vec<i32> = (4..6).chain(0..4).chain(6..40).collect();
        assert_eq!(got, want);
        assert!(d.contains(&39));
        d.clear();
        assert!(d.is_empty());
        assert_eq!(d.poll_first(), None);
    }

    /// Invariant: add_first wraps below index zero without losing
    /// elements.
    #[test]
    fn add_first_wraps() {
        let mut d: ArrayDeque<i32> = ArrayDeque::new();
        for i in 0..10 {
            d.add_first(i);
        }
        let got: Vec<i32> = d.iter().copied().collect();
        let want: Vec<i32> = (0..10).rev().collect();
        assert_eq!(got, want);
    }

    /// Invariant: the cursor fails fast on outside mutation at either
    /// end.
    #[test]
    fn cursor_fail_fast() {
        let mut d: ArrayDeque<i32> = (0..4).collect();
        let mut c = d.cursor();
        assert_eq!(c.next(&d), Ok(&0));
        d.poll_last();
        assert_eq!(c.next(&d), Err(Error::ConcurrentModification));

        let c = d.cursor();
        let mut sum = 0;
        c.for_each_remaining(&d, |v| sum += v).unwrap();
        assert_eq!(sum, 3);
    }
}
