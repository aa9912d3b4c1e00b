//! Growable array list with positional access and a bidirectional
//! fail-fast cursor.
//!
//! Backed by a plain `Vec`; what this layer adds is the checked index
//! surface (out-of-range access is an [`Error::IndexOutOfBounds`]
//! value, never a panic) and the modification-counter protocol shared
//! by all containers in this crate. Element replacement via `set` is
//! not a structural change; insertion and removal are.

use crate::cursor::ModCount;
use crate::error::{check_index, check_position, Error, Result};

pub struct ArrayList<T> {
    items: Vec<T>,
    mods: ModCount,
}

impl<T> ArrayList<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            mods: ModCount::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            mods: ModCount::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append to the end.
    pub fn add(&mut self, value: T) {
        self.items.push(value);
        self.mods.bump();
    }

    /// Insert at a position; `index == len` appends.
    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        check_position(index, self.items.len())?;
        self.items.insert(index, value);
        self.mods.bump();
        Ok(())
    }

    pub fn get(&self, index: usize) -> Result<&T> {
        check_index(index, self.items.len())?;
        Ok(&self.items[index])
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        check_index(index, self.items.len())?;
        Ok(&mut self.items[index])
    }

    /// Replace the element at a position, returning the old one. Not a
    /// structural change.
    pub fn set(&mut self, index: usize, value: T) -> Result<T> {
        check_index(index, self.items.len())?;
        Ok(core::mem::replace(&mut self.items[index], value))
    }

    /// Remove by position, shifting the tail left.
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        check_index(index, self.items.len())?;
        let v = self.items.remove(index);
        self.mods.bump();
        Ok(v)
    }

    /// Remove the first occurrence; `false` if absent.
    pub fn remove_item(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        match self.index_of(value) {
            Some(i) => {
                self.items.remove(i);
                self.mods.bump();
                true
            }
            None => false,
        }
    }

    pub fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.items.iter().position(|v| v == value)
    }

    pub fn last_index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.items.iter().rposition(|v| v == value)
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.index_of(value).is_some()
    }

    pub fn clear(&mut self) {
        if !self.items.is_empty() {
            self.items.clear();
            self.mods.bump();
        }
    }

    pub fn add_all<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let before = self.items.len();
        self.items.extend(iter);
        if self.items.len() != before {
            self.mods.bump();
        }
    }

    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Bidirectional fail-fast cursor positioned before the first
    /// element.
    pub fn cursor(&self) -> ListCursor<T> {
        ListCursor {
            pos: 0,
            last: None,
            expected: self.mods.snapshot(),
            _pd: core::marker::PhantomData,
        }
    }

    /// Cursor positioned before `index`; `index == len` starts at the
    /// end.
    pub fn cursor_at(&self, index: usize) -> Result<ListCursor<T>> {
        check_position(index, self.items.len())?;
        Ok(ListCursor {
            pos: index,
            last: None,
            expected: self.mods.snapshot(),
            _pd: core::marker::PhantomData,
        })
    }

}

impl<T> Default for ArrayList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for ArrayList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut l = Self::new();
        l.add_all(iter);
        l
    }
}

impl<'a, T> IntoIterator for &'a ArrayList<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Bidirectional positional cursor. Sits between elements: `pos` is
/// the index `next` would return. `set` and `remove` act on the
/// element last returned by `next` or `previous`; the cursor's own
/// structural edits resynchronize, outside edits fail the next call.
pub struct ListCursor<T> {
    pos: usize,
    last: Option<usize>,
    expected: u64,
    _pd: core::marker::PhantomData<fn(&T)>,
}

impl<T> ListCursor<T> {
    pub fn has_next(&self, list: &ArrayList<T>) -> bool {
        self.pos < list.items.len()
    }

    pub fn has_previous(&self) -> bool {
        self.pos > 0
    }

    /// Index of the element `next` would return.
    pub fn next_index(&self) -> usize {
        self.pos
    }

    /// Index of the element `previous` would return, if any.
    pub fn previous_index(&self) -> Option<usize> {
        self.pos.checked_sub(1)
    }

    pub fn next<'a>(&mut self, list: &'a ArrayList<T>) -> Result<&'a T> {
        list.mods.check(self.expected)?;
        if self.pos >= list.items.len() {
            return Err(Error::NoSuchElement);
        }
        let i = self.pos;
        self.pos += 1;
        self.last = Some(i);
        Ok(&list.items[i])
    }

    pub fn previous<'a>(&mut self, list: &'a ArrayList<T>) -> Result<&'a T> {
        list.mods.check(self.expected)?;
        if self.pos == 0 {
            return Err(Error::NoSuchElement);
        }
        self.pos -= 1;
        self.last = Some(self.pos);
        Ok(&list.items[self.pos])
    }

    /// Remove the element last returned; at most once per `next` or
    /// `previous`.
    pub fn remove(&mut self, list: &mut ArrayList<T>) -> Result<T> {
        list.mods.check(self.expected)?;
        let i = self
            .last
            .take()
            .ok_or(Error::IllegalState("remove before next or previous"))?;
        let v = list.items.remove(i);
        if i < self.pos {
            self.pos -= 1;
        }
        list.mods.bump();
        self.expected = list.mods.snapshot();
        Ok(v)
    }

    /// Replace the element last returned; returns the old value. Not a
    /// structural change.
    pub fn set(&mut self, list: &mut ArrayList<T>, value: T) -> Result<T> {
        list.mods.check(self.expected)?;
        let i = self.last.ok_or(Error::IllegalState("set before next or previous"))?;
        Ok(core::mem::replace(&mut list.items[i], value))
    }

    /// Insert before the cursor position; the new element would be
    /// returned by `previous`, not `next`.
    pub fn add(&mut self, list: &mut ArrayList<T>, value: T) -> Result<()> {
        list.mods.check(self.expected)?;
        list.items.insert(self.pos, value);
        self.pos += 1;
        self.last = None;
        list.mods.bump();
        self.expected = list.mods.snapshot();
        Ok(())
    }

    pub fn for_each_remaining<F: FnMut(&T)>(mut self, list: &ArrayList<T>, mut f: F) -> Result<()> {
        list.mods.check(self.expected)?;
        while self.pos < list.items.len() {
            f(&list.items[self.pos]);
            self.pos += 1;
        }
        Ok(())
    }
}
