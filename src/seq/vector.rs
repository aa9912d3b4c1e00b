//! Legacy-surface vector and the stack built on it.
//!
//! [`Vector`] is the growable array core of [`ArrayList`] wearing the
//! older method names alongside the list surface; it derefs to the
//! list, so positional and cursor operations come through unchanged.
//! [`Stack`] narrows a vector to LIFO access with a 1-based `search`
//! from the top.

use core::ops::{Deref, DerefMut};

use crate::error::{Error, Result};
use crate::seq::array_list::ArrayList;

pub struct Vector<T> {
    list: ArrayList<T>,
}

impl<T> Vector<T> {
    pub fn new() -> Self {
        Self { list: ArrayList::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            list: ArrayList::with_capacity(capacity),
        }
    }

    // Legacy names; each is the list operation under its older name.

    pub fn element_at(&self, index: usize) -> Result<&T> {
        self.list.get(index)
    }

    pub fn add_element(&mut self, value: T) {
        self.list.add(value);
    }

    pub fn insert_element_at(&mut self, value: T, index: usize) -> Result<()> {
        self.list.insert(index, value)
    }

    pub fn remove_element_at(&mut self, index: usize) -> Result<T> {
        self.list.remove_at(index)
    }

    /// Remove the first occurrence; `false` if absent.
    pub fn remove_element(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.list.remove_item(value)
    }

    pub fn set_element_at(&mut self, value: T, index: usize) -> Result<T> {
        self.list.set(index, value)
    }

    pub fn first_element(&self) -> Result<&T> {
        self.list.get(0).map_err(|_| Error::NoSuchElement)
    }

    pub fn last_element(&self) -> Result<&T> {
        match self.list.len() {
            0 => Err(Error::NoSuchElement),
            n => self.list.get(n - 1),
        }
    }
}

impl<T> Deref for Vector<T> {
    type Target = ArrayList<T>;

    fn deref(&self) -> &ArrayList<T> {
        &self.list
    }
}

impl<T> DerefMut for Vector<T> {
    fn deref_mut(&mut self) -> &mut ArrayList<T> {
        &mut self.list
    }
}

impl<T> Default for Vector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            list: iter.into_iter().collect(),
        }
    }
}

/// LIFO stack over a [`Vector`]; the top is the highest index.
pub struct Stack<T> {
    vec: Vector<T>,
}

impl<T> Stack<T> {
    pub fn new() -> Self {
        Self { vec: Vector::new() }
    }

    pub fn len(&self) -> usize {
        self.vec.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }

    pub fn push(&mut self, value: T) {
        self.vec.add_element(value);
    }

    /// Remove and return the top element.
    pub fn pop(&mut self) -> Result<T> {
        match self.vec.len() {
            0 => Err(Error::NoSuchElement),
            n => self.vec.remove_element_at(n - 1),
        }
    }

    /// Look at the top element without removing it.
    pub fn peek(&self) -> Result<&T> {
        self.vec.last_element()
    }

    /// 1-based distance from the top of the stack to the first
    /// occurrence, or -1 when absent.
    pub fn search(&self, value: &T) -> i32
    where
        T: PartialEq,
    {
        match self.vec.last_index_of(value) {
            Some(i) => (self.vec.len() - i) as i32,
            None => -1,
        }
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}
