//! Doubly-linked list over a slotmap arena.
//!
//! Nodes live in a generational arena and link to each other through
//! handles; the list owns the arena plus head and tail handles, so
//! there is no sentinel header node and no unsafe pointer juggling.
//! End operations are O(1); positional operations walk from the nearer
//! end. The bidirectional cursor holds node handles rather than
//! borrows, which is what lets it survive its own `remove` while still
//! failing fast on outside mutation.

use slotmap::{DefaultKey, SlotMap};

use crate::cursor::ModCount;
use crate::error::{check_index, check_position, Error, Result};

struct Node<T> {
    value: T,
    prev: Option<DefaultKey>,
    next: Option<DefaultKey>,
}

pub struct LinkedList<T> {
    nodes: SlotMap<DefaultKey, Node<T>>,
    head: Option<DefaultKey>,
    tail: Option<DefaultKey>,
    mods: ModCount,
}

impl<T> LinkedList<T> {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            head: None,
            tail: None,
            mods: ModCount::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn add_first(&mut self, value: T) {
        let old_head = self.head;
        let n = self.nodes.insert(Node {
            value,
            prev: None,
            next: old_head,
        });
        match old_head {
            Some(h) => self.nodes[h].prev = Some(n),
            None => self.tail = Some(n),
        }
        self.head = Some(n);
        self.mods.bump();
    }

    pub fn add_last(&mut self, value: T) {
        let old_tail = self.tail;
        let n = self.nodes.insert(Node {
            value,
            prev: old_tail,
            next: None,
        });
        match old_tail {
            Some(t) => self.nodes[t].next = Some(n),
            None => self.head = Some(n),
        }
        self.tail = Some(n);
        self.mods.bump();
    }

    pub fn peek_first(&self) -> Option<&T> {
        self.head.map(|h| &self.nodes[h].value)
    }

    pub fn peek_last(&self) -> Option<&T> {
        self.tail.map(|t| &self.nodes[t].value)
    }

    pub fn poll_first(&mut self) -> Option<T> {
        let h = self.head?;
        let v = self.unlink(h);
        self.mods.bump();
        Some(v)
    }

    pub fn poll_last(&mut self) -> Option<T> {
        let t = self.tail?;
        let v = self.unlink(t);
        self.mods.bump();
        Some(v)
    }

    pub fn remove_first(&mut self) -> Result<T> {
        self.poll_first().ok_or(Error::NoSuchElement)
    }

    pub fn remove_last(&mut self) -> Result<T> {
        self.poll_last().ok_or(Error::NoSuchElement)
    }

    // Queue and stack aliases over the end operations.

    /// Queue append; alias for `add_last`.
    pub fn add(&mut self, value: T) {
        self.add_last(value);
    }

    pub fn offer(&mut self, value: T) {
        self.add_last(value);
    }

    pub fn offer_first(&mut self, value: T) {
        self.add_first(value);
    }

    pub fn offer_last(&mut self, value: T) {
        self.add_last(value);
    }

    pub fn poll(&mut self) -> Option<T> {
        self.poll_first()
    }

    pub fn peek(&self) -> Option<&T> {
        self.peek_first()
    }

    /// Stack push; alias for `add_first`.
    pub fn push(&mut self, value: T) {
        self.add_first(value);
    }

    /// Stack pop from the head.
    pub fn pop(&mut self) -> Result<T> {
        self.remove_first()
    }

    // Positional surface; walks from the nearer end.

    pub fn get(&self, index: usize) -> Result<&T> {
        let n = self.node_at(index)?;
        Ok(&self.nodes[n].value)
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        let n = self.node_at(index)?;
        Ok(&mut self.nodes[n].value)
    }

    /// Insert at a position; `index == len` appends.
    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        check_position(index, self.nodes.len())?;
        if index == self.nodes.len() {
            self.add_last(value);
        } else if index == 0 {
            self.add_first(value);
        } else {
            let at = self.node_at(index)?;
            self.link_before(at, value);
            self.mods.bump();
        }
        Ok(())
    }

    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        let n = self.node_at(index)?;
        let v = self.unlink(n);
        self.mods.bump();
        Ok(v)
    }

    /// Remove the first occurrence; `false` if absent.
    pub fn remove_item(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        let mut cur = self.head;
        while let Some(n) = cur {
            if self.nodes[n].value == *value {
                self.unlink(n);
                self.mods.bump();
                return true;
            }
            cur = self.nodes[n].next;
        }
        false
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|v| v == value)
    }

    pub fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().position(|v| v == value)
    }

    pub fn clear(&mut self) {
        if !self.nodes.is_empty() {
            self.nodes.clear();
            self.head = None;
            self.tail = None;
            self.mods.bump();
        }
    }

    /// Borrowing front-to-back iterator.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            next: self.head,
        }
    }

    /// Bidirectional fail-fast cursor positioned before the first
    /// element.
    pub fn cursor(&self) -> ListCursor<T> {
        ListCursor {
            next: self.head,
            index: 0,
            last: None,
            expected: self.mods.snapshot(),
            _pd: core::marker::PhantomData,
        }
    }

    /// Cursor positioned before `index`; `index == len` starts at the
    /// end.
    pub fn cursor_at(&self, index: usize) -> Result<ListCursor<T>> {
        check_position(index, self.nodes.len())?;
        let next = if index == self.nodes.len() {
            None
        } else {
            Some(self.node_at(index)?)
        };
        Ok(ListCursor {
            next,
            index,
            last: None,
            expected: self.mods.snapshot(),
            _pd: core::marker::PhantomData,
        })
    }

    fn node_at(&self, index: usize) -> Result<DefaultKey> {
        check_index(index, self.nodes.len())?;
        let len = self.nodes.len();
        let n = if index < len / 2 {
            let mut cur = self.head;
            for _ in 0..index {
                cur = self.nodes[cur.unwrap()].next;
            }
            cur
        } else {
            let mut cur = self.tail;
            for _ in 0..(len - 1 - index) {
                cur = self.nodes[cur.unwrap()].prev;
            }
            cur
        };
        // In range per the check above, so the walk lands on a node.
        Ok(n.unwrap())
    }

    fn link_before(&mut self, at: DefaultKey, value: T) {
        let prev = self.nodes[at].prev;
        let n = self.nodes.insert(Node {
            value,
            prev,
            next: Some(at),
        });
        self.nodes[at].prev = Some(n);
        match prev {
            Some(p) => self.nodes[p].next = Some(n),
            None => self.head = Some(n),
        }
    }

    /// Detach a node and reclaim its slot; caller bumps the counter.
    fn unlink(&mut self, n: DefaultKey) -> T {
        let node = self.nodes.remove(n).unwrap();
        match node.prev {
            Some(p) => self.nodes[p].next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(x) => self.nodes[x].prev = node.prev,
            None => self.tail = node.prev,
        }
        node.value
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut l = Self::new();
        for v in iter {
            l.add_last(v);
        }
        l
    }
}

pub struct Iter<'a, T> {
    list: &'a LinkedList<T>,
    next: Option<DefaultKey>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.next?;
        let node = &self.list.nodes[n];
        self.next = node.next;
        Some(&node.value)
    }
}

/// Bidirectional cursor over node handles. Sits between nodes: `next`
/// is the handle the forward step would visit, `None` at the end.
pub struct ListCursor<T> {
    next: Option<DefaultKey>,
    index: usize,
    last: Option<DefaultKey>,
    expected: u64,
    _pd: core::marker::PhantomData<fn(&T)>,
}

impl<T> ListCursor<T> {
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn has_previous(&self, list: &LinkedList<T>) -> bool {
        match self.next {
            Some(n) => list.nodes[n].prev.is_some(),
            None => list.tail.is_some(),
        }
    }

    pub fn next_index(&self) -> usize {
        self.index
    }

    pub fn previous_index(&self) -> Option<usize> {
        self.index.checked_sub(1)
    }

    pub fn next<'a>(&mut self, list: &'a LinkedList<T>) -> Result<&'a T> {
        list.mods.check(self.expected)?;
        let n = self.next.ok_or(Error::NoSuchElement)?;
        self.next = list.nodes[n].next;
        self.index += 1;
        self.last = Some(n);
        Ok(&list.nodes[n].value)
    }

    pub fn previous<'a>(&mut self, list: &'a LinkedList<T>) -> Result<&'a T> {
        list.mods.check(self.expected)?;
        let p = match self.next {
            Some(n) => list.nodes[n].prev,
            None => list.tail,
        }
        .ok_or(Error::NoSuchElement)?;
        self.next = Some(p);
        self.index -= 1;
        self.last = Some(p);
        Ok(&list.nodes[p].value)
    }

    /// Remove the node last returned; at most once per `next` or
    /// `previous`.
    pub fn remove(&mut self, list: &mut LinkedList<T>) -> Result<T> {
        list.mods.check(self.expected)?;
        let n = self
            .last
            .take()
            .ok_or(Error::IllegalState("remove before next or previous"))?;
        if self.next == Some(n) {
            // Last came from previous(); step the cursor off the node.
            self.next = list.nodes[n].next;
        } else {
            self.index -= 1;
        }
        let v = list.unlink(n);
        list.mods.bump();
        self.expected = list.mods.snapshot();
        Ok(v)
    }

    /// Replace the value last returned. Not a structural change.
    pub fn set(&mut self, list: &mut LinkedList<T>, value: T) -> Result<T> {
        list.mods.check(self.expected)?;
        let n = self.last.ok_or(Error::IllegalState("set before next or previous"))?;
        Ok(core::mem::replace(&mut list.nodes[n].value, value))
    }

    /// Insert before the cursor position.
    pub fn add(&mut self, list: &mut LinkedList<T>, value: T) -> Result<()> {
        list.mods.check(self.expected)?;
        match self.next {
            Some(n) => {
                list.link_before(n, value);
                list.mods.bump();
            }
            None => list.add_last(value),
        }
        self.index += 1;
        self.last = None;
        self.expected = list.mods.snapshot();
        Ok(())
    }

    pub fn for_each_remaining<F: FnMut(&T)>(mut self, list: &LinkedList<T>, mut f: F) -> Result<()> {
        list.mods.check(self.expected)?;
        while let Some(n) = self.next {
            let node = &list.nodes[n];
            self.next = node.next;
            f(&node.value);
        }
        Ok(())
    }
}
