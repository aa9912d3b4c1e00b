//! Sorted map: a red-black tree over a slotmap arena.
//!
//! Nodes are addressed by generational handles; child links own their
//! subtrees in the logical sense (removal detaches exactly one slot),
//! while parent links are explicit non-owning back-references used by
//! rebalancing and in-order stepping. The map owns the root. The three
//! balance invariants — root black, no red node with a red child,
//! equal black-height on every root-to-nil path — are restored after
//! every insert and remove and are independently checkable via
//! [`TreeMap::check_invariants`].
//!
//! Deletion uses the transplant form: when a node with two children is
//! removed, its in-order successor is relinked into the vacated
//! position rather than having its key and value copied down. Every
//! surviving node keeps its handle, which is what lets cursors keep
//! their place across their own `remove`.
//!
//! Range views and the descending view are live windows: they hold
//! bounds and an orientation, never data, and every operation takes the
//! backing map by reference.

use core::ops::Bound;

use slotmap::{DefaultKey, SlotMap};

use crate::cmp::{Comparator, Natural};
use crate::cursor::ModCount;
use crate::error::{Error, Result};
use crate::guard::ReentryCheck;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    Red,
    Black,
}

#[derive(Debug)]
struct Node<K, V> {
    key: K,
    value: V,
    color: Color,
    left: Option<DefaultKey>,
    right: Option<DefaultKey>,
    // Non-owning back-reference; kept consistent by the link editors.
    parent: Option<DefaultKey>,
}

pub struct TreeMap<K, V, C: Comparator<K> = Natural> {
    nodes: SlotMap<DefaultKey, Node<K, V>>,
    root: Option<DefaultKey>,
    cmp: C,
    mods: ModCount,
    reentry: ReentryCheck,
}

impl<K: Ord, V> TreeMap<K, V, Natural> {
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<K: Ord, V> Default for TreeMap<K, V, Natural> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for TreeMap<K, V, Natural> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut m = Self::new();
        for (k, v) in iter {
            m.put(k, v);
        }
        m
    }
}

impl<K, V, C: Comparator<K>> TreeMap<K, V, C> {
    /// Sorted map under an explicit total order.
    pub fn with_comparator(cmp: C) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root: None,
            cmp,
            mods: ModCount::new(),
            reentry: ReentryCheck::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Insert or replace; returns the previous value. Replacement is
    /// not a structural change.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let _g = self.reentry.enter();
        let mut cur = self.root;
        let mut parent = None;
        let mut went_left = false;
        while let Some(n) = cur {
            parent = Some(n);
            match self.cmp.compare(&key, &self.nodes[n].key) {
                core::cmp::Ordering::Less => {
                    cur = self.nodes[n].left;
                    went_left = true;
                }
                core::cmp::Ordering::Greater => {
                    cur = self.nodes[n].right;
                    went_left = false;
                }
                core::cmp::Ordering::Equal => {
                    return Some(core::mem::replace(&mut self.nodes[n].value, value));
                }
            }
        }
        let z = self.nodes.insert(Node {
            key,
            value,
            color: Color::Red,
            left: None,
            right: None,
            parent,
        });
        match parent {
            None => self.root = Some(z),
            Some(p) => {
                if went_left {
                    self.nodes[p].left = Some(z);
                } else {
                    self.nodes[p].right = Some(z);
                }
            }
        }
        self.insert_fixup(z);
        self.mods.bump();
        None
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.find_node(key).map(|n| &self.nodes[n].value)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.find_node(key).map(|n| &mut self.nodes[n].value)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.find_node(key).is_some()
    }

    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.nodes.values().any(|n| n.value == *value)
    }

    /// Remove a key; returns its value if present.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, v)| v)
    }

    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let z = self.find_node(key)?;
        let removed = self.delete_node(z);
        self.mods.bump();
        Some(removed)
    }

    pub fn clear(&mut self) {
        if !self.nodes.is_empty() {
            self.nodes.clear();
            self.root = None;
            self.mods.bump();
        }
    }

    // Navigation.

    pub fn first_entry(&self) -> Option<(&K, &V)> {
        self.min_node(self.root?).into_pair(self)
    }

    pub fn last_entry(&self) -> Option<(&K, &V)> {
        self.max_node(self.root?).into_pair(self)
    }

    /// Smallest entry with key >= the probe.
    pub fn ceiling_entry(&self, key: &K) -> Option<(&K, &V)> {
        self.ceiling_node(key)?.into_pair(self)
    }

    /// Largest entry with key <= the probe.
    pub fn floor_entry(&self, key: &K) -> Option<(&K, &V)> {
        self.floor_node(key)?.into_pair(self)
    }

    /// Smallest entry with key strictly greater than the probe.
    pub fn higher_entry(&self, key: &K) -> Option<(&K, &V)> {
        self.higher_node(key)?.into_pair(self)
    }

    /// Largest entry with key strictly less than the probe.
    pub fn lower_entry(&self, key: &K) -> Option<(&K, &V)> {
        self.lower_node(key)?.into_pair(self)
    }

    pub fn first_key(&self) -> Option<&K> {
        self.first_entry().map(|(k, _)| k)
    }

    pub fn last_key(&self) -> Option<&K> {
        self.last_entry().map(|(k, _)| k)
    }

    // Views.

    /// Live window over keys strictly (or inclusively) below `to`.
    pub fn head_map(&self, to: K, inclusive: bool) -> RangeView<K> {
        RangeView {
            low: Bound::Unbounded,
            high: if inclusive {
                Bound::Included(to)
            } else {
                Bound::Excluded(to)
            },
            descending: false,
        }
    }

    /// Live window over keys at (or strictly above) `from`.
    pub fn tail_map(&self, from: K, inclusive: bool) -> RangeView<K> {
        RangeView {
            low: if inclusive {
                Bound::Included(from)
            } else {
                Bound::Excluded(from)
            },
            high: Bound::Unbounded,
            descending: false,
        }
    }

    /// Live window between two bounds, each independently inclusive.
    pub fn sub_map(&self, from: K, from_inclusive: bool, to: K, to_inclusive: bool) -> Result<RangeView<K>> {
        if self.cmp.compare(&from, &to) == core::cmp::Ordering::Greater {
            return Err(Error::IllegalArgument("fromKey > toKey"));
        }
        Ok(RangeView {
            low: if from_inclusive {
                Bound::Included(from)
            } else {
                Bound::Excluded(from)
            },
            high: if to_inclusive {
                Bound::Included(to)
            } else {
                Bound::Excluded(to)
            },
            descending: false,
        })
    }

    /// Reversed live view over the same nodes.
    pub fn descending(&self) -> RangeView<K> {
        RangeView {
            low: Bound::Unbounded,
            high: Bound::Unbounded,
            descending: true,
        }
    }

    // Iteration.

    /// Borrow-checked in-order traversal.
    pub fn entries(&self) -> InOrderIter<'_, K, V, C> {
        InOrderIter {
            map: self,
            next: self.root.map(|r| self.min_node(r)),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries().map(|(_, v)| v)
    }

    /// Fail-fast ascending cursor.
    pub fn cursor(&self) -> Cursor<K, V> {
        Cursor {
            next: self.root.map(|r| self.min_node(r)),
            last: None,
            expected: self.mods.snapshot(),
            stop: None,
            descending: false,
            _pd: core::marker::PhantomData,
        }
    }

    /// Fail-fast descending cursor.
    pub fn descending_cursor(&self) -> Cursor<K, V> {
        Cursor {
            next: self.root.map(|r| self.max_node(r)),
            last: None,
            expected: self.mods.snapshot(),
            stop: None,
            descending: true,
            _pd: core::marker::PhantomData,
        }
    }

    // Internal structure.

    fn find_node(&self, key: &K) -> Option<DefaultKey> {
        let _g = self.reentry.enter();
        let mut cur = self.root;
        while let Some(n) = cur {
            cur = match self.cmp.compare(key, &self.nodes[n].key) {
                core::cmp::Ordering::Less => self.nodes[n].left,
                core::cmp::Ordering::Greater => self.nodes[n].right,
                core::cmp::Ordering::Equal => return Some(n),
            };
        }
        None
    }

    fn min_node(&self, mut n: DefaultKey) -> DefaultKey {
        while let Some(l) = self.nodes[n].left {
            n = l;
        }
        n
    }

    fn max_node(&self, mut n: DefaultKey) -> DefaultKey {
        while let Some(r) = self.nodes[n].right {
            n = r;
        }
        n
    }

    fn ceiling_node(&self, key: &K) -> Option<DefaultKey> {
        let _g = self.reentry.enter();
        let mut cur = self.root;
        let mut candidate = None;
        while let Some(n) = cur {
            match self.cmp.compare(key, &self.nodes[n].key) {
                core::cmp::Ordering::Less => {
                    candidate = Some(n);
                    cur = self.nodes[n].left;
                }
                core::cmp::Ordering::Equal => return Some(n),
                core::cmp::Ordering::Greater => cur = self.nodes[n].right,
            }
        }
        candidate
    }

    fn higher_node(&self, key: &K) -> Option<DefaultKey> {
        let _g = self.reentry.enter();
        let mut cur = self.root;
        let mut candidate = None;
        while let Some(n) = cur {
            match self.cmp.compare(key, &self.nodes[n].key) {
                core::cmp::Ordering::Less => {
                    candidate = Some(n);
                    cur = self.nodes[n].left;
                }
                _ => cur = self.nodes[n].right,
            }
        }
        candidate
    }

    fn floor_node(&self, key: &K) -> Option<DefaultKey> {
        let _g = self.reentry.enter();
        let mut cur = self.root;
        let mut candidate = None;
        while let Some(n) = cur {
            match self.cmp.compare(key, &self.nodes[n].key) {
                core::cmp::Ordering::Greater => {
                    candidate = Some(n);
                    cur = self.nodes[n].right;
                }
                core::cmp::Ordering::Equal => return Some(n),
                core::cmp::Ordering::Less => cur = self.nodes[n].left,
            }
        }
        candidate
    }

    fn lower_node(&self, key: &K) -> Option<DefaultKey> {
        let _g = self.reentry.enter();
        let mut cur = self.root;
        let mut candidate = None;
        while let Some(n) = cur {
            match self.cmp.compare(key, &self.nodes[n].key) {
                core::cmp::Ordering::Greater => {
                    candidate = Some(n);
                    cur = self.nodes[n].right;
                }
                _ => cur = self.nodes[n].left,
            }
        }
        candidate
    }

    fn successor(&self, n: DefaultKey) -> Option<DefaultKey> {
        if let Some(r) = self.nodes[n].right {
            return Some(self.min_node(r));
        }
        let mut cur = n;
        let mut p = self.nodes[cur].parent;
        while let Some(pp) = p {
            if self.nodes[pp].right == Some(cur) {
                cur = pp;
                p = self.nodes[cur].parent;
            } else {
                return Some(pp);
            }
        }
        None
    }

    fn predecessor(&self, n: DefaultKey) -> Option<DefaultKey> {
        if let Some(l) = self.nodes[n].left {
            return Some(self.max_node(l));
        }
        let mut cur = n;
        let mut p = self.nodes[cur].parent;
        while let Some(pp) = p {
            if self.nodes[pp].left == Some(cur) {
                cur = pp;
                p = self.nodes[cur].parent;
            } else {
                return Some(pp);
            }
        }
        None
    }

    fn color(&self, n: Option<DefaultKey>) -> Color {
        // Nil leaves are black.
        n.map(|k| self.nodes[k].color).unwrap_or(Color::Black)
    }

    fn rotate_left(&mut self, x: DefaultKey) {
        // Caller guarantees a right child.
        let y = self.nodes[x].right.unwrap();
        let y_left = self.nodes[y].left;
        self.nodes[x].right = y_left;
        if let Some(yl) = y_left {
            self.nodes[yl].parent = Some(x);
        }
        let xp = self.nodes[x].parent;
        self.nodes[y].parent = xp;
        match xp {
            None => self.root = Some(y),
            Some(p) => {
                if self.nodes[p].left == Some(x) {
                    self.nodes[p].left = Some(y);
                } else {
                    self.nodes[p].right = Some(y);
                }
            }
        }
        self.nodes[y].left = Some(x);
        self.nodes[x].parent = Some(y);
    }

    fn rotate_right(&mut self, x: DefaultKey) {
        // Caller guarantees a left child.
        let y = self.nodes[x].left.unwrap();
        let y_right = self.nodes[y].right;
        self.nodes[x].left = y_right;
        if let Some(yr) = y_right {
            self.nodes[yr].parent = Some(x);
        }
        let xp = self.nodes[x].parent;
        self.nodes[y].parent = xp;
        match xp {
            None => self.root = Some(y),
            Some(p) => {
                if self.nodes[p].left == Some(x) {
                    self.nodes[p].left = Some(y);
                } else {
                    self.nodes[p].right = Some(y);
                }
            }
        }
        self.nodes[y].right = Some(x);
        self.nodes[x].parent = Some(y);
    }

    fn insert_fixup(&mut self, mut z: DefaultKey) {
        while let Some(p) = self.nodes[z].parent {
            if self.nodes[p].color != Color::Red {
                break;
            }
            // A red parent is never the root, so the grandparent exists.
            let g = self.nodes[p].parent.unwrap();
            if self.nodes[g].left == Some(p) {
                let uncle = self.nodes[g].right;
                if self.color(uncle) == Color::Red {
                    self.nodes[p].color = Color::Black;
                    self.nodes[uncle.unwrap()].color = Color::Black;
                    self.nodes[g].color = Color::Red;
                    z = g;
                } else {
                    if self.nodes[p].right == Some(z) {
                        z = p;
                        self.rotate_left(z);
                    }
                    let p = self.nodes[z].parent.unwrap();
                    let g = self.nodes[p].parent.unwrap();
                    self.nodes[p].color = Color::Black;
                    self.nodes[g].color = Color::Red;
                    self.rotate_right(g);
                }
            } else {
                let uncle = self.nodes[g].left;
                if self.color(uncle) == Color::Red {
                    self.nodes[p].color = Color::Black;
                    self.nodes[uncle.unwrap()].color = Color::Black;
                    self.nodes[g].color = Color::Red;
                    z = g;
                } else {
                    if self.nodes[p].left == Some(z) {
                        z = p;
                        self.rotate_right(z);
                    }
                    let p = self.nodes[z].parent.unwrap();
                    let g = self.nodes[p].parent.unwrap();
                    self.nodes[p].color = Color::Black;
                    self.nodes[g].color = Color::Red;
                    self.rotate_left(g);
                }
            }
        }
        if let Some(r) = self.root {
            self.nodes[r].color = Color::Black;
        }
    }

    /// Replace the subtree rooted at `u` with `v` in `u`'s parent.
    fn transplant(&mut self, u: DefaultKey, v: Option<DefaultKey>) {
        let up = self.nodes[u].parent;
        match up {
            None => self.root = v,
            Some(p) => {
                if self.nodes[p].left == Some(u) {
                    self.nodes[p].left = v;
                } else {
                    self.nodes[p].right = v;
                }
            }
        }
        if let Some(v) = v {
            self.nodes[v].parent = up;
        }
    }

    /// Detach and return `z`'s entry, rebalancing afterwards. All other
    /// nodes keep their handles.
    fn delete_node(&mut self, z: DefaultKey) -> (K, V) {
        let mut removed_color = self.nodes[z].color;
        let fix_child;
        let fix_parent;

        if self.nodes[z].left.is_none() {
            fix_child = self.nodes[z].right;
            fix_parent = self.nodes[z].parent;
            self.transplant(z, fix_child);
        } else if self.nodes[z].right.is_none() {
            fix_child = self.nodes[z].left;
            fix_parent = self.nodes[z].parent;
            self.transplant(z, fix_child);
        } else {
            // Two children: relink the in-order successor into z's
            // position instead of copying its entry down.
            let y = self.min_node(self.nodes[z].right.unwrap());
            removed_color = self.nodes[y].color;
            fix_child = self.nodes[y].right;
            if self.nodes[y].parent == Some(z) {
                fix_parent = Some(y);
            } else {
                fix_parent = self.nodes[y].parent;
                self.transplant(y, self.nodes[y].right);
                let zr = self.nodes[z].right;
                self.nodes[y].right = zr;
                if let Some(zr) = zr {
                    self.nodes[zr].parent = Some(y);
                }
            }
            self.transplant(z, Some(y));
            let zl = self.nodes[z].left;
            self.nodes[y].left = zl;
            if let Some(zl) = zl {
                self.nodes[zl].parent = Some(y);
            }
            self.nodes[y].color = self.nodes[z].color;
        }

        // The slot is unlinked; reclaim it.
        let node = self.nodes.remove(z).unwrap();
        if removed_color == Color::Black {
            self.delete_fixup(fix_child, fix_parent);
        }
        (node.key, node.value)
    }

    fn delete_fixup(&mut self, mut x: Option<DefaultKey>, mut parent: Option<DefaultKey>) {
        while x != self.root && self.color(x) == Color::Black {
            let p = match parent {
                Some(p) => p,
                None => break,
            };
            if self.nodes[p].left == x {
                // The doubly-black side is shorter, so a sibling exists.
                let mut w = self.nodes[p].right.unwrap();
                if self.nodes[w].color == Color::Red {
                    self.nodes[w].color = Color::Black;
                    self.nodes[p].color = Color::Red;
                    self.rotate_left(p);
                    w = self.nodes[p].right.unwrap();
                }
                if self.color(self.nodes[w].left) == Color::Black
                    && self.color(self.nodes[w].right) == Color::Black
                {
                    self.nodes[w].color = Color::Red;
                    x = Some(p);
                    parent = self.nodes[p].parent;
                } else {
                    if self.color(self.nodes[w].right) == Color::Black {
                        let wl = self.nodes[w].left.unwrap();
                        self.nodes[wl].color = Color::Black;
                        self.nodes[w].color = Color::Red;
                        self.rotate_right(w);
                        w = self.nodes[p].right.unwrap();
                    }
                    self.nodes[w].color = self.nodes[p].color;
                    self.nodes[p].color = Color::Black;
                    let wr = self.nodes[w].right.unwrap();
                    self.nodes[wr].color = Color::Black;
                    self.rotate_left(p);
                    x = self.root;
                    parent = None;
                }
            } else {
                let mut w = self.nodes[p].left.unwrap();
                if self.nodes[w].color == Color::Red {
                    self.nodes[w].color = Color::Black;
                    self.nodes[p].color = Color::Red;
                    self.rotate_right(p);
                    w = self.nodes[p].left.unwrap();
                }
                if self.color(self.nodes[w].left) == Color::Black
                    && self.color(self.nodes[w].right) == Color::Black
                {
                    self.nodes[w].color = Color::Red;
                    x = Some(p);
                    parent = self.nodes[p].parent;
                } else {
                    if self.color(self.nodes[w].left) == Color::Black {
                        let wr = self.nodes[w].right.unwrap();
                        self.nodes[wr].color = Color::Black;
                        self.nodes[w].color = Color::Red;
                        self.rotate_left(w);
                        w = self.nodes[p].left.unwrap();
                    }
                    self.nodes[w].color = self.nodes[p].color;
                    self.nodes[p].color = Color::Black;
                    let wl = self.nodes[w].left.unwrap();
                    self.nodes[wl].color = Color::Black;
                    self.rotate_right(p);
                    x = self.root;
                    parent = None;
                }
            }
        }
        if let Some(x) = x {
            self.nodes[x].color = Color::Black;
        }
    }

    fn in_range(&self, key: &K, low: &Bound<K>, high: &Bound<K>) -> bool {
        let above_low = match low {
            Bound::Unbounded => true,
            Bound::Included(l) => self.cmp.compare(key, l) != core::cmp::Ordering::Less,
            Bound::Excluded(l) => self.cmp.compare(key, l) == core::cmp::Ordering::Greater,
        };
        let below_high = match high {
            Bound::Unbounded => true,
            Bound::Included(h) => self.cmp.compare(key, h) != core::cmp::Ordering::Greater,
            Bound::Excluded(h) => self.cmp.compare(key, h) == core::cmp::Ordering::Less,
        };
        above_low && below_high
    }

    /// First in-range node walking up from the low end (ascending) or
    /// down from the high end (descending).
    fn range_start(&self, view: &RangeView<K>) -> Option<DefaultKey> {
        let start = if view.descending {
            match &view.high {
                Bound::Unbounded => self.root.map(|r| self.max_node(r)),
                Bound::Included(h) => self.floor_node(h),
                Bound::Excluded(h) => self.lower_node(h),
            }
        } else {
            match &view.low {
                Bound::Unbounded => self.root.map(|r| self.min_node(r)),
                Bound::Included(l) => self.ceiling_node(l),
                Bound::Excluded(l) => self.higher_node(l),
            }
        }?;
        self.in_range(&self.nodes[start].key, &view.low, &view.high)
            .then_some(start)
    }

    /// Last in-range node in view order; the mirror of [`range_start`].
    ///
    /// [`range_start`]: TreeMap::range_start
    fn range_end(&self, view: &RangeView<K>) -> Option<DefaultKey> {
        let end = if view.descending {
            match &view.low {
                Bound::Unbounded => self.root.map(|r| self.min_node(r)),
                Bound::Included(l) => self.ceiling_node(l),
                Bound::Excluded(l) => self.higher_node(l),
            }
        } else {
            match &view.high {
                Bound::Unbounded => self.root.map(|r| self.max_node(r)),
                Bound::Included(h) => self.floor_node(h),
                Bound::Excluded(h) => self.lower_node(h),
            }
        }?;
        self.in_range(&self.nodes[end].key, &view.low, &view.high)
            .then_some(end)
    }

    /// Structural self-check: BST order under the comparator, parent
    /// link consistency, no red-red adjacency, equal black-height.
    pub(crate) fn check_invariants(&self) -> core::result::Result<usize, String> {
        let Some(root) = self.root else {
            return Ok(1);
        };
        if self.nodes[root].color != Color::Black {
            return Err("root is red".into());
        }
        if self.nodes[root].parent.is_some() {
            return Err("root has a parent".into());
        }
        self.check_subtree(root, None, None)
    }

    fn check_subtree(
        &self,
        n: DefaultKey,
        low: Option<&K>,
        high: Option<&K>,
    ) -> core::result::Result<usize, String> {
        let node = &self.nodes[n];
        if let Some(low) = low {
            if self.cmp.compare(&node.key, low) != core::cmp::Ordering::Greater {
                return Err("BST order violated (low)".into());
            }
        }
        if let Some(high) = high {
            if self.cmp.compare(&node.key, high) != core::cmp::Ordering::Less {
                return Err("BST order violated (high)".into());
            }
        }
        if node.color == Color::Red
            && (self.color(node.left) == Color::Red || self.color(node.right) == Color::Red)
        {
            return Err("red node with red child".into());
        }
        let bh_left = match node.left {
            Some(l) => {
                if self.nodes[l].parent != Some(n) {
                    return Err("left child parent link broken".into());
                }
                self.check_subtree(l, low, Some(&node.key))?
            }
            None => 1,
        };
        let bh_right = match node.right {
            Some(r) => {
                if self.nodes[r].parent != Some(n) {
                    return Err("right child parent link broken".into());
                }
                self.check_subtree(r, Some(&node.key), high)?
            }
            None => 1,
        };
        if bh_left != bh_right {
            return Err(format!("black-height mismatch: {bh_left} vs {bh_right}"));
        }
        Ok(bh_left + usize::from(node.color == Color::Black))
    }
}

/// Handle-to-pair helper keeping navigation methods terse.
trait IntoPair {
    fn into_pair<K, V, C: Comparator<K>>(self, map: &TreeMap<K, V, C>) -> Option<(&K, &V)>;
}

impl IntoPair for DefaultKey {
    fn into_pair<K, V, C: Comparator<K>>(self, map: &TreeMap<K, V, C>) -> Option<(&K, &V)> {
        map.nodes.get(self).map(|n| (&n.key, &n.value))
    }
}

/// A live window over a [`TreeMap`]: bounds plus orientation, no data.
/// Mutations through the view hit the backing map and are rejected with
/// [`Error::KeyOutOfRange`] when the key falls outside the bounds.
#[derive(Debug, Clone)]
pub struct RangeView<K> {
    low: Bound<K>,
    high: Bound<K>,
    descending: bool,
}

impl<K> RangeView<K> {
    pub fn contains_key<V, C: Comparator<K>>(&self, map: &TreeMap<K, V, C>, key: &K) -> bool {
        map.in_range(key, &self.low, &self.high) && map.contains_key(key)
    }

    pub fn get<'a, V, C: Comparator<K>>(&self, map: &'a TreeMap<K, V, C>, key: &K) -> Option<&'a V> {
        if !map.in_range(key, &self.low, &self.high) {
            return None;
        }
        map.get(key)
    }

    /// Insert through the view; the key must lie within the bounds.
    pub fn put<V, C: Comparator<K>>(
        &self,
        map: &mut TreeMap<K, V, C>,
        key: K,
        value: V,
    ) -> Result<Option<V>> {
        if !map.in_range(&key, &self.low, &self.high) {
            return Err(Error::KeyOutOfRange);
        }
        Ok(map.put(key, value))
    }

    /// Remove through the view; out-of-range keys are simply absent.
    pub fn remove<V, C: Comparator<K>>(&self, map: &mut TreeMap<K, V, C>, key: &K) -> Option<V> {
        if !map.in_range(key, &self.low, &self.high) {
            return None;
        }
        map.remove(key)
    }

    /// First entry in view order (lowest key ascending, highest
    /// descending).
    pub fn first_entry<'a, V, C: Comparator<K>>(
        &self,
        map: &'a TreeMap<K, V, C>,
    ) -> Option<(&'a K, &'a V)> {
        map.range_start(self)?.into_pair(map)
    }

    /// Last entry in view order.
    pub fn last_entry<'a, V, C: Comparator<K>>(
        &self,
        map: &'a TreeMap<K, V, C>,
    ) -> Option<(&'a K, &'a V)> {
        map.range_end(self)?.into_pair(map)
    }

    /// Number of entries inside the bounds; linear in the view size.
    pub fn len<V, C: Comparator<K>>(&self, map: &TreeMap<K, V, C>) -> usize
    where
        K: Clone,
    {
        let mut n = 0;
        let mut c = self.cursor(map);
        while c.has_next() {
            if c.next(map).is_err() {
                break;
            }
            n += 1;
        }
        n
    }

    pub fn is_empty<V, C: Comparator<K>>(&self, map: &TreeMap<K, V, C>) -> bool {
        map.range_start(self).is_none()
    }

    /// Fail-fast cursor over the view, in view order, checking the
    /// backing map's counter.
    pub fn cursor<V, C: Comparator<K>>(&self, map: &TreeMap<K, V, C>) -> Cursor<K, V>
    where
        K: Clone,
    {
        Cursor {
            next: map.range_start(self),
            last: None,
            expected: map.mods.snapshot(),
            stop: Some(if self.descending {
                self.low.clone()
            } else {
                self.high.clone()
            }),
            descending: self.descending,
            _pd: core::marker::PhantomData,
        }
    }
}

/// Fail-fast in-order cursor over a [`TreeMap`] or one of its views.
pub struct Cursor<K, V> {
    next: Option<DefaultKey>,
    last: Option<DefaultKey>,
    expected: u64,
    /// Bound at which stepping stops (high bound ascending, low bound
    /// descending); `None` for full-map cursors.
    stop: Option<Bound<K>>,
    descending: bool,
    _pd: core::marker::PhantomData<fn(&V)>,
}

impl<K, V> Cursor<K, V> {
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn next<'a, C: Comparator<K>>(&mut self, map: &'a TreeMap<K, V, C>) -> Result<(&'a K, &'a V)> {
        map.mods.check(self.expected)?;
        let handle = self.next.ok_or(Error::NoSuchElement)?;
        self.next = self.step(map, handle);
        self.last = Some(handle);
        handle.into_pair(map).ok_or(Error::ConcurrentModification)
    }

    fn step<C: Comparator<K>>(
        &self,
        map: &TreeMap<K, V, C>,
        from: DefaultKey,
    ) -> Option<DefaultKey> {
        let next = if self.descending {
            map.predecessor(from)?
        } else {
            map.successor(from)?
        };
        if let Some(stop) = &self.stop {
            let key = &map.nodes[next].key;
            let ok = if self.descending {
                match stop {
                    Bound::Unbounded => true,
                    Bound::Included(l) => map.cmp.compare(key, l) != core::cmp::Ordering::Less,
                    Bound::Excluded(l) => map.cmp.compare(key, l) == core::cmp::Ordering::Greater,
                }
            } else {
                match stop {
                    Bound::Unbounded => true,
                    Bound::Included(h) => map.cmp.compare(key, h) != core::cmp::Ordering::Greater,
                    Bound::Excluded(h) => map.cmp.compare(key, h) == core::cmp::Ordering::Less,
                }
            };
            if !ok {
                return None;
            }
        }
        Some(next)
    }

    /// Remove the entry last returned by `next`; the cursor itself
    /// stays valid because surviving nodes keep their handles.
    pub fn remove<C: Comparator<K>>(&mut self, map: &mut TreeMap<K, V, C>) -> Result<(K, V)> {
        let last = self
            .last
            .take()
            .ok_or(Error::IllegalState("remove before next"))?;
        map.mods.check(self.expected)?;
        if !map.nodes.contains_key(last) {
            return Err(Error::ConcurrentModification);
        }
        let removed = map.delete_node(last);
        map.mods.bump();
        self.expected = map.mods.snapshot();
        Ok(removed)
    }

    pub fn set_value<C: Comparator<K>>(&mut self, map: &mut TreeMap<K, V, C>, value: V) -> Result<V> {
        let last = self.last.ok_or(Error::IllegalState("set before next"))?;
        map.mods.check(self.expected)?;
        map.nodes
            .get_mut(last)
            .map(|n| core::mem::replace(&mut n.value, value))
            .ok_or(Error::ConcurrentModification)
    }

    pub fn for_each_remaining<C: Comparator<K>, F: FnMut(&K, &V)>(
        mut self,
        map: &TreeMap<K, V, C>,
        mut f: F,
    ) -> Result<()> {
        map.mods.check(self.expected)?;
        while let Some(handle) = self.next {
            self.next = self.step(map, handle);
            if let Some((k, v)) = handle.into_pair(map) {
                f(k, v);
            }
        }
        Ok(())
    }
}

/// Borrowing in-order iterator.
pub struct InOrderIter<'a, K, V, C: Comparator<K>> {
    map: &'a TreeMap<K, V, C>,
    next: Option<DefaultKey>,
}

impl<'a, K, V, C: Comparator<K>> Iterator for InOrderIter<'a, K, V, C> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.next?;
        self.next = self.map.successor(handle);
        handle.into_pair(self.map)
    }
}
