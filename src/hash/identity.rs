//! Reference-identity keys and the process-wide identity-hash counter.
//!
//! The counter is a `thread_local!` singleton: monotonically increasing,
//! initialized on first use, never reset. A key's identity hash is
//! assigned lazily on first request and memoized on the shared
//! allocation, so every map that holds a clone of the same key observes
//! the same hash, and the value is never reused while any clone keeps
//! the allocation reachable.

use core::cell::Cell;
use core::fmt;
use std::rc::Rc;

use crate::hash::HashKey;

thread_local! {
    static NEXT_IDENTITY_HASH: Cell<i32> = const { Cell::new(1) };
}

fn next_identity_hash() -> i32 {
    NEXT_IDENTITY_HASH.with(|c| {
        let h = c.get();
        c.set(h.wrapping_add(1));
        h
    })
}

struct IdentityCell<T: ?Sized> {
    // 0 means unassigned; the counter starts at 1 and never yields 0.
    hash: Cell<i32>,
    value: T,
}

/// A key compared by reference identity, not value equality. Cloning an
/// `IdentityKey` shares the underlying allocation; two independently
/// created keys are never equal even if their values are.
pub struct IdentityKey<T: ?Sized>(Rc<IdentityCell<T>>);

impl<T> IdentityKey<T> {
    pub fn new(value: T) -> Self {
        IdentityKey(Rc::new(IdentityCell {
            hash: Cell::new(0),
            value,
        }))
    }
}

impl<T: ?Sized> IdentityKey<T> {
    pub fn value(&self) -> &T {
        &self.0.value
    }

    /// The identity hash, assigned from the process-wide counter on
    /// first request.
    pub fn identity_hash(&self) -> i32 {
        let h = self.0.hash.get();
        if h != 0 {
            return h;
        }
        let h = next_identity_hash();
        self.0.hash.set(h);
        h
    }

    /// Whether two keys designate the same object.
    pub fn same(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: ?Sized> Clone for IdentityKey<T> {
    fn clone(&self) -> Self {
        IdentityKey(Rc::clone(&self.0))
    }
}

impl<T: ?Sized> PartialEq for IdentityKey<T> {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl<T: ?Sized> Eq for IdentityKey<T> {}

impl<T: ?Sized> HashKey for IdentityKey<T> {
    fn hash_code(&self) -> i32 {
        self.identity_hash()
    }
    // No string_form: identity keys always take the hash-code route,
    // even when they wrap string data.
}

impl<T: fmt::Debug + ?Sized> fmt::Debug for IdentityKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IdentityKey").field(&&self.0.value).finish()
    }
}
