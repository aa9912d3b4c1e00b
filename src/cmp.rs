//! Total-order comparator abstraction supplied by callers.
//!
//! The sorted containers are parameterized over a [`Comparator`] the
//! same way the hash containers are parameterized over `BuildHasher`:
//! the policy rides in the type, defaulting to [`Natural`] ordering.
//! Types without a total `Ord` (notably floats) get one by passing an
//! explicit comparator such as a closure over
//! [`compare_double`](crate::num::compare_double).

use core::cmp::Ordering;
use core::marker::PhantomData;

/// A total order over `T`. Implementations must be consistent: for the
/// sorted containers to behave, `compare` must define a strict weak
/// ordering that never changes while elements are stored.
pub trait Comparator<T: ?Sized> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// Natural ordering via `Ord`. The zero-sized default for every sorted
/// container; incomparable key types simply do not satisfy the bound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Natural;

impl<T: Ord + ?Sized> Comparator<T> for Natural {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// Reverses the order of an inner comparator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reversed<C>(pub C);

impl<T: ?Sized, C: Comparator<T>> Comparator<T> for Reversed<C> {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self.0.compare(b, a)
    }
}

/// Comparator from a plain ordering function.
#[derive(Debug, Clone, Copy)]
pub struct FnComparator<F, T: ?Sized> {
    f: F,
    _pd: PhantomData<fn(&T)>,
}

impl<T: ?Sized, F: Fn(&T, &T) -> Ordering> FnComparator<F, T> {
    pub fn new(f: F) -> Self {
        Self { f, _pd: PhantomData }
    }
}

impl<T: ?Sized, F: Fn(&T, &T) -> Ordering> Comparator<T> for FnComparator<F, T> {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.f)(a, b)
    }
}
