//! Debug-only reentry check.
//!
//! Container internals call back into user code in exactly three places:
//! `HashKey::hash_code`, `Eq` during bucket probing, and
//! `Comparator::compare` during tree descent. If that user code turns
//! around and calls back into the same container while its structure is
//! transiently inconsistent, the result would be silent corruption. In
//! debug builds, entering a guarded section twice panics immediately;
//! in release builds this compiles to a zero-cost no-op.

use core::cell::Cell;
use core::marker::PhantomData;

/// Per-container reentry tracker. Guard entry points that may run user
/// code with `let _g = self.reentry.enter();`.
#[derive(Debug)]
pub(crate) struct ReentryCheck {
    #[cfg(debug_assertions)]
    depth: Cell<u32>,
    // Keeps containers !Send + !Sync, matching the single-threaded model.
    _nosend: PhantomData<*mut ()>,
}

impl ReentryCheck {
    pub(crate) const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            depth: Cell::new(0),
            _nosend: PhantomData,
        }
    }

    /// Enter a guarded section; panics in debug builds if already inside.
    ///
    /// The guard holds a raw pointer rather than a reference so that the
    /// caller can keep taking `&mut self` while the guard is live; it must
    /// not outlive `self` (always bind it as a local `let _g`).
    #[inline]
    pub(crate) fn enter(&self) -> ReentryGuard {
        #[cfg(debug_assertions)]
        {
            let d = self.depth.get();
            assert!(d == 0, "reentrant call into container during mutation");
            self.depth.set(d + 1);
            return ReentryGuard {
                owner: self as *const ReentryCheck,
            };
        }

        #[cfg(not(debug_assertions))]
        {
            ReentryGuard { _z: PhantomData }
        }
    }
}

impl Default for ReentryCheck {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) struct ReentryGuard {
    #[cfg(debug_assertions)]
    owner: *const ReentryCheck,
    #[cfg(not(debug_assertions))]
    _z: PhantomData<()>,
}

impl Drop for ReentryGuard {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        {
            // SAFETY: guards are only created via `enter` and bound as locals
            // inside methods of the owning container, so the check outlives
            // the guard.
            let owner = unsafe { &*self.owner };
            let d = owner.depth.get();
            debug_assert!(d > 0);
            owner.depth.set(d - 1);
        }
    }
}
