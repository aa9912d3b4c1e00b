//! Modification counting: the shared piece of the fail-fast iteration
//! protocol.
//!
//! Every container embeds a [`ModCount`] and bumps it on structural
//! mutation (insert, remove, clear; never plain value replacement).
//! Every cursor snapshots the count when created and calls
//! [`ModCount::check`] before acting; a mismatch means the container
//! was mutated behind the cursor's back and surfaces deterministically
//! as [`Error::ConcurrentModification`] instead of corrupt traversal.
//!
//! A cursor's own `remove` is exempt by resynchronizing: it performs
//! the removal (which bumps the live count) and then re-snapshots, so
//! subsequent calls on the *same* cursor keep working while any other
//! live cursor over the container now fails.
//!
//! Cursors hold no borrow of their container; every method takes the
//! container by reference. That is what makes this protocol expressible
//! at all: a borrowing iterator could never witness a mutation, while a
//! handle-based cursor can outlive any number of them and must therefore
//! detect staleness itself.

use crate::error::{Error, Result};

/// Structural-modification counter embedded in each container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModCount(u64);

impl ModCount {
    pub(crate) const fn new() -> Self {
        ModCount(0)
    }

    /// Record one structural mutation.
    #[inline]
    pub(crate) fn bump(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }

    /// Snapshot for a newly created cursor.
    #[inline]
    pub(crate) fn snapshot(&self) -> u64 {
        self.0
    }

    /// Compare the live count against a cursor snapshot.
    #[inline]
    pub(crate) fn check(&self, expected: u64) -> Result<()> {
        if self.0 == expected {
            Ok(())
        } else {
            Err(Error::ConcurrentModification)
        }
    }
}
