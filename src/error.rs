//! Error taxonomy shared by every container and numeric helper.
//!
//! Lookup-style absence is always `Option::None`, never an error. The
//! variants here cover contract violations only, and each is raised at
//! the point of violation; nothing is deferred or swallowed.

use thiserror::Error;

/// Contract-violation errors raised by containers and numeric helpers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed numeric string, or a radix outside 2..=36.
    #[error("number format: {0}")]
    NumberFormat(String),

    /// Index outside `0..size` (or `0..=size` for insert positions).
    #[error("index {index} out of bounds for size {size}")]
    IndexOutOfBounds { index: usize, size: usize },

    /// A cursor observed a structural mutation it did not perform.
    #[error("concurrent modification detected")]
    ConcurrentModification,

    /// A cursor stepped past its last element, or first/last was asked
    /// of an empty container.
    #[error("no such element")]
    NoSuchElement,

    /// Method called in a state where its contract forbids it, e.g.
    /// `remove` before `next` on a cursor.
    #[error("illegal state: {0}")]
    IllegalState(&'static str),

    /// Structurally invalid argument, e.g. an inverted sub-map range.
    #[error("illegal argument: {0}")]
    IllegalArgument(&'static str),

    /// Mutation through a range view with a key outside the view bounds.
    #[error("key outside of view range")]
    KeyOutOfRange,

    /// Mutating operation on a read-only view.
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),

    /// Division by zero and kin in 64-bit integer emulation.
    #[error("arithmetic: {0}")]
    Arithmetic(&'static str),
}

pub type Result<T> = core::result::Result<T, Error>;

/// Bounds check helper used by the index-based containers. `upper` is
/// exclusive.
#[inline]
pub(crate) fn check_index(index: usize, upper: usize) -> Result<()> {
    if index < upper {
        Ok(())
    } else {
        Err(Error::IndexOutOfBounds { index, size: upper })
    }
}

/// Like `check_index` but admits the one-past-the-end position, which
/// insert-style operations allow.
#[inline]
pub(crate) fn check_position(index: usize, len: usize) -> Result<()> {
    if index <= len {
        Ok(())
    } else {
        Err(Error::IndexOutOfBounds { index, size: len })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: bounds helpers agree on the interior and differ only
    /// at the one-past-the-end position.
    #[test]
    fn index_and_position_checks() {
        assert!(check_index(0, 1).is_ok());
        assert!(check_index(2, 3).is_ok());
        assert_eq!(
            check_index(3, 3),
            Err(Error::IndexOutOfBounds { index: 3, size: 3 })
        );
        assert!(check_position(3, 3).is_ok());
        assert_eq!(
            check_position(4, 3),
            Err(Error::IndexOutOfBounds { index: 4, size: 3 })
        );
    }

    /// Invariant: display strings carry the violating values so callers
    /// can report without re-deriving context.
    #[test]
    fn display_carries_payload() {
        let e = Error::IndexOutOfBounds { index: 7, size: 3 };
        assert_eq!(e.to_string(), "index 7 out of bounds for size 3");
        let e = Error::NumberFormat("for input string \"12a\"".into());
        assert!(e.to_string().contains("12a"));
    }
}
