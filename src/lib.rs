//! javu: single-threaded containers and boxed-numeric helpers with
//! Java-compatible semantics, built on handle-based storage.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: reproduce the observable semantics of the classic collection
//!   and boxed-numeric APIs in safe, verifiable layers so each piece
//!   can be reasoned about independently.
//! - Layers:
//!   - num: bit-exact numeric primitives (float/double bit conversions
//!     with NaN canonicalization, 64-bit arithmetic with checked
//!     division, radix parsing and formatting, boxed hash codes). Pure
//!     functions, no storage.
//!   - hash: the key policy layer. `HashKey` carries the 32-bit hash
//!     code and a routing tag; `DualStore<K, V>` keeps string-form keys
//!     in a text index and everything else in bucket chains over a
//!     slotmap arena, returning stable generational handles.
//!   - map / tree / seq: the container surfaces (hash map/set, linked
//!     map with eviction, identity map, red-black tree map/set with
//!     live views, lists, deques, the binary heap), each owning its
//!     storage and a modification counter.
//!   - cursor: the fail-fast iteration protocol shared by every
//!     container; cursors hold handles or positions, never borrows.
//!
//! Constraints
//! - Single-threaded: no atomics, no locks; identity hashes and the
//!   string-hash cache are thread-local.
//! - Stable, generational handles: arena storage means removal never
//!   moves surviving entries, which is what lets a cursor keep its
//!   place across its own `remove`.
//! - Structural changes (insert, remove, clear, order movement in
//!   access-ordered maps) bump the owning container's counter; value
//!   replacement does not. A cursor whose snapshot no longer matches
//!   fails with `ConcurrentModification` instead of observing a torn
//!   traversal.
//! - Exceptional outcomes are `Error` values, never panics: absent
//!   elements, out-of-range indices and keys, division by zero,
//!   unparsable numerals.
//!
//! Why this split?
//! - Localize invariants: the red-black balance rules live entirely in
//!   `tree::map`, the dual-routing rules entirely in `hash::store`,
//!   the counter protocol entirely in `cursor`.
//! - Equality policy rides in key types, not in container code:
//!   `Option<K>` for the null key, `IdentityKey` for reference
//!   identity, `BoxedDouble`/`BoxedFloat` for total float equality.
//!   The containers stay oblivious.
//! - Clear failure boundaries: storage layers never call into user
//!   code while their structure is transiently inconsistent; a
//!   debug-only reentrancy guard enforces this during probing and
//!   comparator calls.
//!
//! Hashing invariants
//! - Every stored entry keeps its precomputed 32-bit hash code; user
//!   hashing runs once per insert or probe, never during growth.
//! - String keys hash by the UTF-16 31-multiplier fold through a
//!   two-generation thread-local cache, so equal strings hash equally
//!   across all containers and repeated hashing of hot keys is cheap.
//!
//! Notes and non-goals
//! - No concurrent variants and no synchronized wrappers.
//! - No persistence or serialization of container state.
//! - Sorted containers take a `Comparator` type parameter defaulting
//!   to natural order; keys without a total order need an explicit
//!   comparator, they are not a runtime error.

pub mod cmp;
pub mod cursor;
pub mod error;
mod guard;
pub mod hash;
pub mod map;
pub mod num;
pub mod seq;
pub mod tree;

mod proptests;

// Public surface
pub use cmp::{Comparator, FnComparator, Natural, Reversed};
pub use error::{Error, Result};
pub use hash::{BoxedDouble, BoxedFloat, HashKey, IdentityKey};
pub use map::{CapacityEviction, EvictionPolicy, HashMap, HashSet, IdentityHashMap, KeepAll, LinkedHashMap};
pub use seq::{ArrayDeque, ArrayList, LinkedList, PriorityQueue, Stack, Vector};
pub use tree::{TreeMap, TreeSet};
