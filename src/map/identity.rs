//! Reference-identity hash map.
//!
//! The equality policy rides in the key type: [`IdentityKey`] compares
//! by pointer identity and hashes from the process-wide identity
//! counter, so the whole `HashMap` surface (including cursors and the
//! fail-fast protocol) applies unchanged. Two keys wrapping equal
//! values but distinct allocations are distinct map keys.

use crate::hash::IdentityKey;
use crate::map::hash_map::HashMap;

pub type IdentityHashMap<T, V> = HashMap<IdentityKey<T>, V>;
