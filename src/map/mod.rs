//! Hash-based containers: value-equality map and set, the
//! deterministic-order linked map with its eviction hook, and the
//! reference-identity map.

pub mod hash_map;
pub mod hash_set;
mod identity;
pub mod linked;

pub use hash_map::HashMap;
pub use hash_set::HashSet;
pub use identity::IdentityHashMap;
pub use linked::{CapacityEviction, EvictionPolicy, KeepAll, LinkedHashMap};
