//! Hashing infrastructure: the key abstraction with its dual routing
//! strategy, the string-hash cache, reference-identity keys, and the
//! shared entry store every hash container is built on.

mod identity;
mod key;
pub(crate) mod store;
mod string_cache;

pub use identity::IdentityKey;
pub use key::{BoxedDouble, BoxedFloat, HashKey};
pub use string_cache::string_hash_code;
