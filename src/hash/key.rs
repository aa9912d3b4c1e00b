//! The key abstraction for hash containers: a 32-bit hash code with the
//! emulated library's per-type algorithms, plus the routing tag that
//! sends string-like keys down the native-dictionary fast path.

use crate::num;

use super::string_cache::string_hash_code;

/// A hashable key. `hash_code` must obey the usual law with the type's
/// `Eq`: equal keys produce equal codes. `string_form` is the storage
/// router — keys that return `Some` are indexed in the string table,
/// everything else in the hash-code buckets; the choice is made once
/// per call at the container boundary.
pub trait HashKey {
    fn hash_code(&self) -> i32;

    fn string_form(&self) -> Option<&str> {
        None
    }
}

impl<K: HashKey + ?Sized> HashKey for &K {
    fn hash_code(&self) -> i32 {
        (**self).hash_code()
    }
    fn string_form(&self) -> Option<&str> {
        (**self).string_form()
    }
}

impl HashKey for str {
    fn hash_code(&self) -> i32 {
        string_hash_code(self)
    }
    fn string_form(&self) -> Option<&str> {
        Some(self)
    }
}

impl HashKey for String {
    fn hash_code(&self) -> i32 {
        string_hash_code(self)
    }
    fn string_form(&self) -> Option<&str> {
        Some(self)
    }
}

impl HashKey for Box<str> {
    fn hash_code(&self) -> i32 {
        string_hash_code(self)
    }
    fn string_form(&self) -> Option<&str> {
        Some(self)
    }
}

impl HashKey for bool {
    fn hash_code(&self) -> i32 {
        num::hash_bool(*self)
    }
}

impl HashKey for char {
    fn hash_code(&self) -> i32 {
        num::hash_char(*self)
    }
}

impl HashKey for i8 {
    fn hash_code(&self) -> i32 {
        num::hash_byte(*self)
    }
}

impl HashKey for i16 {
    fn hash_code(&self) -> i32 {
        num::hash_short(*self)
    }
}

impl HashKey for i32 {
    fn hash_code(&self) -> i32 {
        num::hash_int(*self)
    }
}

impl HashKey for i64 {
    fn hash_code(&self) -> i32 {
        num::hash_long(*self)
    }
}

impl HashKey for () {
    fn hash_code(&self) -> i32 {
        0
    }
}

/// `None` is the distinguished null-key sentinel: it hashes to 0 and
/// never routes to the string table.
impl<K: HashKey> HashKey for Option<K> {
    fn hash_code(&self) -> i32 {
        match self {
            Some(k) => k.hash_code(),
            None => 0,
        }
    }
    fn string_form(&self) -> Option<&str> {
        self.as_ref().and_then(HashKey::string_form)
    }
}

/// Boxed double: equality and hashing by canonical bit pattern, so NaN
/// equals NaN and +0.0 differs from -0.0, and a total `Ord` exists.
#[derive(Debug, Clone, Copy)]
pub struct BoxedDouble(pub f64);

impl PartialEq for BoxedDouble {
    fn eq(&self, other: &Self) -> bool {
        num::double_equals(self.0, other.0)
    }
}
impl Eq for BoxedDouble {}

impl PartialOrd for BoxedDouble {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for BoxedDouble {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        num::compare_double(&self.0, &other.0)
    }
}

impl HashKey for BoxedDouble {
    fn hash_code(&self) -> i32 {
        num::hash_double(self.0)
    }
}

/// Boxed float; same boxed semantics as [`BoxedDouble`].
#[derive(Debug, Clone, Copy)]
pub struct BoxedFloat(pub f32);

impl PartialEq for BoxedFloat {
    fn eq(&self, other: &Self) -> bool {
        num::float_equals(self.0, other.0)
    }
}
impl Eq for BoxedFloat {}

impl PartialOrd for BoxedFloat {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for BoxedFloat {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        num::compare_float(&self.0, &other.0)
    }
}

impl HashKey for BoxedFloat {
    fn hash_code(&self) -> i32 {
        num::hash_float(self.0)
    }
}
