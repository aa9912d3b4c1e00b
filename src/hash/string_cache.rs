//! Process-wide cache of computed string hash codes.
//!
//! String hashing walks every UTF-16 code unit, so repeated hashing of
//! the same key text is pure waste. The cache keeps two bounded
//! generations: lookups hit the new generation first, then the old one
//! (promoting on hit). When the new generation fills, the old one is
//! dropped wholesale and the generations swap, which bounds memory at
//! two generations' worth without any per-entry eviction bookkeeping.
//!
//! Lifecycle: a `thread_local!` singleton created on first use; no
//! teardown. Single logical thread of control, so no locking.

use core::cell::RefCell;
use hashbrown::HashMap;

/// Entries per generation. When `fresh` reaches this size the next
/// insert retires the stale generation.
const GENERATION_CAPACITY: usize = 256;

struct Generations {
    fresh: HashMap<Box<str>, i32>,
    stale: HashMap<Box<str>, i32>,
}

thread_local! {
    static CACHE: RefCell<Generations> = RefCell::new(Generations {
        fresh: HashMap::with_capacity(GENERATION_CAPACITY),
        stale: HashMap::new(),
    });
}

/// Hash code of a string: the classic `31 * h + c` fold over UTF-16
/// code units, in wrapping 32-bit arithmetic, memoized in the
/// two-generation cache.
pub fn string_hash_code(s: &str) -> i32 {
    CACHE.with(|cache| {
        let mut cache = cache.borrow_mut();
        if let Some(&h) = cache.fresh.get(s) {
            return h;
        }
        if let Some(&h) = cache.stale.get(s) {
            // Promote so a subsequent generation swap keeps hot keys.
            insert(&mut cache, s, h);
            return h;
        }
        let h = compute_string_hash(s);
        insert(&mut cache, s, h);
        h
    })
}

fn insert(cache: &mut Generations, s: &str, h: i32) {
    if cache.fresh.len() >= GENERATION_CAPACITY {
        cache.stale = core::mem::take(&mut cache.fresh);
        cache.fresh.reserve(GENERATION_CAPACITY);
    }
    cache.fresh.insert(Box::from(s), h);
}

/// The uncached fold; also the reference the cache is tested against.
fn compute_string_hash(s: &str) -> i32 {
    let mut h: i32 = 0;
    for unit in s.encode_utf16() {
        h = h.wrapping_mul(31).wrapping_add(unit as i32);
    }
    h
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: known hash values from the emulated algorithm.
    #[test]
    fn known_values() {
        assert_eq!(compute_string_hash(""), 0);
        assert_eq!(compute_string_hash("a"), 97);
        assert_eq!(compute_string_hash("ab"), 31 * 97 + 98);
        // Both famous collisions and a surrogate-pair case.
        assert_eq!(compute_string_hash("Aa"), compute_string_hash("BB"));
        // U+10400 encodes as the surrogate pair D801 DC00.
        assert_eq!(
            compute_string_hash("\u{10400}"),
            31i32.wrapping_mul(0xD801).wrapping_add(0xDC00)
        );
    }

    /// Invariant: cached and uncached paths agree, including after the
    /// cache has cycled through several generations.
    #[test]
    fn cache_agrees_with_reference() {
        for i in 0..(3 * GENERATION_CAPACITY) {
            let s = format!("key-{i}");
            assert_eq!(string_hash_code(&s), compute_string_hash(&s));
        }
        // Re-query early keys after the wholesale evictions.
        for i in 0..8 {
            let s = format!("key-{i}");
            assert_eq!(string_hash_code(&s), compute_string_hash(&s));
        }
    }
}
