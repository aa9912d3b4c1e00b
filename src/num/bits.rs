//! Bit-exact conversions between floating-point values and their
//! fixed-width integer bit patterns, plus the boxed hash-code and
//! equality algorithms every hash container downstream depends on.
//!
//! The canonicalizing conversions collapse every NaN payload to the one
//! canonical quiet NaN (`0x7ff8_0000_0000_0000` for doubles,
//! `0x7fc0_0000` for floats); the `raw` variants pass payloads through
//! untouched. Boxed equality compares canonical bits, which is why a
//! boxed NaN equals a boxed NaN and `+0.0` does not equal `-0.0`, the
//! exact opposite of the primitive IEEE-754 comparisons.

use core::cmp::Ordering;

/// Canonical quiet-NaN bit pattern for doubles.
const DOUBLE_NAN_BITS: i64 = 0x7ff8_0000_0000_0000;
/// Canonical quiet-NaN bit pattern for floats.
const FLOAT_NAN_BITS: i32 = 0x7fc0_0000;

/// Bits of `d`, with every NaN collapsed to the canonical quiet NaN.
#[inline]
pub fn double_to_long_bits(d: f64) -> i64 {
    if d.is_nan() {
        DOUBLE_NAN_BITS
    } else {
        d.to_bits() as i64
    }
}

/// Bits of `d`, NaN payloads preserved.
#[inline]
pub fn double_to_raw_long_bits(d: f64) -> i64 {
    d.to_bits() as i64
}

/// Inverse of the bit conversions; total over all bit patterns.
#[inline]
pub fn long_bits_to_double(bits: i64) -> f64 {
    f64::from_bits(bits as u64)
}

/// Bits of `f`, with every NaN collapsed to the canonical quiet NaN.
#[inline]
pub fn float_to_int_bits(f: f32) -> i32 {
    if f.is_nan() {
        FLOAT_NAN_BITS
    } else {
        f.to_bits() as i32
    }
}

/// Bits of `f`, NaN payloads preserved.
#[inline]
pub fn float_to_raw_int_bits(f: f32) -> i32 {
    f.to_bits() as i32
}

#[inline]
pub fn int_bits_to_float(bits: i32) -> f32 {
    f32::from_bits(bits as u32)
}

// Boxed hash codes. These must match the source algorithms bit-for-bit
// because stored entries are located by them.

#[inline]
pub fn hash_int(v: i32) -> i32 {
    v
}

/// `(int)(v ^ (v >>> 32))`.
#[inline]
pub fn hash_long(v: i64) -> i32 {
    (v ^ ((v as u64) >> 32) as i64) as i32
}

#[inline]
pub fn hash_short(v: i16) -> i32 {
    v as i32
}

#[inline]
pub fn hash_byte(v: i8) -> i32 {
    v as i32
}

#[inline]
pub fn hash_bool(v: bool) -> i32 {
    if v {
        1231
    } else {
        1237
    }
}

#[inline]
pub fn hash_char(v: char) -> i32 {
    v as i32
}

/// Hash of a boxed float: its canonical bit pattern.
#[inline]
pub fn hash_float(v: f32) -> i32 {
    float_to_int_bits(v)
}

/// Hash of a boxed double: `hash_long` of its canonical bit pattern.
#[inline]
pub fn hash_double(v: f64) -> i32 {
    hash_long(double_to_long_bits(v))
}

/// Boxed-double equality: canonical-bit equality. NaN == NaN,
/// +0.0 != -0.0.
#[inline]
pub fn double_equals(a: f64, b: f64) -> bool {
    double_to_long_bits(a) == double_to_long_bits(b)
}

/// Boxed-float equality, same rules as [`double_equals`].
#[inline]
pub fn float_equals(a: f32, b: f32) -> bool {
    float_to_int_bits(a) == float_to_int_bits(b)
}

/// Total order over doubles: -0.0 < +0.0, every NaN greater than
/// +Infinity and equal to every other NaN.
#[inline]
pub fn compare_double(a: &f64, b: &f64) -> Ordering {
    if a < b {
        Ordering::Less
    } else if a > b {
        Ordering::Greater
    } else {
        // Neither strictly ordered: zeros of differing sign or NaN
        // involved. Canonical bits order both cases correctly.
        double_to_long_bits(*a).cmp(&double_to_long_bits(*b))
    }
}

/// Total order over floats, same rules as [`compare_double`].
#[inline]
pub fn compare_float(a: &f32, b: &f32) -> Ordering {
    if a < b {
        Ordering::Less
    } else if a > b {
        Ordering::Greater
    } else {
        float_to_int_bits(*a).cmp(&float_to_int_bits(*b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: bit conversions round-trip exactly for finite values,
    /// signed zeros, and infinities.
    #[test]
    fn double_bits_round_trip() {
        for d in [
            0.0f64,
            -0.0,
            1.0,
            -1.5,
            f64::MIN_POSITIVE,
            f64::MAX,
            f64::MIN,
            f64::INFINITY,
            f64::NEG_INFINITY,
            5e-324, // smallest subnormal
        ] {
            let bits = double_to_long_bits(d);
            assert_eq!(long_bits_to_double(bits).to_bits(), d.to_bits());
        }
    }

    /// Invariant: every NaN canonicalizes, raw bits survive, and the
    /// round-trip of canonical bits is still a NaN.
    #[test]
    fn nan_canonicalization() {
        let weird = f64::from_bits(0x7ff4_dead_beef_0001);
        assert!(weird.is_nan());
        assert_eq!(double_to_long_bits(weird), 0x7ff8_0000_0000_0000);
        assert_eq!(double_to_raw_long_bits(weird) as u64, 0x7ff4_dead_beef_0001);
        assert!(long_bits_to_double(double_to_long_bits(weird)).is_nan());

        let weird = f32::from_bits(0x7fa0_0001);
        assert!(weird.is_nan());
        assert_eq!(float_to_int_bits(weird), 0x7fc0_0000);
        assert_eq!(float_to_raw_int_bits(weird) as u32, 0x7fa0_0001);
    }

    /// Invariant: boxed equality is the opposite of primitive equality
    /// on the two famous edge cases.
    #[test]
    fn boxed_equality_edges() {
        assert!(double_equals(f64::NAN, f64::NAN));
        assert!(!double_equals(0.0, -0.0));
        assert!(double_equals(1.5, 1.5));
        assert!(float_equals(f32::NAN, f32::NAN));
        assert!(!float_equals(0.0f32, -0.0f32));
    }

    /// Invariant: the documented long hash algorithm, spot-checked
    /// against hand-computed values.
    #[test]
    fn long_hash_algorithm() {
        assert_eq!(hash_long(0), 0);
        assert_eq!(hash_long(1), 1);
        assert_eq!(hash_long(-1), 0); // 0xffff.. ^ 0xffff.. low word
        assert_eq!(hash_long(1 << 32), 1);
        assert_eq!(hash_long(i64::MIN), i32::MIN);
    }

    /// Invariant: hash/equals law for boxed doubles — equal boxes hash
    /// equally, including NaN.
    #[test]
    fn double_hash_consistent_with_equals() {
        assert_eq!(hash_double(f64::NAN), hash_double(f64::NAN));
        assert_ne!(hash_double(0.0), hash_double(-0.0));
        assert_eq!(hash_bool(true), 1231);
        assert_eq!(hash_bool(false), 1237);
    }

    /// Invariant: the total order places -0.0 below +0.0 and NaN above
    /// +Infinity; NaNs compare equal to each other.
    #[test]
    fn total_order() {
        assert_eq!(compare_double(&-0.0, &0.0), Ordering::Less);
        assert_eq!(compare_double(&f64::INFINITY, &f64::NAN), Ordering::Less);
        assert_eq!(compare_double(&f64::NAN, &f64::NAN), Ordering::Equal);
        assert_eq!(compare_double(&1.0, &2.0), Ordering::Less);
        assert_eq!(compare_float(&-0.0f32, &0.0f32), Ordering::Less);
        assert_eq!(compare_float(&f32::NAN, &f32::MAX), Ordering::Greater);
    }
}
