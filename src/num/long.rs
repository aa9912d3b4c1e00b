//! 64-bit integer semantics with the source language's edge behavior.
//!
//! Arithmetic wraps modulo 2^64 (signed two's complement); shifts mask
//! their amount to six bits; division by zero is an error rather than a
//! trap; conversions from doubles truncate toward zero and saturate at
//! the representable range, with NaN mapping to zero. The plain
//! wrapping add/sub/mul/neg are native `wrapping_*` calls at use sites;
//! only operations with observable edge semantics get a named function.

use crate::error::{Error, Result};

/// Signed division; `MIN / -1` wraps back to `MIN`.
#[inline]
pub fn div(a: i64, b: i64) -> Result<i64> {
    if b == 0 {
        return Err(Error::Arithmetic("/ by zero"));
    }
    Ok(a.wrapping_div(b))
}

/// Remainder with the sign of the dividend; `MIN % -1` is 0.
#[inline]
pub fn rem(a: i64, b: i64) -> Result<i64> {
    if b == 0 {
        return Err(Error::Arithmetic("% by zero"));
    }
    Ok(a.wrapping_rem(b))
}

/// Left shift, amount masked to `0..64`.
#[inline]
pub fn shl(v: i64, amount: u32) -> i64 {
    v.wrapping_shl(amount & 63)
}

/// Arithmetic (sign-propagating) right shift, amount masked to `0..64`.
#[inline]
pub fn shr(v: i64, amount: u32) -> i64 {
    v.wrapping_shr(amount & 63)
}

/// Logical (zero-filling) right shift, amount masked to `0..64`.
#[inline]
pub fn ushr(v: i64, amount: u32) -> i64 {
    ((v as u64).wrapping_shr(amount & 63)) as i64
}

/// Recombine a 64-bit value from its signed high and unsigned low
/// 32-bit halves.
#[inline]
pub fn from_parts(high: i32, low: i32) -> i64 {
    ((high as i64) << 32) | (low as u32 as i64)
}

#[inline]
pub fn high_bits(v: i64) -> i32 {
    (((v as u64) >> 32) & 0xffff_ffff) as u32 as i32
}

#[inline]
pub fn low_bits(v: i64) -> i32 {
    (v & 0xffff_ffff) as u32 as i32
}

/// Narrowing `(int)` cast: keep the low 32 bits.
#[inline]
pub fn to_int(v: i64) -> i32 {
    v as i32
}

/// Narrowing `(short)` cast: keep the low 16 bits.
#[inline]
pub fn to_short(v: i64) -> i16 {
    v as i16
}

/// Narrowing `(byte)` cast: keep the low 8 bits.
#[inline]
pub fn to_byte(v: i64) -> i8 {
    v as i8
}

/// `(long)` cast of a double: NaN becomes 0, out-of-range saturates at
/// `i64::MIN`/`i64::MAX`, everything else truncates toward zero.
#[inline]
pub fn double_to_long(d: f64) -> i64 {
    if d.is_nan() {
        0
    } else if d >= i64::MAX as f64 {
        i64::MAX
    } else if d <= i64::MIN as f64 {
        i64::MIN
    } else {
        d.trunc() as i64
    }
}

/// `(int)` cast of a double: NaN becomes 0, out-of-range saturates at
/// `i32::MIN`/`i32::MAX`, everything else truncates toward zero.
#[inline]
pub fn double_to_int(d: f64) -> i32 {
    if d.is_nan() {
        0
    } else if d >= i32::MAX as f64 {
        i32::MAX
    } else if d <= i32::MIN as f64 {
        i32::MIN
    } else {
        d.trunc() as i32
    }
}

/// Widening `(double)` cast; may lose precision beyond 2^53.
#[inline]
pub fn long_to_double(v: i64) -> f64 {
    v as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: division by zero is the documented error; MIN / -1
    /// wraps instead of trapping.
    #[test]
    fn division_edges() {
        assert_eq!(div(7, 2), Ok(3));
        assert_eq!(div(-7, 2), Ok(-3));
        assert_eq!(div(1, 0), Err(Error::Arithmetic("/ by zero")));
        assert_eq!(div(i64::MIN, -1), Ok(i64::MIN));
        assert_eq!(rem(-7, 2), Ok(-1));
        assert_eq!(rem(7, -2), Ok(1));
        assert_eq!(rem(i64::MIN, -1), Ok(0));
        assert!(rem(1, 0).is_err());
    }

    /// Invariant: shift amounts are masked to six bits, so shifting by
    /// 64 is the identity and by 65 shifts by one.
    #[test]
    fn shift_masking() {
        assert_eq!(shl(1, 64), 1);
        assert_eq!(shl(1, 65), 2);
        assert_eq!(shr(-8, 1), -4);
        assert_eq!(shr(-1, 63), -1);
        assert_eq!(ushr(-1, 32), 0xffff_ffff);
        assert_eq!(ushr(-1, 64), -1);
        assert_eq!(ushr(i64::MIN, 63), 1);
    }

    /// Invariant: half decomposition round-trips every sign pattern.
    #[test]
    fn parts_round_trip() {
        for v in [0i64, 1, -1, i64::MIN, i64::MAX, 0x1234_5678_9abc_def0u64 as i64] {
            assert_eq!(from_parts(high_bits(v), low_bits(v)), v);
        }
        assert_eq!(high_bits(-1), -1);
        assert_eq!(low_bits(-1), -1);
        assert_eq!(from_parts(-1, 0), -1i64 << 32);
    }

    /// Invariant: narrowing keeps low bits exactly.
    #[test]
    fn narrowing_casts() {
        assert_eq!(to_int(0x1_0000_0001), 1);
        assert_eq!(to_int(-1), -1);
        assert_eq!(to_short(0x1_0001), 1);
        assert_eq!(to_byte(0x1ff), -1);
        assert_eq!(to_byte(128), -128);
    }

    /// Invariant: double→long is truncating, saturating, NaN-to-zero.
    #[test]
    fn double_to_long_semantics() {
        assert_eq!(double_to_long(f64::NAN), 0);
        assert_eq!(double_to_long(f64::INFINITY), i64::MAX);
        assert_eq!(double_to_long(f64::NEG_INFINITY), i64::MIN);
        assert_eq!(double_to_long(1e300), i64::MAX);
        assert_eq!(double_to_long(-1e300), i64::MIN);
        assert_eq!(double_to_long(2.9), 2);
        assert_eq!(double_to_long(-2.9), -2);
        assert_eq!(double_to_long(-0.0), 0);
        assert_eq!(double_to_int(f64::NAN), 0);
        assert_eq!(double_to_int(3e10), i32::MAX);
        assert_eq!(double_to_int(-3e10), i32::MIN);
        assert_eq!(double_to_int(-2.9), -2);
    }
}
