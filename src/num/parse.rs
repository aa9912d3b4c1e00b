//! Radix parsing, prefix decoding, and radix formatting for the boxed
//! integer types, with the source library's acceptance rules: no
//! interior whitespace, explicit rejection of malformed input, radix
//! range 2..=36, and overflow detected rather than wrapped.

use crate::error::{Error, Result};

pub const MIN_RADIX: u32 = 2;
pub const MAX_RADIX: u32 = 36;

const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

fn bad_input(s: &str) -> Error {
    Error::NumberFormat(format!("for input string: {s:?}"))
}

/// Parse a signed 32-bit integer in the given radix.
pub fn parse_int(s: &str, radix: u32) -> Result<i32> {
    let v = parse_signed(s, radix, i32::MIN as i64, i32::MAX as i64)?;
    Ok(v as i32)
}

/// Parse a signed 64-bit integer in the given radix.
pub fn parse_long(s: &str, radix: u32) -> Result<i64> {
    if !(MIN_RADIX..=MAX_RADIX).contains(&radix) {
        return Err(Error::NumberFormat(format!("radix {radix} out of range")));
    }
    let bytes = s.as_bytes();
    let (neg, digits) = split_sign(bytes).ok_or_else(|| bad_input(s))?;
    // Accumulate on the negative side so i64::MIN parses without
    // overflowing the magnitude.
    let mut acc: i64 = 0;
    for &b in digits {
        let d = digit_value(b, radix).ok_or_else(|| bad_input(s))?;
        acc = acc
            .checked_mul(radix as i64)
            .and_then(|a| a.checked_sub(d as i64))
            .ok_or_else(|| bad_input(s))?;
    }
    if neg {
        Ok(acc)
    } else {
        acc.checked_neg().ok_or_else(|| bad_input(s))
    }
}

fn parse_signed(s: &str, radix: u32, min: i64, max: i64) -> Result<i64> {
    if !(MIN_RADIX..=MAX_RADIX).contains(&radix) {
        return Err(Error::NumberFormat(format!("radix {radix} out of range")));
    }
    let bytes = s.as_bytes();
    let (neg, digits) = split_sign(bytes).ok_or_else(|| bad_input(s))?;
    let mut acc: i64 = 0;
    for &b in digits {
        let d = digit_value(b, radix).ok_or_else(|| bad_input(s))?;
        acc = acc * radix as i64 + d as i64;
        if acc > max - min {
            // Past any representable magnitude; bail before i64 overflow.
            return Err(bad_input(s));
        }
    }
    let v = if neg { -acc } else { acc };
    if v < min || v > max {
        return Err(bad_input(s));
    }
    Ok(v)
}

/// Strip one optional leading sign; rejects empty and sign-only input.
fn split_sign(bytes: &[u8]) -> Option<(bool, &[u8])> {
    match bytes {
        [b'-', rest @ ..] if !rest.is_empty() => Some((true, rest)),
        [b'+', rest @ ..] if !rest.is_empty() => Some((false, rest)),
        [] => None,
        all => Some((false, all)),
    }
}

fn digit_value(b: u8, radix: u32) -> Option<u32> {
    let d = match b {
        b'0'..=b'9' => (b - b'0') as u32,
        b'a'..=b'z' => (b - b'a') as u32 + 10,
        b'A'..=b'Z' => (b - b'A') as u32 + 10,
        _ => return None,
    };
    (d < radix).then_some(d)
}

/// Decode a 32-bit integer with sign and `0x`/`0X`/`#`/leading-`0`
/// prefixes (hex, hex, hex, octal; bare digits are decimal).
pub fn decode_int(s: &str) -> Result<i32> {
    let (neg, radix, digits) = split_decode(s)?;
    let magnitude = parse_signed(digits, radix, 0, u32::MAX as i64)?;
    let v = if neg { -magnitude } else { magnitude };
    if v < i32::MIN as i64 || v > i32::MAX as i64 {
        return Err(bad_input(s));
    }
    Ok(v as i32)
}

/// Decode a 64-bit integer with the same prefix grammar as
/// [`decode_int`].
pub fn decode_long(s: &str) -> Result<i64> {
    let (neg, radix, digits) = split_decode(s)?;
    if neg {
        parse_long(&format!("-{digits}"), radix)
    } else {
        // Reject a stray sign hiding after the prefix, e.g. "0x-10".
        parse_long(digits, radix)
    }
}

fn split_decode(s: &str) -> Result<(bool, u32, &str)> {
    let (neg, rest) = match s.as_bytes() {
        [b'-', ..] => (true, &s[1..]),
        [b'+', ..] => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, digits) = if let Some(hex) = rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
        (16, hex)
    } else if let Some(hex) = rest.strip_prefix('#') {
        (16, hex)
    } else if rest.len() > 1 && rest.starts_with('0') {
        (8, &rest[1..])
    } else {
        (10, rest)
    };
    if digits.is_empty() || digits.starts_with('+') || digits.starts_with('-') {
        return Err(bad_input(s));
    }
    Ok((neg, radix, digits))
}

/// Parse a double: optional surrounding whitespace, optional sign,
/// `Infinity`/`NaN`, or a decimal literal with optional exponent and an
/// optional trailing `f`/`F`/`d`/`D` type suffix.
pub fn parse_double(s: &str) -> Result<f64> {
    let trimmed = s.trim_matches(|c: char| c <= ' ');
    let (body, neg) = match trimmed.as_bytes() {
        [b'-', ..] => (&trimmed[1..], true),
        [b'+', ..] => (&trimmed[1..], false),
        _ => (trimmed, false),
    };
    let magnitude = match body {
        "Infinity" => f64::INFINITY,
        "NaN" => f64::NAN,
        _ => {
            let body = body
                .strip_suffix(['f', 'F', 'd', 'D'])
                .unwrap_or(body);
            if !valid_decimal_literal(body) {
                return Err(bad_input(s));
            }
            body.parse::<f64>().map_err(|_| bad_input(s))?
        }
    };
    Ok(if neg { -magnitude } else { magnitude })
}

/// Unsigned grammar check: digits [. digits] [e|E [sign] digits], with
/// at least one digit somewhere around the point.
fn valid_decimal_literal(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    let mut int_digits = 0;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
        int_digits += 1;
    }
    let mut frac_digits = 0;
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
            frac_digits += 1;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return false;
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let mut exp_digits = 0;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
            exp_digits += 1;
        }
        if exp_digits == 0 {
            return false;
        }
    }
    i == bytes.len()
}

/// Signed radix formatting with lowercase digits; a radix outside
/// 2..=36 silently falls back to 10.
pub fn to_string_radix(mut value: i64, radix: u32) -> String {
    let radix = if (MIN_RADIX..=MAX_RADIX).contains(&radix) {
        radix
    } else {
        10
    };
    let neg = value < 0;
    // Work on the negative side so i64::MIN needs no magnitude negation.
    if !neg {
        value = -value;
    }
    let mut buf = Vec::with_capacity(20);
    while value <= -(radix as i64) {
        buf.push(DIGITS[(-(value % radix as i64)) as usize]);
        value /= radix as i64;
    }
    buf.push(DIGITS[(-value) as usize]);
    if neg {
        buf.push(b'-');
    }
    buf.reverse();
    // Digits are ASCII by construction.
    String::from_utf8(buf).unwrap_or_default()
}

/// Two's-complement (unsigned) radix formatting, backing the
/// `toHexString`/`toOctalString`/`toBinaryString` family.
pub fn to_unsigned_string(mut value: u64, radix: u32) -> String {
    let radix = if (MIN_RADIX..=MAX_RADIX).contains(&radix) {
        radix as u64
    } else {
        10
    };
    let mut buf = Vec::with_capacity(64);
    loop {
        buf.push(DIGITS[(value % radix) as usize]);
        value /= radix;
        if value == 0 {
            break;
        }
    }
    buf.reverse();
    String::from_utf8(buf).unwrap_or_default()
}
