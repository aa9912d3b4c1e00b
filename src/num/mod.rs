//! Boxed-numeric helpers: bit-exact float/double conversions, boxed
//! hash codes and equality, 64-bit integer edge semantics, and radix
//! parsing/formatting. Everything the hash and tree containers need to
//! treat numbers the way the emulated library does.

mod bits;
pub mod long;
mod parse;

pub use bits::{
    compare_double, compare_float, double_equals, double_to_long_bits, double_to_raw_long_bits,
    float_equals, float_to_int_bits, float_to_raw_int_bits, hash_bool, hash_byte, hash_char,
    hash_double, hash_float, hash_int, hash_long, hash_short, int_bits_to_float,
    long_bits_to_double,
};
pub use parse::{
    decode_int, decode_long, parse_double, parse_int, parse_long, to_string_radix,
    to_unsigned_string, MAX_RADIX, MIN_RADIX,
};
