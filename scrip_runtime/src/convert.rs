//! Conversion into the decimal type
//!
//! This module provides the decode, bounds-guard, and fixed-point encode
//! steps shared by the compiler's constant-folding path and by emitted
//! guard sequences. Out-of-range values are always rejected; nothing is
//! truncated, clamped, or wrapped.

use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};

use crate::decimal::{Decimal, INTEGRAL_MAX_BIG, INTEGRAL_MIN_BIG};
use crate::error::{RuntimeError, RuntimeResult};
use crate::value::Value;

/// Width of one machine word; byte operands never exceed this.
pub const MAX_WORD_BYTES: usize = 32;

/// Decode big-endian bytes as a two's-complement signed integer.
///
/// The most-significant bit of the first present byte is the sign bit.
/// Shorter inputs behave as if sign-extended to the full word: a short
/// array and a 32-byte array with the same effective sign and magnitude
/// decode identically. An empty input decodes to 0.
pub fn decode_signed_be(bytes: &[u8]) -> BigInt {
    if bytes.is_empty() {
        return BigInt::zero();
    }
    BigInt::from_signed_bytes_be(bytes)
}

/// Decode a dynamic operand into its canonical signed integer value.
pub fn decode(value: &Value) -> RuntimeResult<BigInt> {
    match value {
        Value::Int128(v) => Ok(BigInt::from(*v)),
        Value::Uint256(v) => Ok(BigInt::from(v.clone())),
        Value::Bool(v) => Ok(BigInt::from(u8::from(*v))),
        Value::Bytes(b) => {
            if b.len() > MAX_WORD_BYTES {
                return Err(RuntimeError::argument_error(format!(
                    "byte string of length {} exceeds one {}-byte word",
                    b.len(),
                    MAX_WORD_BYTES
                )));
            }
            Ok(decode_signed_be(b))
        }
        Value::Decimal(_) => Err(RuntimeError::type_error(
            "value is already a decimal".to_string(),
        )),
    }
}

/// Check a candidate integer against the decimal integral bounds.
///
/// Strict inclusive-range membership; a passing value narrows exactly to
/// `i128`, which is the decimal integral domain.
pub fn guard_integral(v: &BigInt) -> RuntimeResult<i128> {
    if *v < *INTEGRAL_MIN_BIG || *v > *INTEGRAL_MAX_BIG {
        return Err(RuntimeError::overflow(format!(
            "{} is out of range for decimal",
            v
        )));
    }
    v.to_i128()
        .ok_or_else(|| RuntimeError::custom("bound check admitted a value outside i128"))
}

/// Convert a dynamic operand to decimal: decode, guard, encode.
///
/// `int128` operands skip the guard; their domain is the decimal integral
/// domain.
pub fn to_decimal(value: &Value) -> RuntimeResult<Decimal> {
    match value {
        Value::Int128(v) => Ok(Decimal::from_integral(*v)),
        _ => {
            let decoded = decode(value)?;
            let integral = guard_integral(&decoded)?;
            Ok(Decimal::from_integral(integral))
        }
    }
}
