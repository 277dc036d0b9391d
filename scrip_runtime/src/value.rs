//! Dynamic operand values
//!
//! `Value` carries an operand whose concrete contents are only known at
//! execution time (parameters, storage reads, computed expressions). The
//! compiled guard sequences pull these out of the execution environment.

use num_bigint::BigUint;

use crate::decimal::Decimal;

/// Dynamically carried operand value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// 128-bit signed integer
    Int128(i128),
    /// 256-bit unsigned integer
    Uint256(BigUint),
    /// Boolean
    Bool(bool),
    /// Byte string, at most one 32-byte word
    Bytes(Vec<u8>),
    /// Fixed-point decimal
    Decimal(Decimal),
}

impl Value {
    /// Get the Scrip type name of this value
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int128(_) => "int128",
            Value::Uint256(_) => "uint256",
            Value::Bool(_) => "bool",
            Value::Bytes(_) => "bytes",
            Value::Decimal(_) => "decimal",
        }
    }

    /// Try to extract as i128
    pub fn as_int128(&self) -> Option<i128> {
        match self {
            Value::Int128(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to extract as uint256
    pub fn as_uint256(&self) -> Option<&BigUint> {
        match self {
            Value::Uint256(v) => Some(v),
            _ => None,
        }
    }

    /// Try to extract as bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to extract as a byte slice
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Try to extract as decimal
    pub fn as_decimal(&self) -> Option<&Decimal> {
        match self {
            Value::Decimal(d) => Some(d),
            _ => None,
        }
    }
}
