//! Scrip surface types.
//!
//! The set of types an expression node may carry is closed; conversion
//! rules dispatch by exhaustive match over this enum.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Declared type of an expression node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScripType {
    /// 128-bit signed integer
    Int128,
    /// 256-bit unsigned integer
    Uint256,
    /// Boolean
    Bool,
    /// Fixed-point decimal
    Decimal,
    /// 160-bit account address
    Address,
    /// Byte string with a declared maximum length
    Bytes { len: usize },
    /// Text string with a declared maximum length
    Str { len: usize },
}

impl ScripType {
    /// Resolve a surface type name without a length suffix.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "int128" => Some(ScripType::Int128),
            "uint256" => Some(ScripType::Uint256),
            "bool" => Some(ScripType::Bool),
            "decimal" => Some(ScripType::Decimal),
            "address" => Some(ScripType::Address),
            _ => None,
        }
    }
}

impl fmt::Display for ScripType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScripType::Int128 => write!(f, "int128"),
            ScripType::Uint256 => write!(f, "uint256"),
            ScripType::Bool => write!(f, "bool"),
            ScripType::Decimal => write!(f, "decimal"),
            ScripType::Address => write!(f, "address"),
            ScripType::Bytes { len } => write!(f, "bytes[{}]", len),
            ScripType::Str { len } => write!(f, "string[{}]", len),
        }
    }
}
