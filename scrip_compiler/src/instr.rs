//! Emitted instruction set for dynamic conversions.
//!
//! A dynamic `convert(x, decimal)` compiles to a short linear sequence:
//! load the operand, decode it to the canonical signed integer, guard the
//! decimal bounds, scale into the fixed-point representation. Downstream
//! code generation consumes the sequence as-is.

use serde::{Deserialize, Serialize};

use crate::ir::SourceRef;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instr {
    /// Push the referenced runtime operand onto the stack.
    LoadSource(SourceRef),
    /// Reinterpret the top of stack as a signed 128-bit integer.
    DecodeInt128,
    /// Reinterpret the top of stack as a non-negative 256-bit integer.
    DecodeUint256,
    /// Decode `false` to 0 and `true` to 1.
    DecodeBool,
    /// Decode at most `max_len` big-endian bytes as a two's-complement
    /// signed integer, sign-extending from the first present byte.
    DecodeBytes { max_len: usize },
    /// Abort execution if the decoded value lies outside the decimal
    /// integral bounds.
    GuardDecimalBounds,
    /// Scale the guarded value by the decimal precision factor.
    ScaleToDecimal,
}
