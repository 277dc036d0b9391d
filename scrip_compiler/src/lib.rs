//! Scrip compiler: the `convert(value, decimal)` builtin.
//!
//! This crate owns the compile-time half of converting a primitive source
//! operand into the fixed-point decimal type: structural validation of
//! which source type/size combinations may convert, constant folding for
//! literal operands, and emission of guarded instruction sequences for
//! dynamic operands. The decode/guard/encode semantics themselves live in
//! `scrip_runtime` so that folded constants and emitted sequences agree
//! exactly.

// Core modules
pub mod builtins;
pub mod convert;
pub mod diagnostics;
pub mod error;
pub mod instr;
pub mod ir;
pub mod span;
pub mod types;

// Linear machine for emitted guard sequences
pub mod exec;

pub use convert::{convert_to_decimal, ConversionOutcome};
pub use error::{CompileError, CompileResult};
pub use exec::{run_conversion, Env, Machine};
pub use instr::Instr;
pub use ir::{LiteralValue, OperandPayload, SourceOperand, SourceRef};
pub use span::Span;
pub use types::ScripType;
