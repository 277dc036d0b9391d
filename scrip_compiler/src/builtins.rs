//! Builtin function registry.
//!
//! The surface syntax reaches the compiler as a two-argument builtin call
//! `convert(value, target)`; this module resolves the builtin name and
//! dispatches on the target type.

use serde::{Deserialize, Serialize};

use crate::convert::{convert_to_decimal, ConversionOutcome};
use crate::error::{CompileError, CompileResult};
use crate::ir::SourceOperand;
use crate::types::ScripType;

/// Built-in function identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuiltinId {
    /// `convert(value, target)`
    Convert,
}

impl BuiltinId {
    /// Resolve a builtin by its surface name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "convert" => Some(BuiltinId::Convert),
            _ => None,
        }
    }
}

/// Lower a `convert(value, target)` call.
///
/// Only the decimal target is handled by this subsystem; any other target
/// is a type mismatch.
pub fn lower_convert(
    operand: &SourceOperand,
    target: ScripType,
) -> CompileResult<ConversionOutcome> {
    match target {
        ScripType::Decimal => convert_to_decimal(operand),
        other => Err(CompileError::type_mismatch(
            format!("conversion from {} to {} is not supported", operand.ty, other),
            operand.span,
        )),
    }
}
