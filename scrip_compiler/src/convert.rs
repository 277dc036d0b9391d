//! The `convert(value, decimal)` builtin.
//!
//! A linear validate-then-transform pipeline per conversion: classify the
//! declared source type, then either fold a literal operand to a constant
//! decimal or emit a guarded instruction sequence for a dynamic operand.
//! Branching happens only on (source kind, literal-ness); no state
//! persists across conversions.

use num_bigint::BigInt;

use scrip_runtime::convert::{decode_signed_be, guard_integral, MAX_WORD_BYTES};
use scrip_runtime::decimal::Decimal;

use crate::diagnostics::{ConversionNote, DiagnosticsCollector};
use crate::error::{CompileError, CompileResult};
use crate::instr::Instr;
use crate::ir::{LiteralValue, OperandPayload, SourceOperand, SourceRef};
use crate::span::Span;
use crate::types::ScripType;

/// The closed set of source shapes convertible to decimal.
///
/// Produced only by the structural check; a `bytes[32]` declaration
/// classifies as `Bytes32`, shorter declarations as `ByteArray`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Int128,
    Uint256,
    Bool,
    Bytes32,
    ByteArray { len: usize },
}

/// Result of compiling one conversion expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    /// Folded constant (literal operand).
    Encoded(Decimal),
    /// Emitted guard sequence (dynamic operand).
    RuntimeCheck(Vec<Instr>),
}

/// Compile a single `convert(x, decimal)` expression.
///
/// Literal operands are evaluated here: an out-of-range value is an
/// `InvalidLiteral` compile error. Dynamic operands compile to a decode,
/// bounds-guard, scale sequence whose guard aborts the enclosing
/// execution when the decoded value falls outside the decimal domain.
pub fn convert_to_decimal(operand: &SourceOperand) -> CompileResult<ConversionOutcome> {
    let kind = source_kind_of(operand.ty, operand.span)?;
    match &operand.payload {
        OperandPayload::Literal(lit) => {
            let folded = fold_literal(kind, lit, operand.ty, operand.span)?;
            DiagnosticsCollector::record(ConversionNote::ConstantFolded {
                ty: operand.ty,
                span: operand.span,
            });
            Ok(ConversionOutcome::Encoded(folded))
        }
        OperandPayload::Runtime(source) => {
            let seq = emit_sequence(kind, *source);
            DiagnosticsCollector::record(ConversionNote::SequenceEmitted {
                ty: operand.ty,
                guarded: seq.contains(&Instr::GuardDecimalBounds),
                span: operand.span,
            });
            Ok(ConversionOutcome::RuntimeCheck(seq))
        }
    }
}

/// Structural check: which declared types may convert to decimal.
///
/// Purely declared-type based; fires identically for literal and dynamic
/// operands, before any value is inspected.
fn source_kind_of(ty: ScripType, span: Span) -> CompileResult<SourceKind> {
    match ty {
        ScripType::Int128 => Ok(SourceKind::Int128),
        ScripType::Uint256 => Ok(SourceKind::Uint256),
        ScripType::Bool => Ok(SourceKind::Bool),
        ScripType::Bytes { len } if len == MAX_WORD_BYTES => Ok(SourceKind::Bytes32),
        ScripType::Bytes { len } if len < MAX_WORD_BYTES => Ok(SourceKind::ByteArray { len }),
        ScripType::Bytes { len } => Err(CompileError::type_mismatch(
            format!(
                "cannot convert bytes[{}] to decimal; byte arrays longer than {} bytes are not convertible",
                len, MAX_WORD_BYTES
            ),
            span,
        )),
        other => Err(CompileError::type_mismatch(
            format!("cannot convert {} to decimal", other),
            span,
        )),
    }
}

/// Evaluate a literal conversion at compile time.
fn fold_literal(
    kind: SourceKind,
    lit: &LiteralValue,
    ty: ScripType,
    span: Span,
) -> CompileResult<Decimal> {
    let integral: i128 = match (kind, lit) {
        // int128 is a strict subset of the decimal integral domain.
        (SourceKind::Int128, LiteralValue::Int(v)) => *v,
        (SourceKind::Bool, LiteralValue::Bool(b)) => i128::from(*b),
        (SourceKind::Uint256, LiteralValue::Uint(u)) => {
            guard_literal(&BigInt::from(u.clone()), span)?
        }
        (SourceKind::Bytes32, LiteralValue::Bytes(b)) => {
            byte_literal_to_integral(MAX_WORD_BYTES, b, ty, span)?
        }
        (SourceKind::ByteArray { len }, LiteralValue::Bytes(b)) => {
            byte_literal_to_integral(len, b, ty, span)?
        }
        (SourceKind::Bytes32, LiteralValue::Str(s)) => {
            byte_literal_to_integral(MAX_WORD_BYTES, s.as_bytes(), ty, span)?
        }
        (SourceKind::ByteArray { len }, LiteralValue::Str(s)) => {
            byte_literal_to_integral(len, s.as_bytes(), ty, span)?
        }
        (_, lit) => {
            return Err(CompileError::type_mismatch(
                format!("{} does not match declared type {}", lit.kind_name(), ty),
                span,
            ))
        }
    };
    Ok(Decimal::from_integral(integral))
}

/// Decode a byte-form literal and range-check it.
fn byte_literal_to_integral(
    max_len: usize,
    bytes: &[u8],
    ty: ScripType,
    span: Span,
) -> CompileResult<i128> {
    if bytes.len() > max_len {
        return Err(CompileError::type_mismatch(
            format!(
                "bytes literal of length {} does not fit declared type {}",
                bytes.len(),
                ty
            ),
            span,
        ));
    }
    guard_literal(&decode_signed_be(bytes), span)
}

/// Range-check a decoded literal, reclassifying overflow as a compile error.
fn guard_literal(v: &BigInt, span: Span) -> CompileResult<i128> {
    guard_integral(v).map_err(|_| {
        CompileError::invalid_literal(format!("literal {} is out of range for decimal", v), span)
    })
}

/// Emit the guarded sequence for a dynamic operand.
///
/// `int128` sources skip the bounds guard; their domain inclusion is
/// established before any value exists.
fn emit_sequence(kind: SourceKind, source: SourceRef) -> Vec<Instr> {
    let mut seq = Vec::with_capacity(4);
    seq.push(Instr::LoadSource(source));
    let guarded = match kind {
        SourceKind::Int128 => {
            seq.push(Instr::DecodeInt128);
            false
        }
        SourceKind::Uint256 => {
            seq.push(Instr::DecodeUint256);
            true
        }
        SourceKind::Bool => {
            seq.push(Instr::DecodeBool);
            true
        }
        SourceKind::Bytes32 => {
            seq.push(Instr::DecodeBytes {
                max_len: MAX_WORD_BYTES,
            });
            true
        }
        SourceKind::ByteArray { len } => {
            seq.push(Instr::DecodeBytes { max_len: len });
            true
        }
    };
    if guarded {
        seq.push(Instr::GuardDecimalBounds);
    }
    seq.push(Instr::ScaleToDecimal);
    seq
}
