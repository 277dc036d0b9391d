//! Linear machine for emitted guard sequences.
//!
//! Executes the decode, guard, scale sequence a dynamic conversion
//! compiles to, against an environment holding the runtime operand
//! values. One machine runs one sequence within one execution; it holds
//! no state across runs. An `Overflow` failure aborts the execution, and
//! the host environment rolls back whatever state that execution touched.

use num_bigint::BigInt;
use num_traits::ToPrimitive;

use scrip_runtime::convert::{decode_signed_be, guard_integral};
use scrip_runtime::decimal::Decimal;
use scrip_runtime::error::{RuntimeError, RuntimeResult};
use scrip_runtime::value::Value;

use crate::convert::ConversionOutcome;
use crate::instr::Instr;
use crate::ir::SourceRef;

/// Runtime operand slots visible to a guard sequence.
#[derive(Debug, Clone, Default)]
pub struct Env {
    pub params: Vec<Value>,
    pub memory: Vec<Value>,
    pub storage: Vec<Value>,
}

impl Env {
    pub fn new() -> Self {
        Self::default()
    }

    fn fetch(&self, source: SourceRef) -> RuntimeResult<Value> {
        let slot = match source {
            SourceRef::Param(i) => self.params.get(i),
            SourceRef::Memory(i) => self.memory.get(i),
            SourceRef::Storage(i) => self.storage.get(i),
        };
        slot.cloned()
            .ok_or_else(|| RuntimeError::bad_source(format!("{} is not populated", source)))
    }
}

/// One stack slot of the machine.
#[derive(Debug, Clone)]
enum StackSlot {
    /// Raw operand value as loaded from the environment.
    Source(Value),
    /// Canonical signed integer produced by a decode instruction.
    Integral(BigInt),
    /// Final fixed-point value.
    Decimal(Decimal),
}

/// Stack machine executing one conversion sequence.
#[derive(Debug)]
pub struct Machine<'a> {
    env: &'a Env,
    stack: Vec<StackSlot>,
}

impl<'a> Machine<'a> {
    pub fn new(env: &'a Env) -> Self {
        Self {
            env,
            stack: Vec::new(),
        }
    }

    /// Run a sequence to completion and return the produced decimal.
    pub fn run(&mut self, code: &[Instr]) -> RuntimeResult<Decimal> {
        for instr in code {
            self.step(instr)?;
        }
        match self.stack.pop() {
            Some(StackSlot::Decimal(d)) if self.stack.is_empty() => Ok(d),
            _ => Err(RuntimeError::custom(
                "conversion sequence did not produce a single decimal",
            )),
        }
    }

    fn step(&mut self, instr: &Instr) -> RuntimeResult<()> {
        match instr {
            Instr::LoadSource(source) => {
                let value = self.env.fetch(*source)?;
                self.stack.push(StackSlot::Source(value));
            }
            Instr::DecodeInt128 => {
                let v = self.pop_source()?;
                match v {
                    Value::Int128(x) => self.stack.push(StackSlot::Integral(BigInt::from(x))),
                    other => {
                        return Err(RuntimeError::type_error(format!(
                            "expected int128, found {}",
                            other.type_name()
                        )))
                    }
                }
            }
            Instr::DecodeUint256 => {
                let v = self.pop_source()?;
                match v {
                    Value::Uint256(x) => self.stack.push(StackSlot::Integral(BigInt::from(x))),
                    other => {
                        return Err(RuntimeError::type_error(format!(
                            "expected uint256, found {}",
                            other.type_name()
                        )))
                    }
                }
            }
            Instr::DecodeBool => {
                let v = self.pop_source()?;
                match v {
                    Value::Bool(b) => self
                        .stack
                        .push(StackSlot::Integral(BigInt::from(u8::from(b)))),
                    other => {
                        return Err(RuntimeError::type_error(format!(
                            "expected bool, found {}",
                            other.type_name()
                        )))
                    }
                }
            }
            Instr::DecodeBytes { max_len } => {
                let v = self.pop_source()?;
                match v {
                    Value::Bytes(b) => {
                        if b.len() > *max_len {
                            return Err(RuntimeError::argument_error(format!(
                                "byte string of length {} exceeds declared length {}",
                                b.len(),
                                max_len
                            )));
                        }
                        self.stack.push(StackSlot::Integral(decode_signed_be(&b)));
                    }
                    other => {
                        return Err(RuntimeError::type_error(format!(
                            "expected bytes, found {}",
                            other.type_name()
                        )))
                    }
                }
            }
            Instr::GuardDecimalBounds => {
                let v = self.pop_integral()?;
                let checked = guard_integral(&v)?;
                self.stack.push(StackSlot::Integral(BigInt::from(checked)));
            }
            Instr::ScaleToDecimal => {
                let v = self.pop_integral()?;
                // Anything still outside i128 here means the sequence was
                // emitted without its guard; that is a malformed program,
                // not an overflow.
                let integral = v.to_i128().ok_or_else(|| {
                    RuntimeError::custom("unguarded value reached the encoder")
                })?;
                self.stack
                    .push(StackSlot::Decimal(Decimal::from_integral(integral)));
            }
        }
        Ok(())
    }

    fn pop(&mut self) -> RuntimeResult<StackSlot> {
        self.stack.pop().ok_or(RuntimeError::StackUnderflow)
    }

    fn pop_source(&mut self) -> RuntimeResult<Value> {
        match self.pop()? {
            StackSlot::Source(v) => Ok(v),
            _ => Err(RuntimeError::type_error(
                "expected a source operand on the stack",
            )),
        }
    }

    fn pop_integral(&mut self) -> RuntimeResult<BigInt> {
        match self.pop()? {
            StackSlot::Integral(v) => Ok(v),
            _ => Err(RuntimeError::type_error(
                "expected a decoded integer on the stack",
            )),
        }
    }
}

/// Run a compiled conversion outcome against an environment.
///
/// Folded constants evaluate without touching the environment; emitted
/// sequences run on a fresh machine.
pub fn run_conversion(env: &Env, outcome: &ConversionOutcome) -> RuntimeResult<Decimal> {
    match outcome {
        ConversionOutcome::Encoded(d) => Ok(d.clone()),
        ConversionOutcome::RuntimeCheck(code) => Machine::new(env).run(code),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigUint;
    use num_traits::One;

    fn env_with_param(value: Value) -> Env {
        Env {
            params: vec![value],
            ..Env::new()
        }
    }

    fn uint256_seq() -> Vec<Instr> {
        vec![
            Instr::LoadSource(SourceRef::Param(0)),
            Instr::DecodeUint256,
            Instr::GuardDecimalBounds,
            Instr::ScaleToDecimal,
        ]
    }

    #[test]
    fn test_run_uint256_in_range() {
        let env = env_with_param(Value::Uint256(BigUint::from(1000_u32)));
        let d = Machine::new(&env).run(&uint256_seq()).unwrap();
        assert_eq!(d.to_string(), "1000.0");
    }

    #[test]
    fn test_run_uint256_overflow_reverts() {
        let over = BigUint::from(i128::MAX as u128) + BigUint::one();
        let env = env_with_param(Value::Uint256(over));
        let err = Machine::new(&env).run(&uint256_seq()).unwrap_err();
        assert!(err.is_revert());
    }

    #[test]
    fn test_run_int128_without_guard() {
        let env = env_with_param(Value::Int128(-42));
        let seq = vec![
            Instr::LoadSource(SourceRef::Param(0)),
            Instr::DecodeInt128,
            Instr::ScaleToDecimal,
        ];
        let d = Machine::new(&env).run(&seq).unwrap();
        assert_eq!(d.to_string(), "-42.0");
    }

    #[test]
    fn test_decode_type_mismatch() {
        let env = env_with_param(Value::Bool(true));
        let err = Machine::new(&env).run(&uint256_seq()).unwrap_err();
        assert!(matches!(err, RuntimeError::TypeError(_)));
    }

    #[test]
    fn test_missing_source_slot() {
        let env = Env::new();
        let err = Machine::new(&env).run(&uint256_seq()).unwrap_err();
        assert!(matches!(err, RuntimeError::BadSource(_)));
    }

    #[test]
    fn test_oversized_dynamic_bytes() {
        let env = env_with_param(Value::Bytes(vec![0_u8; 6]));
        let seq = vec![
            Instr::LoadSource(SourceRef::Param(0)),
            Instr::DecodeBytes { max_len: 5 },
            Instr::GuardDecimalBounds,
            Instr::ScaleToDecimal,
        ];
        let err = Machine::new(&env).run(&seq).unwrap_err();
        assert!(matches!(err, RuntimeError::ArgumentError(_)));
    }

    #[test]
    fn test_malformed_sequence_underflow() {
        let env = Env::new();
        let err = Machine::new(&env)
            .run(&[Instr::GuardDecimalBounds])
            .unwrap_err();
        assert!(matches!(err, RuntimeError::StackUnderflow));
    }

    #[test]
    fn test_unguarded_encoder_is_internal_error() {
        // A uint256 sequence missing its guard must not silently wrap.
        let over = BigUint::from(i128::MAX as u128) + BigUint::one();
        let env = env_with_param(Value::Uint256(over));
        let seq = vec![
            Instr::LoadSource(SourceRef::Param(0)),
            Instr::DecodeUint256,
            Instr::ScaleToDecimal,
        ];
        let err = Machine::new(&env).run(&seq).unwrap_err();
        assert!(matches!(err, RuntimeError::Custom(_)));
        assert!(!err.is_revert());
    }

    #[test]
    fn test_sequence_must_end_in_decimal() {
        let env = env_with_param(Value::Int128(1));
        let seq = vec![Instr::LoadSource(SourceRef::Param(0)), Instr::DecodeInt128];
        let err = Machine::new(&env).run(&seq).unwrap_err();
        assert!(matches!(err, RuntimeError::Custom(_)));
    }

    #[test]
    fn test_run_conversion_encoded() {
        let env = Env::new();
        let outcome = ConversionOutcome::Encoded(Decimal::from_integral(7));
        assert_eq!(run_conversion(&env, &outcome).unwrap().to_string(), "7.0");
    }
}
