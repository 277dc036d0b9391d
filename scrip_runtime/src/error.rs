//! Runtime error types for compiled contract code
//!
//! This module provides error types that can occur while executing
//! compiled Scrip code.

use thiserror::Error;

/// Runtime error type
///
/// Represents errors that can occur during execution of compiled code.
/// An `Overflow` aborts the enclosing execution; the host environment
/// rolls back all state changes made by that execution.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// Type mismatch error
    #[error("TypeError: {0}")]
    TypeError(String),

    /// Invalid argument error
    #[error("ArgumentError: {0}")]
    ArgumentError(String),

    /// Value outside the representable decimal domain
    #[error("OverflowError: {0}")]
    Overflow(String),

    /// Operand stack exhausted mid-sequence
    #[error("StackError: operand stack is empty")]
    StackUnderflow,

    /// An operand slot the sequence referenced is not populated
    #[error("SourceError: {0}")]
    BadSource(String),

    /// Generic error with custom message
    #[error("{0}")]
    Custom(String),
}

impl RuntimeError {
    /// Create a type error
    pub fn type_error<S: Into<String>>(msg: S) -> Self {
        RuntimeError::TypeError(msg.into())
    }

    /// Create an argument error
    pub fn argument_error<S: Into<String>>(msg: S) -> Self {
        RuntimeError::ArgumentError(msg.into())
    }

    /// Create an overflow error
    pub fn overflow<S: Into<String>>(msg: S) -> Self {
        RuntimeError::Overflow(msg.into())
    }

    /// Create a bad-source error
    pub fn bad_source<S: Into<String>>(msg: S) -> Self {
        RuntimeError::BadSource(msg.into())
    }

    /// Create a custom error
    pub fn custom<S: Into<String>>(msg: S) -> Self {
        RuntimeError::Custom(msg.into())
    }

    /// Whether this failure reverts the enclosing execution.
    ///
    /// Every runtime failure aborts execution; `Overflow` is the class a
    /// dynamic out-of-range conversion surfaces as.
    pub fn is_revert(&self) -> bool {
        matches!(self, RuntimeError::Overflow(_))
    }
}

/// Result type alias for runtime operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;
