pub mod core;

pub use core::{LiteralValue, OperandPayload, SourceOperand, SourceRef};
