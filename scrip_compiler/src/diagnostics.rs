//! Compile-time diagnostics for the conversion builtin.
//!
//! Optional notes recording what the validator decided for each
//! conversion: whether the operand folded to a constant or compiled to a
//! guarded sequence. Disabled by default to avoid noisy output; enable
//! with `DiagnosticsCollector::enable()` and drain with
//! `DiagnosticsCollector::take()`.

use std::cell::RefCell;

use crate::span::Span;
use crate::types::ScripType;

/// One note per processed conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionNote {
    /// The operand was a literal and folded to a constant decimal.
    ConstantFolded { ty: ScripType, span: Span },
    /// The operand was dynamic; a sequence was emitted. `guarded` records
    /// whether it carries a bounds guard (int128 sources do not need one).
    SequenceEmitted {
        ty: ScripType,
        guarded: bool,
        span: Span,
    },
}

thread_local! {
    static NOTES: RefCell<Option<Vec<ConversionNote>>> = const { RefCell::new(None) };
}

/// Thread-local collector for conversion notes.
#[derive(Debug)]
pub struct DiagnosticsCollector;

impl DiagnosticsCollector {
    /// Start collecting notes on this thread.
    pub fn enable() {
        NOTES.with(|n| {
            let mut n = n.borrow_mut();
            if n.is_none() {
                *n = Some(Vec::new());
            }
        });
    }

    /// Stop collecting and discard anything gathered.
    pub fn disable() {
        NOTES.with(|n| *n.borrow_mut() = None);
    }

    /// Retrieve and clear collected notes. Empty when disabled.
    pub fn take() -> Vec<ConversionNote> {
        NOTES.with(|n| {
            let mut n = n.borrow_mut();
            match n.as_mut() {
                Some(notes) => std::mem::take(notes),
                None => Vec::new(),
            }
        })
    }

    pub(crate) fn record(note: ConversionNote) {
        NOTES.with(|n| {
            if let Some(notes) = n.borrow_mut().as_mut() {
                notes.push(note);
            }
        });
    }
}
