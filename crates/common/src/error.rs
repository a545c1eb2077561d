//! Errors raised while assembling a program from instruction records.

use thiserror::Error;

/// Errors that occur when building a [`Program`](crate::Program).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgramError {
    /// Two instructions carry the same program counter.
    #[error("duplicate program counter {pc} (instructions {first} and {second})")]
    DuplicatePc {
        pc: usize,
        first: usize,
        second: usize,
    },
}
