//! Error types for the microvm loader.

use microvm_common::ProgramError;
use thiserror::Error;

/// Errors produced while loading program text.
///
/// Line numbers are 1-based physical lines, counting blank and comment lines.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The source file could not be read.
    #[error("cannot read '{path}': {message}")]
    Io { path: String, message: String },

    /// A significant line has fewer than two tokens.
    #[error("line {line}: expected 'PC OPCODE [ARGUMENT]'")]
    Syntax { line: usize },

    /// The PC token is not a non-negative integer.
    #[error("line {line}: invalid program counter '{token}'")]
    InvalidPc { line: usize, token: String },

    /// The PC skips, repeats, or goes backwards.
    #[error("line {line}: program counter {found} out of sequence (expected {expected})")]
    PcOutOfSequence {
        line: usize,
        found: usize,
        expected: usize,
    },

    #[error(transparent)]
    Program(#[from] ProgramError),
}
