//! Runtime errors for the microvm engine.
//!
//! Operations report an [`ErrorKind`]. The dispatch loop wraps it in a
//! [`RuntimeError`] carrying the program counter and mnemonic of the
//! instruction that failed. Every error is fatal to the run.

use microvm_common::TypeTag;
use thiserror::Error;

/// What went wrong while executing one instruction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// Missing required argument, or an argument that does not parse.
    #[error("malformed instruction: {reason}")]
    MalformedInstruction { reason: String },

    /// LOAD_FAST of a name that was never stored.
    #[error("undefined variable '{name}'")]
    UndefinedVariable { name: String },

    /// LOAD_GLOBAL of anything other than `print`.
    #[error("unsupported global '{name}'")]
    UnsupportedGlobal { name: String },

    /// CALL_FUNCTION whose callee is not the print built-in.
    #[error("value of type {callee} is not callable")]
    UnsupportedCall { callee: TypeTag },

    /// Mnemonic with no matching opcode.
    #[error("unsupported opcode '{mnemonic}'")]
    UnsupportedOpcode { mnemonic: String },

    /// Pop or peek on an empty stack.
    #[error("stack underflow")]
    StackUnderflow,

    /// Operand kinds the operator does not accept.
    #[error("unsupported operand types for {operation}: {lhs} and {rhs}")]
    TypeError {
        operation: &'static str,
        lhs: TypeTag,
        rhs: TypeTag,
    },

    #[error("division by zero")]
    DivisionByZero,

    #[error("modulo by zero")]
    ModuloByZero,

    /// List subscript outside `0..len`.
    #[error("list index {index} out of range (length {len})")]
    IndexOutOfRange { index: i64, len: usize },

    /// LOAD_CONST argument that is not a literal.
    #[error("invalid literal '{text}'")]
    InvalidLiteral { text: String },

    /// Jump to a program counter no instruction carries.
    #[error("jump target {target} does not exist")]
    UnresolvedJumpTarget { target: i64 },

    /// The print sink rejected a write.
    #[error("output failed: {message}")]
    OutputFailed { message: String },

    /// The configured instruction budget ran out.
    #[error("step limit of {limit} instructions exceeded")]
    StepLimitExceeded { limit: u64 },
}

/// An [`ErrorKind`] annotated with the failing instruction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("PC {pc} ({opcode}): {kind}")]
pub struct RuntimeError {
    /// Program counter of the failing instruction.
    pub pc: usize,
    /// Mnemonic of the failing instruction, as written.
    pub opcode: String,
    pub kind: ErrorKind,
}
