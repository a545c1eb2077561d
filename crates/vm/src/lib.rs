//! microvm execute engine: runs decoded instruction sequences.
//!
//! The VM is a stack machine with:
//! - An operand stack passing values between instructions
//! - A single flat variable store keyed by name
//! - A cursor over the instruction sequence; jumps resolve target PCs
//!   through the program's PC → index table
//!
//! # Usage
//!
//! ```
//! use microvm_common::{Instruction, Program};
//! use microvm_vm::{State, VM};
//!
//! let program = Program::new(vec![
//!     Instruction::new(0, "LOAD_GLOBAL", Some("print")),
//!     Instruction::new(1, "LOAD_CONST", Some("42")),
//!     Instruction::new(2, "CALL_FUNCTION", Some("1")),
//!     Instruction::new(3, "END", None),
//! ])
//! .unwrap();
//!
//! let mut out = Vec::new();
//! let state = VM::new(&program).with_output(&mut out).run().unwrap();
//! assert_eq!(state, State::Halted);
//! assert_eq!(out, b"42\n");
//! ```

pub mod error;
pub mod execute;
pub mod literal;
pub mod machine;
pub mod ops;
pub mod stack;
pub mod store;
pub mod trace;

pub use error::{ErrorKind, RuntimeError};
pub use literal::parse_literal;
pub use machine::{State, VmConfig, VM};
pub use stack::OperandStack;
pub use store::{Variable, VariableStore};
pub use trace::{StepSnapshot, Tracer, WriteTracer};

use microvm_common::Program;

/// Execute a program, printing to stdout.
///
/// Returns the terminal state: `Halted` after END, `Exhausted` when the
/// program ran out of instructions.
///
/// # Errors
///
/// Returns [`RuntimeError`] annotated with the failing PC and opcode if any
/// instruction fails.
pub fn run(program: &Program) -> Result<State, RuntimeError> {
    VM::new(program).run()
}
