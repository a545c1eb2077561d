//! microvm common types.
//!
//! This crate provides the data structures shared by the loader and the
//! engine:
//!
//! - [`Value`]: the tagged runtime value, with shared [`List`] storage
//! - [`TypeTag`]: descriptive tag derived from a value's variant
//! - [`Opcode`]: the instruction set
//! - [`Instruction`]: a `(pc, opcode, argument)` record
//! - [`Program`]: an instruction sequence with its PC → index table
//! - [`ProgramError`]: errors from building a program

pub mod error;
pub mod instruction;
pub mod opcode;
pub mod program;
pub mod type_tag;
pub mod value;

// Re-export commonly used types at the crate root.
pub use error::ProgramError;
pub use instruction::Instruction;
pub use opcode::Opcode;
pub use program::Program;
pub use type_tag::TypeTag;
pub use value::{List, Value};
