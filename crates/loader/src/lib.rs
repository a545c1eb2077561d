//! microvm loader: program text ↔ instruction sequence.
//!
//! Each significant line is `PC OPCODE [ARGUMENT...]`. Program counters must
//! run `0, 1, 2, ...` with no gaps; blank and comment lines do not consume
//! one. The opcode is upper-cased, and everything after it is re-joined with
//! single spaces into one textual argument.
//!
//! # Usage
//!
//! ```
//! use microvm_loader::{load, render};
//!
//! let text = "# add two numbers\n0 load_const 10\n1 LOAD_CONST 20\n2 BINARY_ADD\n3 END\n";
//! let program = load(text).unwrap();
//! assert_eq!(program.len(), 4);
//! assert_eq!(
//!     render(&program),
//!     "0 LOAD_CONST 10\n1 LOAD_CONST 20\n2 BINARY_ADD\n3 END\n"
//! );
//! ```
//!
//! # Roundtrip Guarantee
//!
//! `load(&render(&program)) == Ok(program)` holds for every program `load`
//! produces.

pub mod error;

mod disassembler;
mod lexer;
mod parser;

pub use disassembler::render;
pub use error::LoadError;

use std::fs;
use std::path::Path;

use lexer::tokenize_line;
use microvm_common::Program;
use parser::parse_line;
use tracing::debug;

/// Load program text into a [`Program`].
///
/// Returns the first error encountered; nothing is executed.
pub fn load(text: &str) -> Result<Program, LoadError> {
    let mut instructions = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let tokens = tokenize_line(line);
        if let Some(instr) = parse_line(&tokens, idx + 1, instructions.len())? {
            instructions.push(instr);
        }
    }

    let program = Program::new(instructions)?;
    debug!(instructions = program.len(), "program loaded");
    Ok(program)
}

/// Read and load a program file.
pub fn load_file(path: impl AsRef<Path>) -> Result<Program, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    load(&text)
}
