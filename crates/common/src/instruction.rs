//! Decoded instruction records.
//!
//! An instruction is the triple `(program counter, opcode, optional argument)`
//! produced by the loader. The mnemonic is kept verbatim (upper-cased) so an
//! unrecognised opcode can still be reported by name when it is reached.

use std::fmt;

use crate::opcode::Opcode;

/// A single decoded instruction. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pc: usize,
    mnemonic: String,
    opcode: Option<Opcode>,
    arg: Option<String>,
}

impl Instruction {
    /// Create an instruction from its textual parts.
    ///
    /// The mnemonic is upper-cased before lookup. An unknown mnemonic is
    /// accepted here and leaves [`opcode`](Self::opcode) as `None`.
    pub fn new(pc: usize, mnemonic: &str, arg: Option<&str>) -> Self {
        let mnemonic = mnemonic.to_uppercase();
        let opcode = Opcode::from_mnemonic(&mnemonic);
        Self {
            pc,
            mnemonic,
            opcode,
            arg: arg.map(str::to_string),
        }
    }

    /// Create an instruction for a known opcode.
    pub fn with_opcode(pc: usize, opcode: Opcode, arg: Option<&str>) -> Self {
        Self {
            pc,
            mnemonic: opcode.mnemonic().to_string(),
            opcode: Some(opcode),
            arg: arg.map(str::to_string),
        }
    }

    /// The program counter label.
    pub fn pc(&self) -> usize {
        self.pc
    }

    /// The upper-cased mnemonic as written in the source.
    pub fn mnemonic(&self) -> &str {
        &self.mnemonic
    }

    /// The decoded opcode, or `None` for an unrecognised mnemonic.
    pub fn opcode(&self) -> Option<Opcode> {
        self.opcode
    }

    /// The textual argument, if any.
    pub fn argument(&self) -> Option<&str> {
        self.arg.as_deref()
    }

    pub fn has_argument(&self) -> bool {
        self.arg.is_some()
    }
}

/// Canonical one-line form: `PC OPCODE [ARG]`.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.pc, self.mnemonic)?;
        if let Some(arg) = &self.arg {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}
