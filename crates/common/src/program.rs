//! Program representation: an ordered instruction sequence plus the
//! PC → index table used to resolve jump targets.

use std::collections::HashMap;

use crate::error::ProgramError;
use crate::instruction::Instruction;

/// An ordered sequence of instructions, immutable for the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    instructions: Vec<Instruction>,
    pc_index: HashMap<usize, usize>,
}

impl Program {
    /// Build a program, indexing every instruction by its PC.
    ///
    /// Fails if two instructions share a PC; the table must map each PC to
    /// exactly one instruction.
    pub fn new(instructions: Vec<Instruction>) -> Result<Self, ProgramError> {
        let mut pc_index = HashMap::with_capacity(instructions.len());
        for (idx, instr) in instructions.iter().enumerate() {
            if let Some(first) = pc_index.insert(instr.pc(), idx) {
                return Err(ProgramError::DuplicatePc {
                    pc: instr.pc(),
                    first,
                    second: idx,
                });
            }
        }
        Ok(Self {
            instructions,
            pc_index,
        })
    }

    /// The instruction stream, in execution order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Instruction at storage index `idx`.
    pub fn get(&self, idx: usize) -> Option<&Instruction> {
        self.instructions.get(idx)
    }

    /// Storage index of the instruction labelled `pc`.
    pub fn index_of(&self, pc: usize) -> Option<usize> {
        self.pc_index.get(&pc).copied()
    }

    /// Number of instructions in the program.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Returns true if the program has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}
