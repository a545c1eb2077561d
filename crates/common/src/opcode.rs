//! Opcode definitions for the microvm instruction set.

/// Identifies the operation to perform.
///
/// Mnemonics that do not name one of these variants still load; the engine
/// rejects them when it reaches them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    // Variables and constants
    /// Parse the argument as a literal and push it.
    LoadConst,
    /// Push the value bound to the named variable.
    LoadFast,
    /// Pop a value and bind it to the named variable.
    StoreFast,
    /// Push the built-in named by the argument. Only `print` exists.
    LoadGlobal,
    /// Pop `n` arguments and a callee, then call it.
    CallFunction,

    // Operators
    /// Pop rhs, pop lhs, push the comparison named by the argument.
    CompareOp,
    /// Pop rhs, pop lhs, push lhs + rhs (or the string concatenation).
    BinaryAdd,
    /// Pop rhs, pop lhs, push lhs - rhs.
    BinarySubtract,
    /// Pop rhs, pop lhs, push lhs * rhs.
    BinaryMultiply,
    /// Pop rhs, pop lhs, push the truncated quotient as an integer.
    BinaryDivide,
    /// Pop rhs, pop lhs, push truthy(lhs) && truthy(rhs).
    BinaryAnd,
    /// Pop rhs, pop lhs, push truthy(lhs) || truthy(rhs).
    BinaryOr,
    /// Pop rhs, pop lhs, push lhs % rhs. Integers only.
    BinaryModulo,

    // Lists
    /// Pop index, pop list, pop value; store value into list[index].
    StoreSubscr,
    /// Pop index, pop list; push list[index].
    BinarySubscr,
    /// Pop `n` values and push them as one list in source order.
    BuildList,

    // Control flow
    /// Jump to the instruction with the target PC.
    JumpAbsolute,
    /// Pop a condition; jump when it is truthy.
    JumpIfTrue,
    /// Pop a condition; jump when it is falsy.
    JumpIfFalse,
    /// Halt execution.
    End,
}

/// All opcodes, in definition order.
pub const ALL_OPCODES: [Opcode; 20] = [
    Opcode::LoadConst,
    Opcode::LoadFast,
    Opcode::StoreFast,
    Opcode::LoadGlobal,
    Opcode::CallFunction,
    Opcode::CompareOp,
    Opcode::BinaryAdd,
    Opcode::BinarySubtract,
    Opcode::BinaryMultiply,
    Opcode::BinaryDivide,
    Opcode::BinaryAnd,
    Opcode::BinaryOr,
    Opcode::BinaryModulo,
    Opcode::StoreSubscr,
    Opcode::BinarySubscr,
    Opcode::BuildList,
    Opcode::JumpAbsolute,
    Opcode::JumpIfTrue,
    Opcode::JumpIfFalse,
    Opcode::End,
];

impl Opcode {
    /// Returns the canonical mnemonic for this opcode.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Opcode::LoadConst => "LOAD_CONST",
            Opcode::LoadFast => "LOAD_FAST",
            Opcode::StoreFast => "STORE_FAST",
            Opcode::LoadGlobal => "LOAD_GLOBAL",
            Opcode::CallFunction => "CALL_FUNCTION",
            Opcode::CompareOp => "COMPARE_OP",
            Opcode::BinaryAdd => "BINARY_ADD",
            Opcode::BinarySubtract => "BINARY_SUBTRACT",
            Opcode::BinaryMultiply => "BINARY_MULTIPLY",
            Opcode::BinaryDivide => "BINARY_DIVIDE",
            Opcode::BinaryAnd => "BINARY_AND",
            Opcode::BinaryOr => "BINARY_OR",
            Opcode::BinaryModulo => "BINARY_MODULO",
            Opcode::StoreSubscr => "STORE_SUBSCR",
            Opcode::BinarySubscr => "BINARY_SUBSCR",
            Opcode::BuildList => "BUILD_LIST",
            Opcode::JumpAbsolute => "JUMP_ABSOLUTE",
            Opcode::JumpIfTrue => "JUMP_IF_TRUE",
            Opcode::JumpIfFalse => "JUMP_IF_FALSE",
            Opcode::End => "END",
        }
    }

    /// Look up an opcode by upper-case mnemonic.
    ///
    /// `BINARY_SUBSTRACT` is accepted as an alias of `BINARY_SUBTRACT`;
    /// older program files spell it that way.
    pub fn from_mnemonic(mnemonic: &str) -> Option<Opcode> {
        if mnemonic == "BINARY_SUBSTRACT" {
            return Some(Opcode::BinarySubtract);
        }
        ALL_OPCODES
            .iter()
            .find(|op| op.mnemonic() == mnemonic)
            .copied()
    }

    /// Whether the opcode cannot execute without an argument.
    pub fn requires_argument(&self) -> bool {
        !matches!(
            self,
            Opcode::BinaryAdd
                | Opcode::BinarySubtract
                | Opcode::BinaryMultiply
                | Opcode::BinaryDivide
                | Opcode::BinaryAnd
                | Opcode::BinaryOr
                | Opcode::BinaryModulo
                | Opcode::StoreSubscr
                | Opcode::BinarySubscr
                | Opcode::End
        )
    }

    /// Whether the opcode may set the cursor instead of advancing it.
    pub fn is_jump(&self) -> bool {
        matches!(
            self,
            Opcode::JumpAbsolute | Opcode::JumpIfTrue | Opcode::JumpIfFalse
        )
    }
}
