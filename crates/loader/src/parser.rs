//! Line parser: tokens → instruction, with PC sequencing.

use microvm_common::Instruction;

use crate::error::LoadError;

/// Parse the tokens of one line.
///
/// Returns `Ok(None)` for lines with no tokens. `expected_pc` is the PC the
/// next accepted instruction must carry.
pub(crate) fn parse_line(
    tokens: &[&str],
    line_num: usize,
    expected_pc: usize,
) -> Result<Option<Instruction>, LoadError> {
    let (pc_token, opcode, rest) = match tokens {
        [] => return Ok(None),
        [_] => return Err(LoadError::Syntax { line: line_num }),
        [pc, opcode, rest @ ..] => (*pc, *opcode, rest),
    };

    let pc: usize = pc_token.parse().map_err(|_| LoadError::InvalidPc {
        line: line_num,
        token: pc_token.to_string(),
    })?;
    if pc != expected_pc {
        return Err(LoadError::PcOutOfSequence {
            line: line_num,
            found: pc,
            expected: expected_pc,
        });
    }

    let arg = if rest.is_empty() {
        None
    } else {
        Some(rest.join(" "))
    };
    Ok(Some(Instruction::new(pc, opcode, arg.as_deref())))
}
