//! Canonical listing: program → text.
//!
//! One `PC OPCODE [ARG]` line per instruction. No comments, no blank lines,
//! single spaces between fields.

use microvm_common::Program;

pub fn render(program: &Program) -> String {
    let mut out = String::new();
    for instr in program.instructions() {
        out.push_str(&instr.to_string());
        out.push('\n');
    }
    out
}
