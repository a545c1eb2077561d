//! Main execution loop and opcode dispatch for the microvm.

use microvm_common::{Instruction, Opcode, Value};
use tracing::{debug, trace};

use crate::error::{ErrorKind, RuntimeError};
use crate::literal::parse_literal;
use crate::machine::{State, VM};
use crate::ops::{self, CompareOp};
use crate::trace::StepSnapshot;

/// How the cursor moves after an instruction succeeds.
enum Flow {
    /// Advance to the next instruction.
    Next,
    /// Continue at this storage index; no advance.
    Jump(usize),
    Halt,
}

impl<'a> VM<'a> {
    /// Execute until END, the end of the program, or an error.
    ///
    /// Returns the terminal state (`Halted` or `Exhausted`) on success.
    pub fn run(&mut self) -> Result<State, RuntimeError> {
        loop {
            match self.step()? {
                State::Running => {}
                state => return Ok(state),
            }
        }
    }

    /// Execute a single instruction and return the resulting state.
    ///
    /// Stepping a VM that already reached a terminal state does nothing.
    pub fn step(&mut self) -> Result<State, RuntimeError> {
        if self.state.is_terminal() {
            return Ok(self.state);
        }

        let program = self.program;
        let Some(instr) = program.get(self.cursor) else {
            self.state = State::Exhausted;
            debug!(steps = self.steps, "program exhausted");
            return Ok(self.state);
        };

        if let Some(limit) = self.config.max_steps {
            if self.steps >= limit {
                return Err(self.fault(instr, ErrorKind::StepLimitExceeded { limit }));
            }
        }

        let depth = self.stack.len();
        if let Some(tracer) = self.tracer.as_mut() {
            tracer.on_step(&StepSnapshot {
                pc: instr.pc(),
                opcode: instr.mnemonic(),
                argument: instr.argument(),
                stack_depth: depth,
            });
        }
        trace!(pc = instr.pc(), opcode = instr.mnemonic(), depth, "step");

        self.steps += 1;
        match self.dispatch(instr) {
            Ok(Flow::Next) => self.cursor += 1,
            Ok(Flow::Jump(idx)) => self.cursor = idx,
            Ok(Flow::Halt) => {
                self.cursor += 1;
                self.state = State::Halted;
                debug!(pc = instr.pc(), steps = self.steps, "halted");
                return Ok(self.state);
            }
            Err(kind) => {
                let err = self.fault(instr, kind);
                debug!(error = %err, "faulted");
                return Err(err);
            }
        }

        if self.cursor >= program.len() {
            self.state = State::Exhausted;
            debug!(steps = self.steps, "program exhausted");
        }
        Ok(self.state)
    }

    fn dispatch(&mut self, instr: &Instruction) -> Result<Flow, ErrorKind> {
        let Some(opcode) = instr.opcode() else {
            return Err(ErrorKind::UnsupportedOpcode {
                mnemonic: instr.mnemonic().to_string(),
            });
        };

        match opcode {
            // Variables and constants
            Opcode::LoadConst => {
                let value = parse_literal(argument(instr)?)?;
                self.stack.push(value);
            }
            Opcode::LoadFast => {
                let value = self.variables.get(argument(instr)?)?;
                self.stack.push(value);
            }
            Opcode::StoreFast => {
                let name = argument(instr)?;
                let value = self.stack.pop()?;
                self.variables.set(name, value);
            }
            Opcode::LoadGlobal => {
                let name = argument(instr)?;
                if !name.eq_ignore_ascii_case("print") {
                    return Err(ErrorKind::UnsupportedGlobal {
                        name: name.to_string(),
                    });
                }
                self.stack.push(Value::NativePrint);
            }
            Opcode::CallFunction => self.exec_call(instr)?,

            // Operators
            Opcode::CompareOp => {
                let symbol = argument(instr)?;
                let rhs = self.stack.pop()?;
                let lhs = self.stack.pop()?;
                let op = CompareOp::parse(symbol).ok_or_else(|| ErrorKind::MalformedInstruction {
                    reason: format!("unknown comparison operator '{symbol}'"),
                })?;
                let result = ops::compare(&lhs, &rhs, op)?;
                self.stack.push(Value::Bool(result));
            }
            Opcode::BinaryAdd => self.exec_binary(ops::add)?,
            Opcode::BinarySubtract => self.exec_binary(ops::sub)?,
            Opcode::BinaryMultiply => self.exec_binary(ops::mul)?,
            Opcode::BinaryDivide => self.exec_binary(ops::div)?,
            Opcode::BinaryModulo => self.exec_binary(ops::modulo)?,
            Opcode::BinaryAnd => self.exec_binary(|a, b| Ok(ops::logical_and(a, b)))?,
            Opcode::BinaryOr => self.exec_binary(|a, b| Ok(ops::logical_or(a, b)))?,

            // Lists
            Opcode::StoreSubscr => {
                let index = self.stack.pop()?;
                let list = self.stack.pop()?;
                let value = self.stack.pop()?;
                ops::set_subscript(&list, &index, value)?;
            }
            Opcode::BinarySubscr => {
                let index = self.stack.pop()?;
                let list = self.stack.pop()?;
                let element = ops::get_subscript(&list, &index)?;
                self.stack.push(element);
            }
            Opcode::BuildList => {
                let count = count_argument(instr)?;
                let items = self.stack.pop_n(count)?;
                self.stack.push(Value::list(items));
            }

            // Control flow
            Opcode::JumpAbsolute => {
                let target = self.resolve_target(jump_argument(instr)?)?;
                return Ok(Flow::Jump(target));
            }
            Opcode::JumpIfTrue | Opcode::JumpIfFalse => {
                let target = jump_argument(instr)?;
                let condition = self.stack.pop()?;
                // The target is only looked up when the branch is taken.
                if condition.is_truthy() == (opcode == Opcode::JumpIfTrue) {
                    return Ok(Flow::Jump(self.resolve_target(target)?));
                }
            }
            Opcode::End => return Ok(Flow::Halt),
        }

        Ok(Flow::Next)
    }

    /// Pop rhs, pop lhs, push `op(lhs, rhs)`.
    fn exec_binary(
        &mut self,
        op: impl FnOnce(&Value, &Value) -> Result<Value, ErrorKind>,
    ) -> Result<(), ErrorKind> {
        let rhs = self.stack.pop()?;
        let lhs = self.stack.pop()?;
        let result = op(&lhs, &rhs)?;
        self.stack.push(result);
        Ok(())
    }

    /// CALL_FUNCTION n: pop n arguments, then the callee. Only print runs.
    fn exec_call(&mut self, instr: &Instruction) -> Result<(), ErrorKind> {
        let arity = count_argument(instr)?;
        let args = self.stack.pop_n(arity)?;
        let callee = self.stack.pop()?;
        if !matches!(callee, Value::NativePrint) {
            return Err(ErrorKind::UnsupportedCall {
                callee: callee.type_tag(),
            });
        }

        let mut line = args
            .iter()
            .map(Value::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        line.push('\n');
        self.emit(&line)
    }
}

fn argument(instr: &Instruction) -> Result<&str, ErrorKind> {
    instr
        .argument()
        .ok_or_else(|| ErrorKind::MalformedInstruction {
            reason: format!("{} requires an argument", instr.mnemonic()),
        })
}

/// A non-negative count (arity or list length).
fn count_argument(instr: &Instruction) -> Result<usize, ErrorKind> {
    let text = argument(instr)?;
    text.trim()
        .parse()
        .map_err(|_| ErrorKind::MalformedInstruction {
            reason: format!("invalid count '{text}'"),
        })
}

fn jump_argument(instr: &Instruction) -> Result<i64, ErrorKind> {
    let text = argument(instr)?;
    text.trim()
        .parse()
        .map_err(|_| ErrorKind::MalformedInstruction {
            reason: format!("invalid jump target '{text}'"),
        })
}
