//! VM state management: stack, variables, cursor, output sink, tracer.

use std::io::{self, Write};

use microvm_common::{Instruction, Program};

use crate::error::{ErrorKind, RuntimeError};
use crate::stack::OperandStack;
use crate::store::VariableStore;
use crate::trace::Tracer;

/// Execution limits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VmConfig {
    /// Fail with `StepLimitExceeded` once this many instructions have run
    /// without the program terminating. `None` means unlimited.
    pub max_steps: Option<u64>,
}

/// Where the run loop stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// More instructions to execute.
    Running,
    /// Stopped at an END instruction.
    Halted,
    /// Ran past the last instruction without an END. Not an error.
    Exhausted,
    /// An instruction failed; the error was returned to the caller.
    Faulted,
}

impl State {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, State::Running)
    }
}

/// The microvm virtual machine. One instance runs one program once.
pub struct VM<'a> {
    /// The program being executed.
    pub(crate) program: &'a Program,
    /// Operand stack.
    pub(crate) stack: OperandStack,
    /// Flat global namespace.
    pub(crate) variables: VariableStore,
    /// Storage index of the next instruction.
    pub(crate) cursor: usize,
    pub(crate) state: State,
    /// Instructions executed so far.
    pub(crate) steps: u64,
    pub(crate) config: VmConfig,
    /// Sink for `print`.
    pub(crate) output: Box<dyn Write + 'a>,
    pub(crate) tracer: Option<Box<dyn Tracer + 'a>>,
}

impl<'a> VM<'a> {
    /// Create a VM that prints to stdout.
    pub fn new(program: &'a Program) -> Self {
        Self {
            program,
            stack: OperandStack::new(),
            variables: VariableStore::new(),
            cursor: 0,
            state: State::Running,
            steps: 0,
            config: VmConfig::default(),
            output: Box::new(io::stdout()),
            tracer: None,
        }
    }

    /// Send `print` output to `output` instead of stdout.
    pub fn with_output(mut self, output: impl Write + 'a) -> Self {
        self.output = Box::new(output);
        self
    }

    /// Attach a per-step observer.
    pub fn with_tracer(mut self, tracer: impl Tracer + 'a) -> Self {
        self.tracer = Some(Box::new(tracer));
        self
    }

    pub fn with_config(mut self, config: VmConfig) -> Self {
        self.config = config;
        self
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Storage index of the next instruction to execute.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of instructions executed so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn stack(&self) -> &OperandStack {
        &self.stack
    }

    pub fn variables(&self) -> &VariableStore {
        &self.variables
    }

    /// Resolve a jump target PC to its storage index.
    pub(crate) fn resolve_target(&self, target: i64) -> Result<usize, ErrorKind> {
        usize::try_from(target)
            .ok()
            .and_then(|pc| self.program.index_of(pc))
            .ok_or(ErrorKind::UnresolvedJumpTarget { target })
    }

    /// Write one `print` line and flush it.
    pub(crate) fn emit(&mut self, line: &str) -> Result<(), ErrorKind> {
        self.output
            .write_all(line.as_bytes())
            .and_then(|()| self.output.flush())
            .map_err(|e| ErrorKind::OutputFailed {
                message: e.to_string(),
            })
    }

    /// Move to `Faulted` and annotate `kind` with the failing instruction.
    pub(crate) fn fault(&mut self, instr: &Instruction, kind: ErrorKind) -> RuntimeError {
        self.state = State::Faulted;
        RuntimeError {
            pc: instr.pc(),
            opcode: instr.mnemonic().to_string(),
            kind,
        }
    }
}
