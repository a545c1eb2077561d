//! Per-step trace hook.
//!
//! A [`Tracer`] sees a read-only [`StepSnapshot`] before each instruction
//! executes. It cannot reach VM state, so it cannot change what runs.

use std::fmt;
use std::io::Write;

/// What the engine is about to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepSnapshot<'a> {
    pub pc: usize,
    pub opcode: &'a str,
    pub argument: Option<&'a str>,
    pub stack_depth: usize,
}

/// `PC 3  BINARY_ADD       arg=""  stack=2`
impl fmt::Display for StepSnapshot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PC {}  {:<16} arg={:?}  stack={}",
            self.pc,
            self.opcode,
            self.argument.unwrap_or(""),
            self.stack_depth
        )
    }
}

/// Observer invoked once per executed step.
pub trait Tracer {
    fn on_step(&mut self, snapshot: &StepSnapshot<'_>);
}

impl<F> Tracer for F
where
    F: FnMut(&StepSnapshot<'_>),
{
    fn on_step(&mut self, snapshot: &StepSnapshot<'_>) {
        self(snapshot)
    }
}

/// Writes one line per step to any writer.
///
/// Write errors are dropped; a trace sink never fails the run.
pub struct WriteTracer<W: Write> {
    out: W,
}

impl<W: Write> WriteTracer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Tracer for WriteTracer<W> {
    fn on_step(&mut self, snapshot: &StepSnapshot<'_>) {
        let _ = writeln!(self.out, "{snapshot}");
    }
}
