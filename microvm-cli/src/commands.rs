//! Command implementations for the microvm CLI.
//!
//! Each command reports its own errors on stderr and returns the exit code.

use std::io;
use std::path::Path;

use microvm_common::Program;
use microvm_vm::{VmConfig, WriteTracer, VM};
use tracing::debug;

/// Load a program file, reporting failures with exit code 1.
fn load(path: &Path) -> Result<Program, i32> {
    microvm_loader::load_file(path).map_err(|e| {
        eprintln!("error: {e}");
        1
    })
}

/// Load and execute a program. Print output goes to stdout.
pub fn run(path: &Path, trace: bool, max_steps: Option<u64>) -> Result<(), i32> {
    let program = load(path)?;

    let mut vm = VM::new(&program).with_config(VmConfig { max_steps });
    if trace {
        vm = vm.with_tracer(WriteTracer::new(io::stderr()));
    }

    match vm.run() {
        Ok(state) => {
            debug!(?state, steps = vm.steps(), "run finished");
            Ok(())
        }
        Err(e) => {
            eprintln!("runtime error: {e}");
            Err(3)
        }
    }
}

/// Load a program and print its canonical listing.
pub fn check(path: &Path) -> Result<(), i32> {
    let program = load(path)?;
    print!("{}", microvm_loader::render(&program));
    Ok(())
}
