//! microvm CLI: load and execute instruction listings.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Usage or load error
//! - 3: Runtime error

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "microvm", version)]
#[command(about = "Run stack-machine instruction listings")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load and execute a program
    Run {
        /// Program listing (one `PC OPCODE [ARG]` per line)
        file: PathBuf,

        /// Write one line per executed instruction to stderr
        #[arg(long)]
        trace: bool,

        /// Fail once this many instructions have run
        #[arg(long, env = "MICROVM_MAX_STEPS")]
        max_steps: Option<u64>,
    },
    /// Load a program and print its canonical listing
    Check {
        /// Program listing
        file: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };

    let result = match cli.command {
        Command::Run {
            file,
            trace,
            max_steps,
        } => commands::run(&file, trace, max_steps),
        Command::Check { file } => commands::check(&file),
    };

    if let Err(code) = result {
        process::exit(code);
    }
}
