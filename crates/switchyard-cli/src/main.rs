//! Hook entrypoint for the switchyard dispatch classifier.
//!
//! The binary delegates to [`switchyard_cli::run`], which loads
//! configuration, reads one hook event from stdin and writes at most one
//! hook envelope to stdout.

use std::io::{self, StderrLock, StdinLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdin: StdinLock<'_> = io::stdin().lock();
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    switchyard_cli::run(std::env::args_os(), &mut stdin, &mut stdout, &mut stderr)
}
