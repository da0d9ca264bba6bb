//! Command-line runtime for the switchyard hook binary.
//!
//! The runtime owns argument parsing, configuration bootstrapping and
//! telemetry, then hands a single hook event to the matching handler. It is
//! written against generic IO handles so tests can substitute stdin, stdout
//! and stderr as well as the configuration loader.

use std::ffi::OsString;
use std::io::{Read, Write};
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use switchyard_config::Config;
use tracing::warn;

mod cli;
mod config;
mod errors;
mod hooks;
mod telemetry;

use cli::Cli;
use config::split_config_arguments;
pub(crate) use config::{ConfigLoader, OrthoConfigLoader};
pub(crate) use errors::AppError;

pub(crate) const CLI_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::runner");

/// Bundles the IO handles a hook invocation reads from and writes to.
pub(crate) struct IoStreams<'a, R: Read, W: Write, E: Write> {
    pub(crate) stdin: &'a mut R,
    pub(crate) stdout: &'a mut W,
    pub(crate) stderr: &'a mut E,
}

struct CliRunner<'a, R: Read, W: Write, E: Write, L: ConfigLoader> {
    io: IoStreams<'a, R, W, E>,
    loader: &'a L,
}

impl<'a, R, W, E, L> CliRunner<'a, R, W, E, L>
where
    R: Read,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    const fn new(io: IoStreams<'a, R, W, E>, loader: &'a L) -> Self {
        Self { io, loader }
    }

    fn run<I>(&mut self, args: I) -> ExitCode
    where
        I: IntoIterator<Item = OsString>,
    {
        let args: Vec<OsString> = args.into_iter().collect();
        let split = split_config_arguments(&args);

        let cli = match Cli::try_parse_from(&split.command_arguments) {
            Ok(cli) => cli,
            Err(error) => return self.report_usage(&error),
        };

        let (config, load_error) = match self.loader.load(&split.config_arguments) {
            Ok(config) => (config, None),
            Err(error) => (Config::default(), Some(error)),
        };

        if let Err(error) = telemetry::initialise(&config) {
            let _ = writeln!(self.io.stderr, "{error}");
        }
        if let Some(error) = load_error {
            warn!(target: CLI_TARGET, %error, "continuing with default configuration");
        }

        let result = hooks::execute(
            &cli.command,
            &config,
            &mut *self.io.stdin,
            &mut *self.io.stdout,
        );
        if let Err(error) = result {
            warn!(target: CLI_TARGET, %error, "hook produced no directive");
        }
        ExitCode::SUCCESS
    }

    fn report_usage(&mut self, error: &clap::Error) -> ExitCode {
        match error.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                let _ = write!(self.io.stdout, "{error}");
                ExitCode::SUCCESS
            }
            _ => {
                let _ = write!(self.io.stderr, "{error}");
                ExitCode::FAILURE
            }
        }
    }
}

/// Runs one hook invocation using the provided arguments and IO handles.
///
/// Only command-line usage errors produce a failing exit code. Every
/// runtime failure is logged to stderr and the run still succeeds, so a
/// misbehaving hook never blocks its host.
#[must_use]
pub fn run<I, R, W, E>(args: I, stdin: &mut R, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    R: Read,
    W: Write,
    E: Write,
{
    let io = IoStreams {
        stdin,
        stdout,
        stderr,
    };
    run_with_loader(args, io, &OrthoConfigLoader)
}

/// Runs the CLI with a custom configuration loader.
#[must_use]
pub(crate) fn run_with_loader<I, R, W, E, L>(
    args: I,
    io: IoStreams<'_, R, W, E>,
    loader: &L,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    R: Read,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    CliRunner::new(io, loader).run(args)
}
