//! Hook command handlers.
//!
//! Each handler reads at most one event from stdin and writes at most one
//! envelope to stdout. Runtime failures surface as [`AppError`] so the
//! runner can log them; none of them change the exit status.

use std::collections::BTreeMap;
use std::io::{Read, Write};

use switchyard_config::Config;
use switchyard_core::{
    ActivityFlags, Directive, ExtensionMap, ExtensionRoute, Fallback, FileFlagStore, FileRegistry,
    HookInput, InterviewSuggester, PromptRouter, RegistrySource, SystemClock, ToolGuard,
    governance,
};
use tracing::debug;

use crate::cli::{Command, FlagCommand};
use crate::{AppError, CLI_TARGET};

type Flags = ActivityFlags<FileFlagStore, SystemClock>;

pub(crate) fn execute<R, W>(
    command: &Command,
    config: &Config,
    stdin: &mut R,
    stdout: &mut W,
) -> Result<(), AppError>
where
    R: Read,
    W: Write,
{
    match command {
        Command::Route => {
            let Some(input) = read_input(stdin)? else {
                return Ok(());
            };
            let router = PromptRouter::new(registry_source(config), activity_flags(config))
                .with_extensions(extension_map(config))
                .with_fallback(fallback(config));
            emit(router.route(input.prompt()), stdout)
        }
        Command::Govern => {
            let Some(input) = read_input(stdin)? else {
                return Ok(());
            };
            let registry = match registry_source(config).load() {
                Ok(registry) => registry,
                Err(error) => {
                    debug!(target: CLI_TARGET, %error, "registry unavailable; skipping governance");
                    return Ok(());
                }
            };
            emit(
                governance::evaluate(input.tool_name(), input.tool_input(), &registry),
                stdout,
            )
        }
        Command::Enforce => {
            let Some(input) = read_input(stdin)? else {
                return Ok(());
            };
            let guard = ToolGuard::new(activity_flags(config)).with_delegate(fallback(config));
            emit(guard.check(input.tool_name()), stdout)
        }
        Command::Interview { defer } => {
            let Some(input) = read_input(stdin)? else {
                return Ok(());
            };
            let suggester = InterviewSuggester::new(activity_flags(config))
                .with_defer(*defer || config.defer_interview());
            emit(suggester.suggest(input.prompt()), stdout)
        }
        Command::Flag {
            action: FlagCommand::Set { flag },
        } => {
            activity_flags(config).set(*flag);
            Ok(())
        }
        Command::Flag {
            action: FlagCommand::Status,
        } => write_status(&activity_flags(config), stdout),
    }
}

fn read_input<R: Read>(stdin: &mut R) -> Result<Option<HookInput>, AppError> {
    let input = HookInput::read_from(stdin).map_err(AppError::ReadInput)?;
    if input.is_none() {
        debug!(target: CLI_TARGET, "empty hook input");
    }
    Ok(input)
}

fn emit<W: Write>(directive: Option<Directive>, stdout: &mut W) -> Result<(), AppError> {
    let Some(directive) = directive else {
        return Ok(());
    };
    debug!(target: CLI_TARGET, event = %directive.event(), "emitting directive");
    directive
        .into_output()
        .write_to(stdout)
        .map_err(AppError::WriteOutput)
}

fn write_status<W: Write>(flags: &Flags, stdout: &mut W) -> Result<(), AppError> {
    let status: BTreeMap<&str, bool> = flags
        .snapshot()
        .into_iter()
        .map(|(flag, active)| (flag.as_str(), active))
        .collect();
    serde_json::to_writer(&mut *stdout, &status).map_err(AppError::SerialiseStatus)?;
    writeln!(stdout).map_err(AppError::WriteStatus)
}

fn activity_flags(config: &Config) -> Flags {
    ActivityFlags::with_system_clock(FileFlagStore::new(config.cache_dir()))
}

fn registry_source(config: &Config) -> FileRegistry {
    FileRegistry::new(config.registry_path())
}

/// Configured routes replace the built-in table; none configured keeps it.
fn extension_map(config: &Config) -> ExtensionMap {
    if config.file_routes().is_empty() {
        return ExtensionMap::default();
    }
    ExtensionMap::from_routes(config.file_routes().iter().map(|route| {
        ExtensionRoute::new(&route.extension, &route.handler, &route.tool)
    }))
}

fn fallback(config: &Config) -> Fallback {
    Fallback::new(config.fallback_handler(), config.fallback_tool())
}
