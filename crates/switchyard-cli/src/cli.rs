//! Command-line surface of the `switchyard` binary.

use clap::{Parser, Subcommand};
use switchyard_core::FlagName;

/// Top-level arguments. Configuration flags are split off before parsing,
/// so only the subcommand and its options reach clap.
#[derive(Debug, Parser)]
#[command(
    name = "switchyard",
    version,
    about = "Routes prompts and tool events to registered handlers",
    long_about = None,
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub(crate) enum Command {
    /// Route a submitted prompt to a handler (UserPromptSubmit).
    Route,
    /// Check a written or edited file against governance rules (PostToolUse).
    Govern,
    /// Warn when execution tools run outside a skill or command (PreToolUse).
    Enforce,
    /// Suggest a structured interview for a vague prompt (UserPromptSubmit).
    Interview {
        /// Stay silent and leave the prompt to the router.
        #[arg(long)]
        defer: bool,
    },
    /// Raise or inspect activity flags.
    Flag {
        #[command(subcommand)]
        action: FlagCommand,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub(crate) enum FlagCommand {
    /// Raise a flag now.
    Set {
        /// One of command-active, skill-active or interview-active.
        #[arg(value_parser = parse_flag_name)]
        flag: FlagName,
    },
    /// Print whether each flag is active, as JSON.
    Status,
}

fn parse_flag_name(value: &str) -> Result<FlagName, String> {
    FlagName::parse(value).ok_or_else(|| {
        let known: Vec<&str> = FlagName::ALL.iter().map(|flag| flag.as_str()).collect();
        format!("unknown flag '{value}' (expected one of: {})", known.join(", "))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rstest::rstest;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[rstest]
    #[case::route(&["switchyard", "route"])]
    #[case::govern(&["switchyard", "govern"])]
    #[case::enforce(&["switchyard", "enforce"])]
    #[case::interview(&["switchyard", "interview", "--defer"])]
    #[case::flag_status(&["switchyard", "flag", "status"])]
    fn subcommands_parse(#[case] args: &[&str]) {
        assert!(Cli::try_parse_from(args).is_ok(), "failed to parse {args:?}");
    }

    #[test]
    fn flag_names_are_validated() {
        let cli = Cli::try_parse_from(["switchyard", "flag", "set", "Skill-Active"])
            .expect("parse flag set");
        assert!(matches!(
            cli.command,
            Command::Flag {
                action: FlagCommand::Set {
                    flag: FlagName::SkillActive
                }
            }
        ));
        let error = Cli::try_parse_from(["switchyard", "flag", "set", "busy"])
            .expect_err("unknown flag should fail");
        assert!(error.to_string().contains("unknown flag 'busy'"));
    }
}
