//! Soft guard against execution tools on the main thread.
//!
//! Invoking the `Skill` tool raises `skill-active`. An execution tool used
//! while neither `skill-active` nor `command-active` is live earns a
//! delegation warning. The guard never blocks a tool.

use tracing::debug;

use crate::directive::Directive;
use crate::flags::{ActivityFlags, Clock, FlagName, FlagStore, SystemClock};
use crate::router::Fallback;

/// Tracing target for the tool guard.
pub(crate) const GUARD_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::enforcer");

/// Tools that change files or run commands.
pub const EXECUTION_TOOLS: [&str; 4] = ["Edit", "Write", "Bash", "NotebookEdit"];

/// Tool that starts a skill.
pub const SKILL_TOOL: &str = "Skill";

/// Returns `true` for tools that should normally run in a delegated agent.
#[must_use]
pub fn is_execution_tool(tool_name: &str) -> bool {
    EXECUTION_TOOLS.contains(&tool_name)
}

/// Watches tool invocations about to run.
#[derive(Debug)]
pub struct ToolGuard<S, C = SystemClock> {
    flags: ActivityFlags<S, C>,
    delegate: Fallback,
}

impl<S, C> ToolGuard<S, C> {
    /// Creates a guard that suggests delegating to the default handler.
    #[must_use]
    pub fn new(flags: ActivityFlags<S, C>) -> Self {
        Self {
            flags,
            delegate: Fallback::default(),
        }
    }

    /// Replaces the handler named in warnings.
    #[must_use]
    pub fn with_delegate(mut self, delegate: Fallback) -> Self {
        self.delegate = delegate;
        self
    }

    /// Returns the activity flags the guard consults.
    #[must_use]
    pub const fn flags(&self) -> &ActivityFlags<S, C> {
        &self.flags
    }
}

impl<S, C> ToolGuard<S, C>
where
    S: FlagStore,
    C: Clock,
{
    /// Inspects one tool invocation, returning a warning when needed.
    #[must_use]
    pub fn check(&self, tool_name: &str) -> Option<Directive> {
        if tool_name == SKILL_TOOL {
            self.flags.set(FlagName::SkillActive);
            return None;
        }
        if !is_execution_tool(tool_name) {
            return None;
        }
        if self.flags.is_active(FlagName::SkillActive)
            || self.flags.is_active(FlagName::CommandActive)
        {
            debug!(target: GUARD_TARGET, tool = tool_name, "execution tool inside skill or command");
            return None;
        }
        debug!(target: GUARD_TARGET, tool = tool_name, "execution tool on main thread");
        Some(Directive::DelegationWarning {
            tool: tool_name.to_owned(),
            handler: self.delegate.handler().to_owned(),
            delegate_tool: self.delegate.tool().to_owned(),
        })
    }
}
