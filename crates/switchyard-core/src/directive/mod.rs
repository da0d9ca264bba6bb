//! Directives and the hook envelope that carries them.
//!
//! Each invocation emits at most one [`Directive`]. Routing and governance
//! directives are compact tokens (`@DISPATCH:...`, `@GOVERNANCE:...`) that
//! the host's instructions interpret; guard warnings and interview
//! suggestions are plain sentences addressed to the model.

use std::fmt;
use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::error::DispatchError;

/// Host event that triggered a hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HookEvent {
    /// A user prompt is about to be processed.
    UserPromptSubmit,
    /// A tool is about to run.
    PreToolUse,
    /// A tool has just run.
    PostToolUse,
}

impl HookEvent {
    /// Returns the event name as the host spells it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UserPromptSubmit => "UserPromptSubmit",
            Self::PreToolUse => "PreToolUse",
            Self::PostToolUse => "PostToolUse",
        }
    }
}

impl fmt::Display for HookEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single piece of context a hook hands back to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Route the prompt to `handler` through `tool`.
    Dispatch {
        /// Handler name.
        handler: String,
        /// Tool used to invoke the handler.
        tool: String,
    },
    /// Send an edited file through a review rule.
    Governance {
        /// Rule that fired.
        rule: String,
        /// Tool used to run the review.
        tool: String,
        /// Base name of the edited file.
        file: String,
        /// Human-readable trigger.
        reason: String,
    },
    /// Warn that an execution tool is being used on the main thread.
    DelegationWarning {
        /// Tool about to run.
        tool: String,
        /// Handler work should be delegated to.
        handler: String,
        /// Tool used to delegate.
        delegate_tool: String,
    },
    /// Suggest a structured interview for an underspecified prompt.
    InterviewSuggestion {
        /// Labels of the missing prompt qualities.
        missing: Vec<String>,
    },
}

impl Directive {
    /// Shorthand for [`Directive::Dispatch`].
    #[must_use]
    pub fn dispatch(handler: impl Into<String>, tool: impl Into<String>) -> Self {
        Self::Dispatch {
            handler: handler.into(),
            tool: tool.into(),
        }
    }

    /// Host event this directive answers.
    #[must_use]
    pub const fn event(&self) -> HookEvent {
        match self {
            Self::Dispatch { .. } | Self::InterviewSuggestion { .. } => HookEvent::UserPromptSubmit,
            Self::Governance { .. } => HookEvent::PostToolUse,
            Self::DelegationWarning { .. } => HookEvent::PreToolUse,
        }
    }

    /// Wraps the directive in its hook envelope.
    #[must_use]
    pub fn into_output(self) -> HookOutput {
        HookOutput::new(self.event(), self.to_string())
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dispatch { handler, tool } => write!(f, "@DISPATCH:{handler}:{tool}"),
            Self::Governance {
                rule,
                tool,
                file,
                reason,
            } => write!(f, "@GOVERNANCE:{rule}:{tool}:{file}:{reason}"),
            Self::DelegationWarning {
                tool,
                handler,
                delegate_tool,
            } => write!(
                f,
                "WARNING: You are about to use {tool} directly on the main thread. \
                 The dispatch protocol requires execution work to be delegated to agents \
                 via {delegate_tool} tool. If you are executing a Skill or /slash command, \
                 this is expected, so continue. Otherwise, STOP and dispatch this work to \
                 an agent: {delegate_tool}(subagent_type=\"{handler}\", \
                 prompt=\"<your task description>\")"
            ),
            Self::InterviewSuggestion { missing } => write!(
                f,
                "This prompt may benefit from a structured interview to clarify requirements \
                 (missing: {}). Consider suggesting /interview to the user if the request \
                 seems underspecified. Do NOT auto-invoke; let the user decide.",
                missing.join(", ")
            ),
        }
    }
}

/// Envelope written to stdout.
///
/// ```
/// use switchyard_core::{Directive, HookOutput};
///
/// let output = Directive::dispatch("pdf", "Skill").into_output();
/// let json = output.to_json().unwrap_or_default();
/// assert_eq!(
///     json,
///     r#"{"hookSpecificOutput":{"hookEventName":"UserPromptSubmit","additionalContext":"@DISPATCH:pdf:Skill"}}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookOutput {
    hook_specific_output: HookSpecificOutput,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HookSpecificOutput {
    hook_event_name: HookEvent,
    additional_context: String,
}

impl HookOutput {
    /// Creates an envelope for `event` carrying `context`.
    #[must_use]
    pub fn new(event: HookEvent, context: impl Into<String>) -> Self {
        Self {
            hook_specific_output: HookSpecificOutput {
                hook_event_name: event,
                additional_context: context.into(),
            },
        }
    }

    /// Returns the event tag.
    #[must_use]
    pub const fn event(&self) -> HookEvent {
        self.hook_specific_output.hook_event_name
    }

    /// Returns the context text.
    #[must_use]
    pub const fn context(&self) -> &str {
        self.hook_specific_output.additional_context.as_str()
    }

    /// Serializes the envelope as compact JSON.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::OutputEncode`] if serialization fails.
    pub fn to_json(&self) -> Result<String, DispatchError> {
        serde_json::to_string(self).map_err(DispatchError::OutputEncode)
    }

    /// Writes the envelope to `writer` without a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::OutputEncode`] if serialization or the
    /// write fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), DispatchError> {
        serde_json::to_writer(&mut *writer, self).map_err(DispatchError::OutputEncode)?;
        writer
            .flush()
            .map_err(|source| DispatchError::OutputEncode(serde_json::Error::io(source)))
    }
}
