//! Prompt and tool-event dispatch classifier.
//!
//! `switchyard-core` decides which registered handler, if any, should take a
//! user prompt, and reacts to tool events raised by the host. Every decision
//! yields at most one [`Directive`], and every failure along the way
//! (unreadable registry, unwritable flag directory, invalid pattern)
//! degrades to "no directive" rather than an error.
//!
//! # Architecture
//!
//! Prompts flow through the [`PromptRouter`]: deterministic fast-path checks
//! first ([`fast_path`]), then registry scoring ([`scoring`], [`selector`])
//! and finally a catch-all fallback. Short-lived activity flags ([`flags`])
//! record that a slash command or skill is underway; the [`ToolGuard`]
//! reads them to decide whether an execution tool deserves a delegation
//! warning. Edited source files are checked against review rules by
//! [`governance`], and underspecified prompts can earn an interview
//! suggestion from the [`InterviewSuggester`].

pub mod directive;
pub mod enforcer;
pub mod error;
pub mod fast_path;
pub mod flags;
pub mod governance;
pub mod hook;
pub mod interview;
pub mod registry;
pub mod router;
pub mod scoring;
pub mod selector;

#[cfg(test)]
mod tests;

pub use self::directive::{Directive, HookEvent, HookOutput};
pub use self::enforcer::ToolGuard;
pub use self::error::{DispatchError, FlagError};
pub use self::fast_path::{ExtensionMap, ExtensionRoute};
pub use self::flags::{
    ActivityFlags, Clock, FLAG_TTL_MS, FileFlagStore, FlagName, FlagStore, ManualClock,
    MemoryFlagStore, SystemClock,
};
pub use self::governance::{GovernanceRule, GovernanceTriggers, count_code_lines};
pub use self::hook::HookInput;
pub use self::interview::{InterviewSuggester, VaguenessSignal};
pub use self::registry::{FileRegistry, Registry, RegistryEntry, RegistrySource};
pub use self::router::{Fallback, PromptRouter};
pub use self::scoring::Score;
pub use self::selector::{Selection, select_best};
