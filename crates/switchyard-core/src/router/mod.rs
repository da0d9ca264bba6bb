//! The prompt routing pipeline.
//!
//! [`PromptRouter::route`] runs, in order: the too-short guard, a sweep of
//! stale `skill-active`/`command-active` markers, the fast path (which may
//! raise `command-active`), registry scoring and finally the catch-all
//! fallback. The first stage that decides ends the pipeline, so at most one
//! directive is produced. Nothing here returns an error: registry failures
//! are logged and treated as an empty registry.

use tracing::debug;

use crate::directive::Directive;
use crate::fast_path::{self, ExtensionMap, FastPath, MIN_PROMPT_CHARS, SHORT_REPLY_CHARS};
use crate::flags::{ActivityFlags, Clock, FlagName, FlagStore, SystemClock};
use crate::registry::{Registry, RegistrySource};
use crate::selector::select_best;

/// Tracing target for routing decisions.
pub(crate) const ROUTER_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::router");

/// Handler used when nothing else claims a prompt.
pub const DEFAULT_FALLBACK_HANDLER: &str = "general-coder";

/// Tool used to invoke the fallback handler.
pub const DEFAULT_FALLBACK_TOOL: &str = "Task";

const SWEPT_FLAGS: [FlagName; 2] = [FlagName::SkillActive, FlagName::CommandActive];

/// Catch-all handler for prompts nothing else claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fallback {
    handler: String,
    tool: String,
}

impl Default for Fallback {
    fn default() -> Self {
        Self::new(DEFAULT_FALLBACK_HANDLER, DEFAULT_FALLBACK_TOOL)
    }
}

impl Fallback {
    /// Creates a fallback dispatching to `handler` through `tool`.
    #[must_use]
    pub fn new(handler: impl Into<String>, tool: impl Into<String>) -> Self {
        Self {
            handler: handler.into(),
            tool: tool.into(),
        }
    }

    /// Returns the handler name.
    #[must_use]
    pub const fn handler(&self) -> &str {
        self.handler.as_str()
    }

    /// Returns the tool name.
    #[must_use]
    pub const fn tool(&self) -> &str {
        self.tool.as_str()
    }

    fn directive(&self) -> Directive {
        Directive::dispatch(self.handler.as_str(), self.tool.as_str())
    }
}

/// Routes user prompts to handlers.
///
/// # Example
///
/// ```
/// use switchyard_core::{
///     ActivityFlags, Directive, ManualClock, MemoryFlagStore, PromptRouter, Registry,
///     RegistryEntry,
/// };
///
/// let registry = Registry::from_entries([RegistryEntry::new("pdf-extractor", "Skill")
///     .with_patterns(["extract.*pdf"])
///     .with_triggers(["pdf"])
///     .with_priority(70)]);
/// let flags = ActivityFlags::new(MemoryFlagStore::new(), ManualClock::new(0));
/// let router = PromptRouter::new(registry, flags);
///
/// assert_eq!(
///     router.route("please extract data from this pdf"),
///     Some(Directive::dispatch("pdf-extractor", "Skill"))
/// );
/// assert_eq!(router.route("thanks!"), None);
/// ```
#[derive(Debug)]
pub struct PromptRouter<R, S, C = SystemClock> {
    registry: R,
    flags: ActivityFlags<S, C>,
    extensions: ExtensionMap,
    fallback: Fallback,
}

impl<R, S, C> PromptRouter<R, S, C> {
    /// Creates a router with the built-in extension routes and fallback.
    #[must_use]
    pub fn new(registry: R, flags: ActivityFlags<S, C>) -> Self {
        Self {
            registry,
            flags,
            extensions: ExtensionMap::default(),
            fallback: Fallback::default(),
        }
    }

    /// Replaces the fast-path extension routes.
    #[must_use]
    pub fn with_extensions(mut self, extensions: ExtensionMap) -> Self {
        self.extensions = extensions;
        self
    }

    /// Replaces the catch-all handler.
    #[must_use]
    pub fn with_fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = fallback;
        self
    }

    /// Returns the activity flags the router maintains.
    #[must_use]
    pub const fn flags(&self) -> &ActivityFlags<S, C> {
        &self.flags
    }

    /// Returns the registry source.
    #[must_use]
    pub const fn registry(&self) -> &R {
        &self.registry
    }
}

impl<R, S, C> PromptRouter<R, S, C>
where
    R: RegistrySource,
    S: FlagStore,
    C: Clock,
{
    /// Routes one prompt, returning at most one directive.
    #[must_use]
    pub fn route(&self, prompt: &str) -> Option<Directive> {
        if fast_path::trimmed_len(prompt) < MIN_PROMPT_CHARS {
            return None;
        }
        self.flags.sweep_stale(&SWEPT_FLAGS);

        match fast_path::classify(prompt, &self.extensions) {
            Some(FastPath::Silent) => None,
            Some(FastPath::Ignore(reason)) => {
                debug!(target: ROUTER_TARGET, ?reason, "prompt ignored");
                None
            }
            Some(FastPath::SlashCommand) => {
                debug!(target: ROUTER_TARGET, "slash command; marking command active");
                self.flags.set(FlagName::CommandActive);
                None
            }
            Some(FastPath::FileRoute(route)) => {
                debug!(target: ROUTER_TARGET, extension = route.extension(), "file extension route");
                Some(Directive::dispatch(route.handler(), route.tool()))
            }
            None => self.route_by_registry(prompt),
        }
    }

    fn route_by_registry(&self, prompt: &str) -> Option<Directive> {
        let registry = self.load_registry();

        if let Some(route) = registry.extension_map().and_then(|map| map.lookup(prompt)) {
            debug!(target: ROUTER_TARGET, extension = route.extension(), "registry extension route");
            return Some(Directive::dispatch(route.handler(), route.tool()));
        }

        if let Some(selection) = select_best(prompt, registry.entries()) {
            let entry = selection.entry();
            debug!(
                target: ROUTER_TARGET,
                handler = entry.name(),
                score = %selection.score(),
                "registry match"
            );
            return Some(Directive::dispatch(entry.name(), entry.tool()));
        }

        if fast_path::trimmed_len(prompt) >= SHORT_REPLY_CHARS {
            debug!(target: ROUTER_TARGET, handler = self.fallback.handler(), "fallback dispatch");
            return Some(self.fallback.directive());
        }
        None
    }

    fn load_registry(&self) -> Registry {
        self.registry.load().unwrap_or_else(|error| {
            debug!(target: ROUTER_TARGET, %error, "registry unavailable; scoring against no entries");
            Registry::new()
        })
    }
}

#[cfg(test)]
mod tests;
