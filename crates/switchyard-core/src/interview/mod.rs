//! Suggests a structured interview for underspecified prompts.
//!
//! Four vagueness signals are checked. When at least
//! [`SUGGESTION_THRESHOLD`] of them are present, the suggester proposes the
//! `/interview` command; it never runs the interview itself.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::directive::Directive;
use crate::fast_path::{self, SHORT_REPLY_CHARS};
use crate::flags::{ActivityFlags, Clock, FlagName, FlagStore, SystemClock};

/// Tracing target for the interview suggester.
pub(crate) const INTERVIEW_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::interview");

/// Number of signals needed before a suggestion is made.
pub const SUGGESTION_THRESHOLD: usize = 2;

/// Prompts with fewer words than this may count as low specificity.
pub const LOW_SPECIFICITY_WORDS: usize = 10;

static AUDIENCE: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"(?i)\b(for|audience|reader|user|client|team|stakeholder|manager|developer|customer)\b")
        .ok()
});

static SCOPE: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"(?i)\b(about|regarding|for|specific|focus|scope|limit|only|just)\b").ok()
});

static SUCCESS_CRITERIA: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"(?i)\b(should|must|need|require|goal|objective|outcome|result|expect|deliver)\b")
        .ok()
});

static VAGUE_VERB: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"(?i)\b(make|do|create|build|write|help|something|thing)\b").ok()
});

static INTERVIEW_MENTION: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"(?i)/interview\b").ok());

/// A missing quality of a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VaguenessSignal {
    /// Nobody is named as the audience.
    NoAudience,
    /// Nothing bounds the request.
    NoScope,
    /// No outcome or requirement is stated.
    NoSuccessCriteria,
    /// A short prompt built around a vague verb.
    LowSpecificity,
}

impl VaguenessSignal {
    /// Returns the label used in suggestions.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NoAudience => "no audience",
            Self::NoScope => "no scope",
            Self::NoSuccessCriteria => "no success criteria",
            Self::LowSpecificity => "low specificity",
        }
    }
}

impl fmt::Display for VaguenessSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lists the vagueness signals present in `prompt`, in a fixed order.
#[must_use]
pub fn vagueness_signals(prompt: &str) -> Vec<VaguenessSignal> {
    let mut signals = Vec::new();
    if !matches(&AUDIENCE, prompt) {
        signals.push(VaguenessSignal::NoAudience);
    }
    if !matches(&SCOPE, prompt) {
        signals.push(VaguenessSignal::NoScope);
    }
    if !matches(&SUCCESS_CRITERIA, prompt) {
        signals.push(VaguenessSignal::NoSuccessCriteria);
    }
    if prompt.split_whitespace().count() < LOW_SPECIFICITY_WORDS && matches(&VAGUE_VERB, prompt) {
        signals.push(VaguenessSignal::LowSpecificity);
    }
    signals
}

/// Returns `true` when the prompt refers to the `/interview` command.
#[must_use]
pub fn mentions_interview(prompt: &str) -> bool {
    matches(&INTERVIEW_MENTION, prompt)
}

fn matches(pattern: &Lazy<Option<Regex>>, haystack: &str) -> bool {
    pattern
        .as_ref()
        .is_some_and(|regex| regex.is_match(haystack))
}

/// Proposes an interview when a prompt looks underspecified.
#[derive(Debug)]
pub struct InterviewSuggester<S, C = SystemClock> {
    flags: ActivityFlags<S, C>,
    defer: bool,
}

impl<S, C> InterviewSuggester<S, C> {
    /// Creates a suggester that consults `flags` for a running interview.
    #[must_use]
    pub const fn new(flags: ActivityFlags<S, C>) -> Self {
        Self {
            flags,
            defer: false,
        }
    }

    /// When `defer` is set the suggester stays silent and leaves prompts
    /// to the router.
    #[must_use]
    pub const fn with_defer(mut self, defer: bool) -> Self {
        self.defer = defer;
        self
    }

    /// Returns the activity flags the suggester consults.
    #[must_use]
    pub const fn flags(&self) -> &ActivityFlags<S, C> {
        &self.flags
    }
}

impl<S, C> InterviewSuggester<S, C>
where
    S: FlagStore,
    C: Clock,
{
    /// Returns a suggestion for `prompt`, if one is warranted.
    #[must_use]
    pub fn suggest(&self, prompt: &str) -> Option<Directive> {
        if fast_path::trimmed_len(prompt) < SHORT_REPLY_CHARS
            || fast_path::is_greeting(prompt)
            || fast_path::is_slash_command(prompt)
            || mentions_interview(prompt)
        {
            return None;
        }

        self.flags.sweep_stale(&[FlagName::InterviewActive]);
        if self.flags.is_active(FlagName::InterviewActive) {
            debug!(target: INTERVIEW_TARGET, "interview already running");
            return None;
        }
        if self.defer {
            return None;
        }

        let signals = vagueness_signals(prompt);
        debug!(target: INTERVIEW_TARGET, signals = signals.len(), "vagueness scored");
        (signals.len() >= SUGGESTION_THRESHOLD).then(|| Directive::InterviewSuggestion {
            missing: signals.iter().map(|signal| signal.label().to_owned()).collect(),
        })
    }
}

#[cfg(test)]
mod tests;
