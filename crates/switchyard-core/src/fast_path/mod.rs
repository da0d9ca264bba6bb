//! Deterministic shortcuts evaluated before any registry work.
//!
//! The checks run in a fixed order and the first one that applies ends
//! classification: too-short input, greetings, short non-actionable replies,
//! slash commands, and finally file-extension routes. None of them touch the
//! registry or the flag store; the router applies any side effects.

mod extensions;

use once_cell::sync::Lazy;
use regex::Regex;

pub use self::extensions::{DEFAULT_EXTENSION_TOOL, ExtensionMap, ExtensionRoute};

/// Prompts shorter than this (trimmed, in characters) are never classified.
pub const MIN_PROMPT_CHARS: usize = 3;

/// Greetings longer than this (trimmed, in characters) are treated as real
/// requests.
pub const MAX_GREETING_CHARS: usize = 30;

/// Prompts shorter than this (trimmed, in characters) need an action verb to
/// be worth routing.
pub const SHORT_REPLY_CHARS: usize = 15;

static GREETING: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(
        r"^(hi|hello|hey|hola|buenos?\s*d[ií]as?|buenas?\s*(tardes?|noches?)|thanks?|thank\s*you|ok|okay|yes|no|sure|got\s*it|cool|nice)\b",
    )
    .ok()
});

static ACTION_VERB: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"(?i)\b(build|create|make|deploy|process|run|test|fix|debug|audit)\b").ok()
});

static SLASH_COMMAND: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^\s*/\S").ok());

/// Why a prompt was deliberately left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// A greeting or acknowledgement such as "thanks".
    Greeting,
    /// A short reply without an action verb such as "the blue one".
    ShortReply,
}

/// Outcome of the fast path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FastPath<'a> {
    /// Input too short to classify at all.
    Silent,
    /// Conversational input that needs no handler.
    Ignore(IgnoreReason),
    /// An explicit slash command; the host runs it directly.
    SlashCommand,
    /// A file extension in the prompt names its handler.
    FileRoute(&'a ExtensionRoute),
}

/// Runs the fast-path checks in order and returns the first that applies.
///
/// Returns `None` when the prompt needs registry scoring.
#[must_use]
pub fn classify<'a>(prompt: &str, extensions: &'a ExtensionMap) -> Option<FastPath<'a>> {
    if trimmed_len(prompt) < MIN_PROMPT_CHARS {
        return Some(FastPath::Silent);
    }
    if is_greeting(prompt) {
        return Some(FastPath::Ignore(IgnoreReason::Greeting));
    }
    if is_short_reply(prompt) {
        return Some(FastPath::Ignore(IgnoreReason::ShortReply));
    }
    if is_slash_command(prompt) {
        return Some(FastPath::SlashCommand);
    }
    extensions.lookup(prompt).map(FastPath::FileRoute)
}

/// Number of characters after trimming surrounding whitespace.
#[must_use]
pub fn trimmed_len(prompt: &str) -> usize {
    prompt.trim().chars().count()
}

/// Returns `true` for short greetings and acknowledgements.
#[must_use]
pub fn is_greeting(prompt: &str) -> bool {
    let normalised = prompt.trim().to_lowercase();
    if normalised.chars().count() > MAX_GREETING_CHARS {
        return false;
    }
    matches(&GREETING, &normalised)
}

/// Returns `true` when `prompt` contains one of the action verbs.
#[must_use]
pub fn contains_action_verb(prompt: &str) -> bool {
    matches(&ACTION_VERB, prompt)
}

/// Returns `true` for short replies that do not ask for any action.
#[must_use]
pub fn is_short_reply(prompt: &str) -> bool {
    trimmed_len(prompt) < SHORT_REPLY_CHARS && !contains_action_verb(prompt)
}

/// Returns `true` when the prompt starts with a slash command.
#[must_use]
pub fn is_slash_command(prompt: &str) -> bool {
    matches(&SLASH_COMMAND, prompt)
}

fn matches(pattern: &Lazy<Option<Regex>>, haystack: &str) -> bool {
    pattern
        .as_ref()
        .is_some_and(|regex| regex.is_match(haystack))
}
