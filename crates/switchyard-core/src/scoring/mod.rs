//! Scores a single registry entry against one input string.
//!
//! Points are kept as exact hundredths so the threshold and tie checks in
//! the selector compare integers. A pattern hit is worth 20 points, a
//! trigger hit 10, and the entry's priority adds `priority * 0.05`. Any
//! exclusion keyword in the input disqualifies the entry outright.

use std::fmt;

use regex::RegexBuilder;
use tracing::debug;

use crate::registry::RegistryEntry;

/// Tracing target for scoring.
pub(crate) const SCORING_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::scoring");

/// Hundredths of a point added per unit of priority (`0.05`).
const PRIORITY_WEIGHT: u32 = 5;

/// Compiled-program ceiling for registry patterns.
const PATTERN_SIZE_LIMIT: usize = 1 << 20;

/// A non-negative score with two decimal places of exact precision.
///
/// # Example
///
/// ```
/// use switchyard_core::Score;
///
/// let score = Score::PATTERN_HIT
///     .saturating_add(Score::TRIGGER_HIT)
///     .saturating_add(Score::priority_bonus(70));
/// assert_eq!(score.hundredths(), 3350);
/// assert!(score.is_confident());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score(u32);

impl Score {
    /// No points.
    pub const ZERO: Self = Self(0);
    /// Awarded for each matching pattern.
    pub const PATTERN_HIT: Self = Self(2_000);
    /// Awarded for each trigger keyword found.
    pub const TRIGGER_HIT: Self = Self(1_000);
    /// Lowest score the selector accepts as a match.
    pub const MIN_CONFIDENCE: Self = Self(1_500);

    /// Builds a score from hundredths of a point.
    #[must_use]
    pub const fn from_hundredths(hundredths: u32) -> Self {
        Self(hundredths)
    }

    /// Returns the score in hundredths of a point.
    #[must_use]
    pub const fn hundredths(self) -> u32 {
        self.0
    }

    /// Returns the score in points.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "presentation only; comparisons use the integer form"
    )]
    pub fn points(self) -> f64 {
        f64::from(self.0) / 100.0
    }

    /// The bonus contributed by `priority`.
    #[must_use]
    pub const fn priority_bonus(priority: u32) -> Self {
        Self(priority.saturating_mul(PRIORITY_WEIGHT))
    }

    /// Adds two scores, saturating at the maximum.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Returns `true` for any score above zero.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns `true` when the score clears [`Score::MIN_CONFIDENCE`].
    #[must_use]
    pub const fn is_confident(self) -> bool {
        self.0 >= Self::MIN_CONFIDENCE.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.points())
    }
}

/// Scores `entry` against `input`.
///
/// Patterns that look prone to catastrophic backtracking, and patterns that
/// fail to compile, are skipped individually; the rest of the entry is
/// still scored.
#[must_use]
pub fn score_entry(input: &str, entry: &RegistryEntry) -> Score {
    let folded = input.to_lowercase();
    if entry
        .exclusions()
        .iter()
        .any(|keyword| contains_keyword(&folded, keyword))
    {
        return Score::ZERO;
    }

    let pattern_hits = entry
        .patterns()
        .iter()
        .filter(|pattern| pattern_matches(input, entry.name(), pattern))
        .count();
    let trigger_hits = entry
        .triggers()
        .iter()
        .filter(|keyword| contains_keyword(&folded, keyword))
        .count();

    repeat(Score::PATTERN_HIT, pattern_hits)
        .saturating_add(repeat(Score::TRIGGER_HIT, trigger_hits))
        .saturating_add(Score::priority_bonus(entry.priority()))
}

fn repeat(score: Score, hits: usize) -> Score {
    let count = u32::try_from(hits).unwrap_or(u32::MAX);
    Score(score.0.saturating_mul(count))
}

fn pattern_matches(input: &str, entry: &str, pattern: &str) -> bool {
    if is_unsafe_pattern(pattern) {
        debug!(target: SCORING_TARGET, entry, pattern, "skipping unsafe pattern");
        return false;
    }
    match RegexBuilder::new(pattern)
        .case_insensitive(true)
        .size_limit(PATTERN_SIZE_LIMIT)
        .build()
    {
        Ok(regex) => regex.is_match(input),
        Err(error) => {
            debug!(target: SCORING_TARGET, entry, pattern, %error, "skipping invalid pattern");
            false
        }
    }
}

/// Returns `true` when `folded` (already lower-cased) contains `keyword`
/// case-insensitively. Empty keywords never match.
#[must_use]
pub fn contains_keyword(folded: &str, keyword: &str) -> bool {
    let needle = keyword.to_lowercase();
    !needle.is_empty() && folded.contains(&needle)
}

/// Flags pattern sources with stacked quantifiers such as `a++`, `a* {2}`
/// or `(a+)+`.
///
/// Two of `+`, `*` and `{` count as stacked when nothing but whitespace and
/// closing parentheses separates them.
#[must_use]
pub fn is_unsafe_pattern(pattern: &str) -> bool {
    let mut after_quantifier = false;
    for ch in pattern.chars() {
        match ch {
            '+' | '*' | '{' => {
                if after_quantifier {
                    return true;
                }
                after_quantifier = true;
            }
            ')' => {}
            _ if ch.is_whitespace() => {}
            _ => after_quantifier = false,
        }
    }
    false
}

#[cfg(test)]
mod tests;
