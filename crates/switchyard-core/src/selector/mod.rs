//! Chooses at most one registry entry for an input.

use std::cmp::Ordering;

use crate::registry::RegistryEntry;
use crate::scoring::{Score, score_entry};

/// The winning entry and its score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection<'a> {
    entry: &'a RegistryEntry,
    score: Score,
}

impl<'a> Selection<'a> {
    /// Returns the winning entry.
    #[must_use]
    pub const fn entry(&self) -> &'a RegistryEntry {
        self.entry
    }

    /// Returns the winning score.
    #[must_use]
    pub const fn score(&self) -> Score {
        self.score
    }
}

/// Scores every eligible entry and returns the confident winner, if any.
///
/// Entries are scanned in order. A strictly higher score replaces the
/// current best. An exact, positive tie goes to the higher priority, then
/// to the entry with fewer triggers; otherwise the earlier entry stays.
/// The winner must score at least [`Score::MIN_CONFIDENCE`].
#[must_use]
pub fn select_best<'a>(input: &str, entries: &'a [RegistryEntry]) -> Option<Selection<'a>> {
    let mut best: Option<Selection<'a>> = None;
    for entry in entries.iter().filter(|entry| entry.is_scoreable()) {
        let candidate = Selection {
            entry,
            score: score_entry(input, entry),
        };
        if replaces(&candidate, best.as_ref()) {
            best = Some(candidate);
        }
    }
    best.filter(|selection| selection.score.is_confident())
}

fn replaces(candidate: &Selection<'_>, current: Option<&Selection<'_>>) -> bool {
    let Some(incumbent) = current else {
        return candidate.score.is_positive();
    };
    match candidate.score.cmp(&incumbent.score) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => {
            candidate.score.is_positive() && wins_tie(candidate.entry, incumbent.entry)
        }
    }
}

fn wins_tie(challenger: &RegistryEntry, incumbent: &RegistryEntry) -> bool {
    match challenger.priority().cmp(&incumbent.priority()) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => challenger.triggers().len() < incumbent.triggers().len(),
    }
}
