//! Unit tests for the interview suggester.

use rstest::{fixture, rstest};

use super::*;
use crate::flags::{FLAG_TTL_MS, FlagStore, ManualClock, MemoryFlagStore};

type TestSuggester = InterviewSuggester<MemoryFlagStore, ManualClock>;

const T0: u64 = 1_700_000_000_000;

#[fixture]
fn suggester() -> TestSuggester {
    InterviewSuggester::new(ActivityFlags::new(MemoryFlagStore::new(), ManualClock::new(T0)))
}

#[rstest]
#[case::all_four("make a landing page", &[
    VaguenessSignal::NoAudience,
    VaguenessSignal::NoScope,
    VaguenessSignal::NoSuccessCriteria,
    VaguenessSignal::LowSpecificity,
])]
#[case::audience_and_scope("write release notes for the team", &[
    VaguenessSignal::NoSuccessCriteria,
    VaguenessSignal::LowSpecificity,
])]
#[case::fully_specified(
    "Draft a migration guide for developer onboarding that must cover only the v2 API changes",
    &[]
)]
fn signals_are_detected(#[case] prompt: &str, #[case] expected: &[VaguenessSignal]) {
    assert_eq!(vagueness_signals(prompt), expected);
}

#[test]
fn long_prompts_are_not_low_specificity() {
    let prompt = "create one two three four five six seven eight nine ten";
    assert!(!vagueness_signals(prompt).contains(&VaguenessSignal::LowSpecificity));
}

#[rstest]
fn vague_prompt_gets_suggestion(suggester: TestSuggester) {
    let directive = suggester.suggest("make a landing page").expect("suggestion");
    assert_eq!(
        directive,
        Directive::InterviewSuggestion {
            missing: vec![
                "no audience".to_owned(),
                "no scope".to_owned(),
                "no success criteria".to_owned(),
                "low specificity".to_owned(),
            ],
        }
    );
}

#[rstest]
fn single_signal_is_not_enough(suggester: TestSuggester) {
    // only "no success criteria" is missing
    assert_eq!(
        suggester.suggest("summarise the quarterly figures for the finance team"),
        None
    );
}

#[rstest]
#[case::short("make it")]
#[case::greeting("thanks, make it nicer")]
#[case::slash("/review the open pull requests")]
#[case::mentions_command("can we run /interview on this idea first")]
fn fast_exits_stay_silent(suggester: TestSuggester, #[case] prompt: &str) {
    assert_eq!(suggester.suggest(prompt), None);
}

#[rstest]
fn running_interview_suppresses_suggestions(suggester: TestSuggester) {
    suggester.flags().set(FlagName::InterviewActive);
    assert_eq!(suggester.suggest("make a landing page"), None);
}

#[rstest]
fn stale_interview_marker_is_removed(suggester: TestSuggester) {
    suggester.flags().set(FlagName::InterviewActive);
    suggester.flags().clock().advance(FLAG_TTL_MS);
    assert!(suggester.suggest("make a landing page").is_some());
    assert_eq!(
        suggester.flags().store().load(FlagName::InterviewActive).expect("load"),
        None
    );
}

#[test]
fn deferring_to_router_silences_suggestions() {
    let suggester =
        InterviewSuggester::new(ActivityFlags::new(MemoryFlagStore::new(), ManualClock::new(T0)))
            .with_defer(true);
    assert_eq!(suggester.suggest("make a landing page"), None);
}

#[rstest]
#[case("/interview", true)]
#[case("please start /INTERVIEW now", true)]
#[case("/interviews", false)]
#[case("an interview", false)]
fn interview_mentions(#[case] prompt: &str, #[case] expected: bool) {
    assert_eq!(mentions_interview(prompt), expected);
}
