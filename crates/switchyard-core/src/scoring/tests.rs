//! Unit tests for entry scoring.

use rstest::{fixture, rstest};

use super::*;

#[fixture]
fn pdf_extractor() -> RegistryEntry {
    RegistryEntry::new("pdf-extractor", "Skill")
        .with_patterns(["extract.*pdf"])
        .with_triggers(["pdf"])
        .with_priority(70)
}

#[rstest]
fn pattern_trigger_and_priority_accumulate(pdf_extractor: RegistryEntry) {
    let score = score_entry("please extract data from this pdf", &pdf_extractor);
    assert_eq!(score, Score::from_hundredths(3_350));
    assert!(score.is_confident());
}

#[rstest]
fn patterns_match_case_insensitively(pdf_extractor: RegistryEntry) {
    let score = score_entry("EXTRACT the tables from the PDF", &pdf_extractor);
    assert_eq!(score.hundredths(), 3_350);
}

#[test]
fn each_matching_pattern_and_trigger_adds_points() {
    let entry = RegistryEntry::new("deployer", "Task")
        .with_patterns([r"\bdeploy\b", "staging|production"])
        .with_triggers(["release", "rollout", "canary"]);
    let score = score_entry("deploy the release to staging as a canary", &entry);
    // two patterns, two triggers, default priority
    assert_eq!(score.hundredths(), 2 * 2_000 + 2 * 1_000 + 250);
}

#[rstest]
fn exclusion_forces_zero(pdf_extractor: RegistryEntry) {
    let entry = pdf_extractor.with_exclusions(["Invoice"]);
    let score = score_entry("extract every total from this pdf invoice", &entry);
    assert_eq!(score, Score::ZERO);
}

#[test]
fn priority_alone_contributes_bonus() {
    let entry = RegistryEntry::new("idle", "Task").with_priority(100);
    assert_eq!(score_entry("unrelated words entirely", &entry).hundredths(), 500);
}

#[test]
fn explicit_zero_priority_adds_nothing() {
    let entry = RegistryEntry::new("quiet", "Task").with_priority(0);
    assert_eq!(score_entry("unrelated words entirely", &entry), Score::ZERO);
}

#[test]
fn unsafe_pattern_contributes_nothing() {
    let entry = RegistryEntry::new("risky", "Task").with_patterns(["(a+)+"]);
    let score = score_entry("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaab", &entry);
    assert_eq!(score, Score::priority_bonus(50));
}

#[test]
fn invalid_pattern_is_skipped_without_losing_the_entry() {
    let entry = RegistryEntry::new("mixed", "Task")
        .with_patterns(["(unclosed", "report"])
        .with_triggers(["quarterly"]);
    let score = score_entry("write the quarterly report", &entry);
    assert_eq!(score.hundredths(), 2_000 + 1_000 + 250);
}

#[test]
fn single_trigger_with_default_priority_is_not_confident() {
    let entry = RegistryEntry::new("weak", "Task").with_triggers(["docs"]);
    let score = score_entry("tidy up the docs folder", &entry);
    assert_eq!(score.hundredths(), 1_250);
    assert!(!score.is_confident());
}

#[rstest]
#[case::just_below(1_490, false)]
#[case::exact(1_500, true)]
#[case::above(1_510, true)]
#[case::zero(0, false)]
fn confidence_threshold_is_inclusive(#[case] hundredths: u32, #[case] confident: bool) {
    assert_eq!(Score::from_hundredths(hundredths).is_confident(), confident);
}

#[rstest]
#[case::nested_group("(a+)+")]
#[case::double_plus("a++")]
#[case::star_plus("x*+")]
#[case::spaced("a* {2}")]
#[case::star_after_group("(ab*)*")]
#[case::brace_after_plus("(\\d+){3}")]
fn stacked_quantifiers_are_unsafe(#[case] pattern: &str) {
    assert!(is_unsafe_pattern(pattern), "expected unsafe: {pattern}");
}

#[rstest]
#[case::plain("extract.*pdf")]
#[case::separate_groups("(a+)(b+)")]
#[case::counted("\\d{3}-\\d{4}")]
#[case::lazy(".*?end")]
#[case::empty("")]
fn ordinary_patterns_are_safe(#[case] pattern: &str) {
    assert!(!is_unsafe_pattern(pattern), "expected safe: {pattern}");
}

#[rstest]
#[case("export the pdf", "PDF", true)]
#[case("export the pdf", "docx", false)]
#[case("export the pdf", "", false)]
fn keyword_containment(#[case] folded: &str, #[case] keyword: &str, #[case] expected: bool) {
    assert_eq!(contains_keyword(folded, keyword), expected);
}

#[test]
fn score_displays_in_points() {
    assert_eq!(Score::from_hundredths(3_350).to_string(), "33.5");
    assert_eq!(Score::MIN_CONFIDENCE.to_string(), "15");
}

#[test]
fn addition_saturates() {
    let max = Score::from_hundredths(u32::MAX);
    assert_eq!(max.saturating_add(Score::PATTERN_HIT), max);
}
