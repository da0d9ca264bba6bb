//! Unit tests for the prompt routing pipeline.

use std::cell::Cell;

use rstest::{fixture, rstest};

use super::*;
use crate::error::DispatchError;
use crate::fast_path::ExtensionRoute;
use crate::flags::{ManualClock, MemoryFlagStore};
use crate::registry::RegistryEntry;

const T0: u64 = 1_700_000_000_000;

type TestRouter = PromptRouter<CountingSource, MemoryFlagStore, ManualClock>;

/// Wraps a registry and counts how often it is loaded.
struct CountingSource {
    registry: Option<Registry>,
    loads: Cell<usize>,
}

impl CountingSource {
    fn new(registry: Registry) -> Self {
        Self {
            registry: Some(registry),
            loads: Cell::new(0),
        }
    }

    fn failing() -> Self {
        Self {
            registry: None,
            loads: Cell::new(0),
        }
    }
}

impl RegistrySource for CountingSource {
    fn load(&self) -> Result<Registry, DispatchError> {
        self.loads.set(self.loads.get() + 1);
        self.registry.clone().ok_or_else(|| {
            DispatchError::RegistryParse(
                serde_json::from_str::<serde_json::Value>("{").expect_err("invalid json"),
            )
        })
    }
}

fn sample_registry() -> Registry {
    Registry::from_entries([
        RegistryEntry::new("pdf-extractor", "Skill")
            .with_patterns(["extract.*pdf"])
            .with_triggers(["pdf"])
            .with_priority(70),
        RegistryEntry::new("deployer", "Task")
            .with_patterns([r"\bdeploy\b"])
            .with_triggers(["staging", "production"]),
    ])
}

fn router_with(source: CountingSource) -> TestRouter {
    let flags = ActivityFlags::new(MemoryFlagStore::new(), ManualClock::new(T0));
    PromptRouter::new(source, flags).with_extensions(ExtensionMap::empty())
}

#[fixture]
fn router() -> TestRouter {
    router_with(CountingSource::new(sample_registry()))
}

#[rstest]
#[case::empty("")]
#[case::two_chars("go")]
#[case::padded(" \n x \t")]
fn too_short_prompts_emit_nothing(router: TestRouter, #[case] prompt: &str) {
    assert_eq!(router.route(prompt), None);
    assert_eq!(router.registry().loads.get(), 0);
}

#[rstest]
#[case("hi")]
#[case("thanks, deploy it")]
#[case("ok")]
fn greetings_emit_nothing(router: TestRouter, #[case] prompt: &str) {
    assert_eq!(router.route(prompt), None);
    assert_eq!(router.registry().loads.get(), 0);
}

#[rstest]
fn slash_command_marks_command_active_without_scoring(router: TestRouter) {
    assert_eq!(router.route("/deploy staging now"), None);
    assert!(router.flags().is_active(FlagName::CommandActive));
    assert_eq!(router.registry().loads.get(), 0);
}

#[rstest]
fn registry_winner_is_dispatched(router: TestRouter) {
    assert_eq!(
        router.route("please extract data from this pdf"),
        Some(Directive::dispatch("pdf-extractor", "Skill"))
    );
    assert_eq!(router.registry().loads.get(), 1);
}

#[rstest]
fn unmatched_long_prompt_falls_back(router: TestRouter) {
    assert_eq!(
        router.route("summarise yesterday's meeting notes"),
        Some(Directive::dispatch("general-coder", "Task"))
    );
}

#[rstest]
fn unmatched_short_actionable_prompt_emits_nothing(router: TestRouter) {
    // "fix the bug" has an action verb, so it reaches scoring, but is too
    // short for the fallback.
    assert_eq!(router.route("fix the bug"), None);
    assert_eq!(router.registry().loads.get(), 1);
}

#[test]
fn custom_fallback_is_used() {
    let router = router_with(CountingSource::new(Registry::new()))
        .with_fallback(Fallback::new("triage", "Skill"));
    assert_eq!(
        router.route("something nobody registered for"),
        Some(Directive::dispatch("triage", "Skill"))
    );
}

#[test]
fn unavailable_registry_behaves_as_empty() {
    let router = router_with(CountingSource::failing());
    assert_eq!(
        router.route("please extract data from this pdf"),
        Some(Directive::dispatch("general-coder", "Task"))
    );
    assert_eq!(router.route("fix the bug"), None);
}

#[test]
fn configured_extension_routes_bypass_the_registry() {
    let router = router_with(CountingSource::new(sample_registry()))
        .with_extensions(ExtensionMap::default());
    assert_eq!(
        router.route("please extract data from report.PDF"),
        Some(Directive::dispatch("pdf", "Skill"))
    );
    assert_eq!(router.registry().loads.get(), 0);
}

#[test]
fn registry_extension_routes_apply_after_fast_path() {
    let registry = sample_registry().with_extension_map(ExtensionMap::from_routes([
        ExtensionRoute::new(".md", "markdown", "Skill"),
    ]));
    let router = router_with(CountingSource::new(registry));
    assert_eq!(
        router.route("tidy the headings in notes.md please"),
        Some(Directive::dispatch("markdown", "Skill"))
    );
}

#[test]
fn registry_extension_map_extends_but_never_shadows_the_fast_path() {
    let registry = sample_registry().with_extension_map(ExtensionMap::from_routes([
        ExtensionRoute::new(".pdf", "pdf-pro", "Skill"),
        ExtensionRoute::new(".epub", "ebook-reader", "Skill"),
    ]));
    let router = router_with(CountingSource::new(registry))
        .with_extensions(ExtensionMap::default());

    assert_eq!(
        router.route("summarise the attached report.pdf please"),
        Some(Directive::dispatch("pdf", "Skill"))
    );
    assert_eq!(router.registry().loads.get(), 0);

    assert_eq!(
        router.route("summarise the attached novel.epub please"),
        Some(Directive::dispatch("ebook-reader", "Skill"))
    );
    assert_eq!(router.registry().loads.get(), 1);
}

#[rstest]
fn stale_flags_are_swept_on_each_prompt(router: TestRouter) {
    router.flags().set(FlagName::SkillActive);
    router.flags().clock().advance(120_000);
    assert!(router.route("summarise yesterday's meeting notes").is_some());
    assert!(!router.flags().store().contains(FlagName::SkillActive));
}

#[rstest]
fn live_flags_do_not_suppress_routing(router: TestRouter) {
    router.flags().set(FlagName::CommandActive);
    assert_eq!(
        router.route("deploy the api to staging"),
        Some(Directive::dispatch("deployer", "Task"))
    );
    assert!(router.flags().store().contains(FlagName::CommandActive));
}

#[rstest]
fn routing_is_idempotent(router: TestRouter) {
    let prompt = "please extract data from this pdf";
    assert_eq!(router.route(prompt), router.route(prompt));
}
