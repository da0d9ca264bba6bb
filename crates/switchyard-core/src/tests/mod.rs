//! Crate-level integration and BDD tests.

use std::fs;

use serde_json::json;
use tempfile::TempDir;

use crate::directive::Directive;
use crate::enforcer::ToolGuard;
use crate::flags::{ActivityFlags, FileFlagStore, FlagName, ManualClock};
use crate::governance;
use crate::registry::{FileRegistry, RegistrySource};
use crate::router::PromptRouter;


const REGISTRY: &str = r#"{
  "entries": [
    {
      "name": "pdf-extractor",
      "tool": "Skill",
      "patterns": ["extract.*pdf"],
      "triggers": ["pdf"],
      "priority": 70
    },
    { "name": "code-review", "tool": "Task", "category": "governance", "triggers": ["review"] }
  ],
  "governance": {
    "audit-loop": { "tool": "Task", "triggers": { "code_lines_min": 20 } }
  }
}"#;

#[test]
fn end_to_end_with_files_on_disk() {
    let dir = TempDir::new().expect("temp dir");
    let registry_path = dir.path().join("registry.json");
    fs::write(&registry_path, REGISTRY).expect("write registry");
    let cache = dir.path().join("cache");

    let clock = ManualClock::new(1_700_000_000_000);
    let store = FileFlagStore::new(&cache);
    let router = PromptRouter::new(
        FileRegistry::new(&registry_path),
        ActivityFlags::new(&store, &clock),
    )
    .with_extensions(crate::fast_path::ExtensionMap::empty());

    assert_eq!(
        router.route("please extract data from this pdf"),
        Some(Directive::dispatch("pdf-extractor", "Skill"))
    );

    assert_eq!(router.route("/deploy staging now"), None);
    assert!(store.marker_path(FlagName::CommandActive).exists());

    let guard = ToolGuard::new(ActivityFlags::new(&store, &clock));
    assert_eq!(guard.check("Bash"), None);
    clock.advance(90_001);
    assert!(guard.check("Bash").is_some());

    let registry = FileRegistry::new(&registry_path).load().expect("load registry");
    let body: String = (0..21).map(|i| format!("x{i} = {i}\n")).collect();
    let directive = governance::evaluate(
        "Write",
        &json!({ "file_path": "/repo/job.py", "content": body }),
        &registry,
    );
    assert_eq!(
        directive.map(|d| d.to_string()),
        Some("@GOVERNANCE:audit-loop:Task:job.py:21 code lines (threshold: 20)".to_owned())
    );
}
