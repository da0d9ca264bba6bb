//! Unit tests for hook input decoding.

use std::io::Cursor;

use rstest::rstest;
use serde_json::json;

use super::*;

#[rstest]
#[case::empty("")]
#[case::whitespace("  \n\t ")]
fn blank_input_is_absent(#[case] raw: &str) {
    assert_eq!(HookInput::parse(raw).expect("parse"), None);
}

#[test]
fn prompt_event_decodes() {
    let raw = r#"{"prompt":"build the site","session_id":"abc","cwd":"/work"}"#;
    let input = HookInput::parse(raw).expect("parse").expect("present");
    assert_eq!(input.prompt(), "build the site");
    assert_eq!(input.session_id(), Some("abc"));
    assert_eq!(input.cwd(), Some("/work"));
    assert_eq!(input.tool_name(), "");
    assert!(input.tool_input().is_null());
}

#[test]
fn tool_event_decodes_and_ignores_unknown_fields() {
    let raw = r#"{
        "hook_event_name": "PostToolUse",
        "tool_name": "Write",
        "tool_input": {"file_path": "/src/app.py", "content": "print(1)"},
        "tool_response": {"success": true}
    }"#;
    let input = HookInput::parse(raw).expect("parse").expect("present");
    assert_eq!(input.tool_name(), "Write");
    assert_eq!(input.tool_input_str("file_path"), Some("/src/app.py"));
    assert_eq!(input.tool_input_str("missing"), None);
    assert_eq!(input.prompt(), "");
}

#[rstest]
#[case::truncated("{\"prompt\": ")]
#[case::not_an_object("[1, 2, 3]")]
#[case::wrong_type(r#"{"prompt": 42}"#)]
fn malformed_input_is_an_error(#[case] raw: &str) {
    let error = HookInput::parse(raw).expect_err("should fail");
    assert!(matches!(error, DispatchError::InputParse(_)));
}

#[test]
fn reads_from_any_reader() {
    let mut reader = Cursor::new(br#"{"prompt":"hello there"}"#.to_vec());
    let input = HookInput::read_from(&mut reader)
        .expect("read")
        .expect("present");
    assert_eq!(input, HookInput::from_prompt("hello there"));
}

#[test]
fn constructors_fill_expected_fields() {
    let input = HookInput::from_tool("Edit", json!({"new_string": "x"}));
    assert_eq!(input.tool_name(), "Edit");
    assert_eq!(input.tool_input_str("new_string"), Some("x"));
}
