//! Code-line counting heuristic.

/// Counts lines that are neither blank nor comments.
///
/// Skipped lines:
///
/// - lines starting with `#`, `//` or `--`;
/// - lines starting with `*` other than `*/` (block comment bodies);
/// - single-line `/* ... */` comments;
/// - any line containing `"""` or `'''`, which also toggles a docstring
///   block whose lines are skipped.
///
/// ```
/// use switchyard_core::count_code_lines;
///
/// let source = "# setup\nimport os\n\n\"\"\"\ndocs\n\"\"\"\nprint(os.name)\n";
/// assert_eq!(count_code_lines(source), 2);
/// ```
#[must_use]
pub fn count_code_lines(content: &str) -> usize {
    let mut in_docstring = false;
    let mut count = 0;
    for line in content.split('\n') {
        let stripped = line.trim();
        if stripped.is_empty() {
            continue;
        }
        if stripped.contains("\"\"\"") || stripped.contains("'''") {
            in_docstring = !in_docstring;
            continue;
        }
        if in_docstring || is_comment(stripped) {
            continue;
        }
        count += 1;
    }
    count
}

fn is_comment(stripped: &str) -> bool {
    stripped.starts_with('#')
        || stripped.starts_with("//")
        || stripped.starts_with("--")
        || (stripped.starts_with("/*") && stripped.ends_with("*/"))
        || (stripped.starts_with('*') && !stripped.starts_with("*/"))
}
