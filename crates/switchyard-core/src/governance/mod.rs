//! Review routing for freshly written or edited code.
//!
//! After a `Write` or `Edit` to a source file, the edited text is measured
//! (non-blank, non-comment lines) and checked against the registry's
//! governance rules in order of stakes. Only the first rule that fires is
//! reported.

mod lines;

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::directive::Directive;
use crate::registry::Registry;
use crate::scoring::contains_keyword;

pub use self::lines::count_code_lines;

/// Tracing target for governance evaluation.
pub(crate) const GOVERNANCE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::governance");

/// File extensions (lower-case, with the dot) treated as source code.
pub const CODE_EXTENSIONS: [&str; 23] = [
    ".py", ".js", ".ts", ".tsx", ".jsx", ".go", ".rs", ".java", ".rb", ".php", ".c", ".cpp", ".h",
    ".cs", ".swift", ".kt", ".scala", ".sh", ".bash", ".ps1", ".sql", ".mjs", ".cjs",
];

/// Tool used for a rule that does not name one.
pub const DEFAULT_RULE_TOOL: &str = "Task";

/// Line count below which an audit-loop keyword hit is ignored.
pub const AUDIT_KEYWORD_MIN_LINES: usize = 10;

fn default_rule_tool() -> String {
    DEFAULT_RULE_TOOL.to_owned()
}

/// What makes a governance rule fire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceTriggers {
    /// Minimum code-line count; rules fall back to their own default.
    #[serde(default)]
    pub code_lines_min: Option<usize>,
    /// Keywords of which any one is enough.
    #[serde(default)]
    pub keywords_any: Vec<String>,
}

/// One named governance rule from the registry document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceRule {
    /// Tool used to run the review.
    #[serde(default = "default_rule_tool")]
    pub tool: String,
    /// Firing conditions.
    #[serde(default)]
    pub triggers: GovernanceTriggers,
}

impl Default for GovernanceRule {
    fn default() -> Self {
        Self {
            tool: default_rule_tool(),
            triggers: GovernanceTriggers::default(),
        }
    }
}

impl GovernanceRule {
    /// Creates a rule using `tool` with the given triggers.
    #[must_use]
    pub fn new(tool: impl Into<String>, triggers: GovernanceTriggers) -> Self {
        Self {
            tool: tool.into(),
            triggers,
        }
    }

    fn keyword_hit(&self, folded: &str) -> bool {
        self.triggers
            .keywords_any
            .iter()
            .any(|keyword| contains_keyword(folded, keyword))
    }
}

/// The governance tiers, highest stakes first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Financial, legal or security sensitive content; keywords only.
    CouncilProtocol,
    /// Large or high-stakes changes.
    MultipersonaAudit,
    /// Moderate changes.
    AuditLoop,
}

impl Tier {
    /// Tiers in evaluation order.
    pub const ORDER: [Self; 3] = [Self::CouncilProtocol, Self::MultipersonaAudit, Self::AuditLoop];

    /// Name of the rule in the registry's `governance` mapping.
    #[must_use]
    pub const fn rule_name(self) -> &'static str {
        match self {
            Self::CouncilProtocol => "council-protocol",
            Self::MultipersonaAudit => "multipersona-audit",
            Self::AuditLoop => "audit-loop",
        }
    }

    /// Line threshold used when the rule does not set one.
    #[must_use]
    pub const fn default_min_lines(self) -> Option<usize> {
        match self {
            Self::CouncilProtocol => None,
            Self::MultipersonaAudit => Some(30),
            Self::AuditLoop => Some(20),
        }
    }

    const fn keyword_reason(self) -> &'static str {
        match self {
            Self::CouncilProtocol => "financial/legal/security keywords detected",
            Self::MultipersonaAudit => "high-stakes keyword detected",
            Self::AuditLoop => "governance keyword detected",
        }
    }

    /// Returns the reason the rule fires for this content, if it does.
    fn check(self, rule: &GovernanceRule, lines: usize, folded: &str) -> Option<String> {
        let keyword_hit = rule.keyword_hit(folded);
        let Some(default_min) = self.default_min_lines() else {
            return keyword_hit.then(|| self.keyword_reason().to_owned());
        };
        let min = rule.triggers.code_lines_min.unwrap_or(default_min);
        if lines >= min {
            return Some(format!("{lines} code lines (threshold: {min})"));
        }
        let keyword_counts = match self {
            Self::AuditLoop => keyword_hit && lines >= AUDIT_KEYWORD_MIN_LINES,
            Self::CouncilProtocol | Self::MultipersonaAudit => keyword_hit,
        };
        keyword_counts.then(|| self.keyword_reason().to_owned())
    }
}

/// A file written or edited by a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditedFile<'a> {
    /// Path as given to the tool.
    pub path: &'a str,
    /// New text: the full content for `Write`, the replacement for `Edit`.
    pub content: &'a str,
}

impl<'a> EditedFile<'a> {
    /// Extracts the edited source file from a tool invocation.
    ///
    /// Returns `None` for other tools, non-code files and empty content.
    #[must_use]
    pub fn from_tool(tool_name: &str, tool_input: &'a Value) -> Option<Self> {
        let content_key = match tool_name {
            "Write" => "content",
            "Edit" => "new_string",
            _ => return None,
        };
        let path = tool_input.get("file_path").and_then(Value::as_str)?;
        if path.is_empty() || !is_code_file(path) {
            return None;
        }
        let content = tool_input.get(content_key).and_then(Value::as_str)?;
        if content.is_empty() {
            return None;
        }
        Some(Self { path, content })
    }

    /// Base name of the file.
    #[must_use]
    pub fn file_name(&self) -> String {
        Path::new(self.path)
            .file_name()
            .map_or_else(|| self.path.to_owned(), |name| name.to_string_lossy().into_owned())
    }
}

/// Returns `true` when the path's extension is a known code extension.
#[must_use]
pub fn is_code_file(path: &str) -> bool {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            let dotted = format!(".{}", ext.to_lowercase());
            CODE_EXTENSIONS.contains(&dotted.as_str())
        })
}

/// Evaluates the governance rules against one tool invocation.
#[must_use]
pub fn evaluate(tool_name: &str, tool_input: &Value, registry: &Registry) -> Option<Directive> {
    let file = EditedFile::from_tool(tool_name, tool_input)?;
    evaluate_file(&file, registry)
}

/// Evaluates the governance rules against an edited file.
#[must_use]
pub fn evaluate_file(file: &EditedFile<'_>, registry: &Registry) -> Option<Directive> {
    let lines = count_code_lines(file.content);
    let folded = file.content.to_lowercase();
    Tier::ORDER.into_iter().find_map(|tier| {
        let rule = registry.governance_rule(tier.rule_name())?;
        let reason = tier.check(rule, lines, &folded)?;
        debug!(
            target: GOVERNANCE_TARGET,
            rule = tier.rule_name(),
            lines,
            %reason,
            "governance rule fired"
        );
        Some(Directive::Governance {
            rule: tier.rule_name().to_owned(),
            tool: rule.tool.clone(),
            file: file.file_name(),
            reason,
        })
    })
}
