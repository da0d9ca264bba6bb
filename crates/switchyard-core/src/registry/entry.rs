//! Strongly typed registry entries.

use std::fmt;

use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Priority assumed when an entry does not declare one.
pub const DEFAULT_PRIORITY: u32 = 50;

const GOVERNANCE_CATEGORY: &str = "governance";
const WORKFLOW_CATEGORY: &str = "workflow";

const fn default_priority() -> u32 {
    DEFAULT_PRIORITY
}

/// A named routing rule.
///
/// # Example
///
/// ```
/// use switchyard_core::RegistryEntry;
///
/// let entry = RegistryEntry::new("pdf-extractor", "Skill")
///     .with_patterns(["extract.*pdf"])
///     .with_triggers(["pdf"])
///     .with_priority(70);
///
/// assert_eq!(entry.priority(), 70);
/// assert!(entry.is_scoreable());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntry {
    name: String,
    tool: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    patterns: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    triggers: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    exclusions: Vec<String>,
    #[serde(default = "default_priority", deserialize_with = "lenient_priority")]
    priority: u32,
    #[serde(default, deserialize_with = "one_or_many")]
    category: Vec<String>,
}

impl RegistryEntry {
    /// Creates an entry with no patterns, triggers, exclusions or
    /// categories and the default priority.
    #[must_use]
    pub fn new(name: impl Into<String>, tool: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tool: tool.into(),
            patterns: Vec::new(),
            triggers: Vec::new(),
            exclusions: Vec::new(),
            priority: DEFAULT_PRIORITY,
            category: Vec::new(),
        }
    }

    /// Replaces the regular-expression patterns.
    #[must_use]
    pub fn with_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the trigger keywords.
    #[must_use]
    pub fn with_triggers<I, S>(mut self, triggers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.triggers = triggers.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the exclusion keywords.
    #[must_use]
    pub fn with_exclusions<I, S>(mut self, exclusions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclusions = exclusions.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the tie-break priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    /// Replaces the category tags.
    #[must_use]
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.category = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the unique entry name.
    #[must_use]
    pub const fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the tool used to invoke the handler.
    #[must_use]
    pub const fn tool(&self) -> &str {
        self.tool.as_str()
    }

    /// Returns the pattern sources in declaration order.
    #[must_use]
    pub const fn patterns(&self) -> &[String] {
        self.patterns.as_slice()
    }

    /// Returns the trigger keywords.
    #[must_use]
    pub const fn triggers(&self) -> &[String] {
        self.triggers.as_slice()
    }

    /// Returns the exclusion keywords.
    #[must_use]
    pub const fn exclusions(&self) -> &[String] {
        self.exclusions.as_slice()
    }

    /// Returns the tie-break priority.
    #[must_use]
    pub const fn priority(&self) -> u32 {
        self.priority
    }

    /// Returns the category tags.
    #[must_use]
    pub const fn categories(&self) -> &[String] {
        self.category.as_slice()
    }

    /// Returns `true` when the entry carries `tag`.
    #[must_use]
    pub fn has_category(&self, tag: &str) -> bool {
        self.category.iter().any(|candidate| candidate == tag)
    }

    /// Returns `true` when the entry takes part in general prompt scoring.
    ///
    /// Governance entries and pattern-less workflow entries are matched by
    /// other collaborators.
    #[must_use]
    pub fn is_scoreable(&self) -> bool {
        if self.has_category(GOVERNANCE_CATEGORY) {
            return false;
        }
        !(self.has_category(WORKFLOW_CATEGORY) && self.patterns.is_empty())
    }
}

/// Accepts `"tag"`, `["tag", ...]` or `null` for a category list.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OneOrMany;

    impl<'de> Visitor<'de> for OneOrMany {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a category string or a list of category strings")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            Ok(vec![value.to_owned()])
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut tags = Vec::new();
            while let Some(tag) = seq.next_element::<String>()? {
                tags.push(tag);
            }
            Ok(tags)
        }
    }

    deserializer.deserialize_any(OneOrMany)
}

/// Reads a keyword or pattern list, treating `null` as empty.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<String>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Reads a priority from any JSON number.
///
/// `null` means [`DEFAULT_PRIORITY`]. Fractions are truncated, negative
/// values clamp to zero and values beyond `u32::MAX` saturate.
fn lenient_priority<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    struct Priority;

    impl Visitor<'_> for Priority {
        type Value = u32;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a numeric priority or null")
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
            Ok(u32::try_from(value).unwrap_or(u32::MAX))
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
            Ok(u32::try_from(value.max(0)).unwrap_or(u32::MAX))
        }

        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "the value is clamped into the u32 range before the cast"
        )]
        fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
            if value.is_nan() {
                return Ok(DEFAULT_PRIORITY);
            }
            Ok(value.clamp(0.0, f64::from(u32::MAX)).trunc() as u32)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(DEFAULT_PRIORITY)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(DEFAULT_PRIORITY)
        }
    }

    deserializer.deserialize_any(Priority)
}
