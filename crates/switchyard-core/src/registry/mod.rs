//! Declarative registry of dispatch handlers.
//!
//! The registry document is JSON with three top-level keys:
//!
//! - `entries`: ordered [`RegistryEntry`] records scored against prompts;
//! - `governance`: named [`GovernanceRule`]s keyed on edited file content;
//! - `file_ext_map`: optional extension routes (see [`ExtensionMap`]) that
//!   extend the fast-path table; they are consulted only once it misses.
//!
//! Loading is lenient at the finest useful granularity. A document that is
//! not JSON yields an error (which callers treat as "no entries"), but a
//! single malformed entry or rule is skipped on its own, and a later entry
//! reusing an earlier name is dropped. Entry order is preserved exactly
//! because the selector breaks final ties by position.

mod entry;
mod source;

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::DispatchError;
use crate::fast_path::ExtensionMap;
use crate::governance::GovernanceRule;

pub use self::entry::{DEFAULT_PRIORITY, RegistryEntry};
pub use self::source::{FileRegistry, RegistrySource};

/// Tracing target for registry loading.
pub(crate) const REGISTRY_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::registry");

#[derive(Debug, Default, Deserialize)]
struct RawRegistry {
    #[serde(default)]
    entries: Vec<Value>,
    #[serde(default)]
    governance: BTreeMap<String, Value>,
    #[serde(default)]
    file_ext_map: Option<Value>,
}

/// A loaded registry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registry {
    entries: Vec<RegistryEntry>,
    governance: BTreeMap<String, GovernanceRule>,
    extension_map: Option<ExtensionMap>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            governance: BTreeMap::new(),
            extension_map: None,
        }
    }

    /// Builds a registry from entries in declaration order, dropping any
    /// entry whose name was already taken.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = RegistryEntry>) -> Self {
        let mut registry = Self::new();
        for entry in entries {
            registry.push(entry);
        }
        registry
    }

    /// Parses a registry document.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::RegistryParse`] when the document is not a
    /// JSON object of the expected shape. Individual malformed entries and
    /// rules are skipped rather than reported.
    pub fn from_json_str(document: &str) -> Result<Self, DispatchError> {
        let raw: RawRegistry =
            serde_json::from_str(document).map_err(DispatchError::RegistryParse)?;
        Ok(Self::from_raw(raw))
    }

    /// Reads and parses the registry document at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::RegistryRead`] when the file cannot be read
    /// and [`DispatchError::RegistryParse`] when it is not a registry.
    pub fn load(path: &Path) -> Result<Self, DispatchError> {
        let document = fs::read_to_string(path).map_err(|source| DispatchError::RegistryRead {
            path: path.to_path_buf(),
            source: Arc::new(source),
        })?;
        Self::from_json_str(&document)
    }

    fn from_raw(raw: RawRegistry) -> Self {
        let mut registry = Self::new();
        for (index, value) in raw.entries.into_iter().enumerate() {
            match serde_json::from_value::<RegistryEntry>(value) {
                Ok(entry) => registry.push(entry),
                Err(error) => {
                    warn!(target: REGISTRY_TARGET, index, %error, "skipping malformed registry entry");
                }
            }
        }
        for (name, value) in raw.governance {
            match serde_json::from_value::<GovernanceRule>(value) {
                Ok(rule) => {
                    registry.governance.insert(name, rule);
                }
                Err(error) => {
                    debug!(target: REGISTRY_TARGET, rule = %name, %error, "skipping malformed governance rule");
                }
            }
        }
        if let Some(value) = raw.file_ext_map {
            match serde_json::from_value::<ExtensionMap>(value) {
                Ok(map) => registry.extension_map = Some(map),
                Err(error) => {
                    debug!(target: REGISTRY_TARGET, %error, "ignoring malformed file_ext_map");
                }
            }
        }
        registry
    }

    /// Appends `entry` unless an entry with the same name exists.
    pub fn push(&mut self, entry: RegistryEntry) {
        if self.get(entry.name()).is_some() {
            warn!(target: REGISTRY_TARGET, name = entry.name(), "duplicate registry entry ignored");
            return;
        }
        self.entries.push(entry);
    }

    /// Adds or replaces a governance rule.
    #[must_use]
    pub fn with_governance_rule(mut self, name: impl Into<String>, rule: GovernanceRule) -> Self {
        self.governance.insert(name.into(), rule);
        self
    }

    /// Sets the extension routes declared by the document.
    #[must_use]
    pub fn with_extension_map(mut self, map: ExtensionMap) -> Self {
        self.extension_map = Some(map);
        self
    }

    /// Entries in declaration order.
    #[must_use]
    pub const fn entries(&self) -> &[RegistryEntry] {
        self.entries.as_slice()
    }

    /// Looks up an entry by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RegistryEntry> {
        self.entries.iter().find(|entry| entry.name() == name)
    }

    /// Looks up a governance rule by name.
    #[must_use]
    pub fn governance_rule(&self, name: &str) -> Option<&GovernanceRule> {
        self.governance.get(name)
    }

    /// Names of every governance rule declared.
    pub fn governance_rule_names(&self) -> impl Iterator<Item = &str> {
        self.governance.keys().map(String::as_str)
    }

    /// Extension routes declared by the document, if any.
    #[must_use]
    pub const fn extension_map(&self) -> Option<&ExtensionMap> {
        self.extension_map.as_ref()
    }

    /// Number of entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the registry has no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` when every entry name is distinct.
    #[must_use]
    pub fn names_are_unique(&self) -> bool {
        let mut seen = HashSet::new();
        self.entries.iter().all(|entry| seen.insert(entry.name()))
    }
}
