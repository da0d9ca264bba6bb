//! Ordered extension-to-handler routes.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// Tool emitted for extension routes unless a route names another.
pub const DEFAULT_EXTENSION_TOOL: &str = "Skill";

const BUILT_IN: [(&str, &str); 5] = [
    (".pdf", "pdf"),
    (".docx", "docx"),
    (".xlsx", "xlsx"),
    (".pptx", "pptx"),
    (".csv", "csv"),
];

/// One extension route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionRoute {
    extension: String,
    handler: String,
    tool: String,
}

impl ExtensionRoute {
    /// Creates a route; the extension is stored case-folded.
    #[must_use]
    pub fn new(
        extension: impl Into<String>,
        handler: impl Into<String>,
        tool: impl Into<String>,
    ) -> Self {
        Self {
            extension: extension.into().to_lowercase(),
            handler: handler.into(),
            tool: tool.into(),
        }
    }

    /// Returns the case-folded extension, including the leading dot.
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Returns the handler name.
    #[must_use]
    pub fn handler(&self) -> &str {
        &self.handler
    }

    /// Returns the tool used to invoke the handler.
    #[must_use]
    pub fn tool(&self) -> &str {
        &self.tool
    }
}

/// Extension routes consulted in insertion order; the first extension found
/// anywhere in the case-folded prompt wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionMap {
    routes: Vec<ExtensionRoute>,
}

impl Default for ExtensionMap {
    fn default() -> Self {
        Self::from_routes(
            BUILT_IN
                .into_iter()
                .map(|(ext, handler)| ExtensionRoute::new(ext, handler, DEFAULT_EXTENSION_TOOL)),
        )
    }
}

impl ExtensionMap {
    /// Builds a map from routes, keeping their order. Later routes for an
    /// extension already present are ignored.
    #[must_use]
    pub fn from_routes(routes: impl IntoIterator<Item = ExtensionRoute>) -> Self {
        let mut map = Self { routes: Vec::new() };
        for route in routes {
            map.push(route);
        }
        map
    }

    /// Creates a map with no routes.
    #[must_use]
    pub const fn empty() -> Self {
        Self { routes: Vec::new() }
    }

    /// Appends a route unless its extension is already mapped.
    pub fn push(&mut self, route: ExtensionRoute) {
        if self
            .routes
            .iter()
            .all(|existing| existing.extension != route.extension)
        {
            self.routes.push(route);
        }
    }

    /// Returns the first route whose extension occurs in `prompt`.
    #[must_use]
    pub fn lookup(&self, prompt: &str) -> Option<&ExtensionRoute> {
        let lower = prompt.to_lowercase();
        self.routes
            .iter()
            .find(|route| lower.contains(route.extension.as_str()))
    }

    /// Returns the routes in lookup order.
    #[must_use]
    pub fn routes(&self) -> &[ExtensionRoute] {
        &self.routes
    }

    /// Returns `true` when no routes are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Deserialises `{ ".ext": "handler", ... }` preserving document order.
impl<'de> Deserialize<'de> for ExtensionMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(ExtensionMapVisitor)
    }
}

struct ExtensionMapVisitor;

impl<'de> Visitor<'de> for ExtensionMapVisitor {
    type Value = ExtensionMap;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a mapping of file extensions to handler names")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = ExtensionMap::empty();
        while let Some((extension, handler)) = access.next_entry::<String, String>()? {
            map.push(ExtensionRoute::new(extension, handler, DEFAULT_EXTENSION_TOOL));
        }
        Ok(map)
    }
}
