use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tool used when a file route does not name one.
pub const DEFAULT_ROUTE_TOOL: &str = "Skill";

/// Errors produced when parsing [`FileRoute`] values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FileRouteParseError {
    /// Handler assignment (`=`) was missing from the route.
    #[error("route '{0}' is missing the handler assignment '='")]
    MissingHandler(String),
    /// The extension did not start with a dot or was empty.
    #[error("route '{0}' must start with a file extension such as '.pdf'")]
    InvalidExtension(String),
    /// The handler name was blank.
    #[error("route '{0}' names an empty handler")]
    EmptyHandler(String),
}

/// Maps a file extension mentioned in a prompt straight to a handler.
///
/// The textual form is `.ext=handler` or `.ext=handler:Tool`; the tool
/// defaults to [`DEFAULT_ROUTE_TOOL`].
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct FileRoute {
    /// Lower-case extension including the leading dot.
    pub extension: String,
    /// Handler name emitted in the directive.
    pub handler: String,
    /// Tool emitted in the directive.
    #[serde(default = "default_route_tool")]
    pub tool: String,
}

fn default_route_tool() -> String {
    DEFAULT_ROUTE_TOOL.to_owned()
}

impl FileRoute {
    /// Creates a route using the default tool.
    #[must_use]
    pub fn new(extension: impl Into<String>, handler: impl Into<String>) -> Self {
        Self {
            extension: extension.into().to_lowercase(),
            handler: handler.into(),
            tool: default_route_tool(),
        }
    }

    /// Overrides the tool emitted for this route.
    #[must_use]
    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = tool.into();
        self
    }
}

impl fmt::Display for FileRoute {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}={}:{}", self.extension, self.handler, self.tool)
    }
}

impl FromStr for FileRoute {
    type Err = FileRouteParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let (extension, target) = input
            .split_once('=')
            .ok_or_else(|| FileRouteParseError::MissingHandler(input.to_owned()))?;
        let extension = extension.trim();
        if !extension.starts_with('.') || extension.len() < 2 {
            return Err(FileRouteParseError::InvalidExtension(input.to_owned()));
        }
        let (handler, tool) = match target.split_once(':') {
            Some((handler, tool)) if !tool.trim().is_empty() => (handler.trim(), tool.trim()),
            Some((handler, _)) => (handler.trim(), DEFAULT_ROUTE_TOOL),
            None => (target.trim(), DEFAULT_ROUTE_TOOL),
        };
        if handler.is_empty() {
            return Err(FileRouteParseError::EmptyHandler(input.to_owned()));
        }
        Ok(Self::new(extension, handler).with_tool(tool))
    }
}
