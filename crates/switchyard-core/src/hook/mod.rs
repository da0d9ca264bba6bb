//! Hook input as delivered on stdin.

use std::io::Read;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::error::DispatchError;

/// One hook event. Every field is optional; each hook reads the ones it
/// needs and ignores the rest.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HookInput {
    #[serde(default)]
    prompt: Option<String>,
    #[serde(default)]
    tool_name: Option<String>,
    #[serde(default)]
    tool_input: Value,
    #[serde(default)]
    session_id: Option<String>,
    #[serde(default)]
    cwd: Option<String>,
}

impl HookInput {
    /// Creates input carrying a user prompt.
    #[must_use]
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            prompt: Some(prompt.into()),
            ..Self::default()
        }
    }

    /// Creates input describing a tool invocation.
    #[must_use]
    pub fn from_tool(tool_name: impl Into<String>, tool_input: Value) -> Self {
        Self {
            tool_name: Some(tool_name.into()),
            tool_input,
            ..Self::default()
        }
    }

    /// Decodes one JSON object. Blank input yields `None`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InputParse`] when the text is not a JSON
    /// object with the expected field types.
    pub fn parse(raw: &str) -> Result<Option<Self>, DispatchError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        serde_json::from_str(trimmed)
            .map(Some)
            .map_err(DispatchError::InputParse)
    }

    /// Reads `reader` to the end and decodes it with [`HookInput::parse`].
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InputRead`] when reading fails and
    /// [`DispatchError::InputParse`] when decoding fails.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Option<Self>, DispatchError> {
        let mut raw = String::new();
        reader
            .read_to_string(&mut raw)
            .map_err(|source| DispatchError::InputRead(Arc::new(source)))?;
        Self::parse(&raw)
    }

    /// Returns the prompt, or `""` when absent.
    #[must_use]
    pub fn prompt(&self) -> &str {
        self.prompt.as_deref().unwrap_or_default()
    }

    /// Returns the tool name, or `""` when absent.
    #[must_use]
    pub fn tool_name(&self) -> &str {
        self.tool_name.as_deref().unwrap_or_default()
    }

    /// Returns the raw tool input (`null` when absent).
    #[must_use]
    pub const fn tool_input(&self) -> &Value {
        &self.tool_input
    }

    /// Returns a string field of the tool input, if present.
    #[must_use]
    pub fn tool_input_str(&self, key: &str) -> Option<&str> {
        self.tool_input.get(key).and_then(Value::as_str)
    }

    /// Returns the host session identifier, if supplied.
    #[must_use]
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// Returns the host working directory, if supplied.
    #[must_use]
    pub fn cwd(&self) -> Option<&str> {
        self.cwd.as_deref()
    }
}

#[cfg(test)]
mod tests;
