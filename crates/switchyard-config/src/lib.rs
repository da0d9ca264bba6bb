//! Shared configuration for the switchyard hook binary.
//!
//! Values are layered by `ortho_config`: built-in defaults, then an optional
//! configuration file, then `SWITCHYARD_*` environment variables, and finally
//! command-line flags. Every field is optional at every layer; accessors on
//! [`Config`] resolve the effective value, computing platform defaults for
//! paths that were not supplied.

mod defaults;
mod logging;
mod routes;

use camino::{Utf8Path, Utf8PathBuf};
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_FALLBACK_HANDLER, DEFAULT_FALLBACK_TOOL, DEFAULT_LOG_FILTER, REGISTRY_FILE_NAME,
    default_cache_dir, default_fallback_handler, default_fallback_tool, default_log_filter,
    default_log_filter_string, default_log_format, default_registry_path,
};
pub use logging::{LogFormat, LogFormatParseError};
pub use routes::{DEFAULT_ROUTE_TOOL, FileRoute, FileRouteParseError};

/// Resolved configuration for a single hook invocation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "SWITCHYARD")]
pub struct Config {
    /// Location of the registry document.
    #[serde(default)]
    pub registry_path: Option<Utf8PathBuf>,
    /// Directory holding activity flag markers.
    #[serde(default)]
    pub cache_dir: Option<Utf8PathBuf>,
    /// `tracing` filter expression applied to stderr telemetry.
    #[serde(default = "default_log_filter_string")]
    pub log_filter: String,
    /// Layout of telemetry lines.
    #[serde(default = "default_log_format")]
    pub log_format: LogFormat,
    /// Handler dispatched when no registry entry claims a long prompt.
    #[serde(default = "default_fallback_handler")]
    pub fallback_handler: String,
    /// Tool used to invoke the fallback handler.
    #[serde(default = "default_fallback_tool")]
    pub fallback_tool: String,
    /// Extension routes replacing the built-in extension table.
    #[serde(default)]
    pub file_routes: Vec<FileRoute>,
    /// Leaves prompt clarification to the router instead of the interview
    /// suggester.
    #[serde(default)]
    pub defer_interview: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            registry_path: None,
            cache_dir: None,
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            fallback_handler: default_fallback_handler(),
            fallback_tool: default_fallback_tool(),
            file_routes: Vec::new(),
            defer_interview: false,
        }
    }
}

impl Config {
    /// Returns the registry document path, falling back to the platform
    /// configuration directory.
    #[must_use]
    pub fn registry_path(&self) -> Utf8PathBuf {
        self.registry_path
            .clone()
            .unwrap_or_else(default_registry_path)
    }

    /// Returns the flag directory, falling back to `<home>/.claude/cache`.
    #[must_use]
    pub fn cache_dir(&self) -> Utf8PathBuf {
        self.cache_dir.clone().unwrap_or_else(default_cache_dir)
    }

    /// Returns the configured registry path without applying defaults.
    #[must_use]
    pub fn explicit_registry_path(&self) -> Option<&Utf8Path> {
        self.registry_path.as_deref()
    }

    /// Returns the `tracing` filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_str()
    }

    /// Returns the telemetry layout.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Returns the fallback handler name.
    #[must_use]
    pub fn fallback_handler(&self) -> &str {
        self.fallback_handler.as_str()
    }

    /// Returns the fallback tool name.
    #[must_use]
    pub fn fallback_tool(&self) -> &str {
        self.fallback_tool.as_str()
    }

    /// Returns configured extension routes; empty means "use built-ins".
    #[must_use]
    pub fn file_routes(&self) -> &[FileRoute] {
        &self.file_routes
    }

    /// Returns whether the interview suggester stays silent.
    #[must_use]
    pub const fn defer_interview(&self) -> bool {
        self.defer_interview
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_documented_values() {
        let config = Config::default();
        assert_eq!(config.log_filter(), "warn");
        assert_eq!(config.log_format(), LogFormat::Compact);
        assert_eq!(config.fallback_handler(), "general-coder");
        assert_eq!(config.fallback_tool(), "Task");
        assert!(config.file_routes().is_empty());
        assert!(!config.defer_interview());
    }

    #[test]
    fn registry_path_defaults_under_switchyard_directory() {
        let config = Config::default();
        let path = config.registry_path();
        assert_eq!(path.file_name(), Some(REGISTRY_FILE_NAME));
        assert_eq!(
            path.parent().and_then(Utf8Path::file_name),
            Some("switchyard")
        );
    }

    #[test]
    fn cache_dir_defaults_under_claude_directory() {
        let config = Config::default();
        assert!(config.cache_dir().ends_with(".claude/cache"));
    }

    #[test]
    fn explicit_paths_take_precedence() {
        let config = Config {
            registry_path: Some(Utf8PathBuf::from("/srv/registry.json")),
            cache_dir: Some(Utf8PathBuf::from("/srv/cache")),
            ..Config::default()
        };
        assert_eq!(config.registry_path(), Utf8PathBuf::from("/srv/registry.json"));
        assert_eq!(config.cache_dir(), Utf8PathBuf::from("/srv/cache"));
        assert_eq!(
            config.explicit_registry_path(),
            Some(Utf8Path::new("/srv/registry.json"))
        );
    }

    #[test]
    fn log_format_parses_case_insensitively() {
        assert_eq!("JSON".parse::<LogFormat>().ok(), Some(LogFormat::Json));
        assert_eq!("compact".parse::<LogFormat>().ok(), Some(LogFormat::Compact));
        assert!("pretty".parse::<LogFormat>().is_err());
    }
}
