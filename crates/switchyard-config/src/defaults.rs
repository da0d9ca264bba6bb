use std::env;

use camino::Utf8PathBuf;

use crate::logging::LogFormat;

/// Default log filter expression used by the binary.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Handler dispatched when nothing else claims a long prompt.
pub const DEFAULT_FALLBACK_HANDLER: &str = "general-coder";

/// Tool used to invoke the fallback handler.
pub const DEFAULT_FALLBACK_TOOL: &str = "Task";

/// File name of the registry document inside the configuration directory.
pub const REGISTRY_FILE_NAME: &str = "registry.json";

/// Borrowed form of [`DEFAULT_LOG_FILTER`].
pub fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binary.
pub fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

/// Owned fallback handler name for serde defaults.
pub fn default_fallback_handler() -> String {
    DEFAULT_FALLBACK_HANDLER.to_owned()
}

/// Owned fallback tool name for serde defaults.
pub fn default_fallback_tool() -> String {
    DEFAULT_FALLBACK_TOOL.to_owned()
}

/// Computes the default registry location:
/// `<config dir>/switchyard/registry.json`.
pub fn default_registry_path() -> Utf8PathBuf {
    let mut base = dirs::config_dir()
        .and_then(|path| Utf8PathBuf::from_path_buf(path).ok())
        .unwrap_or_else(fallback_base_directory);
    base.push("switchyard");
    base.push(REGISTRY_FILE_NAME);
    base
}

/// Computes the default flag directory shared with the host:
/// `<home>/.claude/cache`.
pub fn default_cache_dir() -> Utf8PathBuf {
    let mut base = dirs::home_dir()
        .and_then(|path| Utf8PathBuf::from_path_buf(path).ok())
        .unwrap_or_else(fallback_base_directory);
    base.push(".claude");
    base.push("cache");
    base
}

fn fallback_base_directory() -> Utf8PathBuf {
    let candidate = env::temp_dir();
    Utf8PathBuf::from_path_buf(candidate).unwrap_or_else(|_| Utf8PathBuf::from("/tmp"))
}
