//! Domain errors raised inside the classifier.
//!
//! None of these errors ever reach the host: every boundary that faces it
//! logs the error and degrades to "no directive". They still carry structured
//! context so the logs say which file, flag or entry misbehaved. I/O errors
//! are wrapped in `Arc` to satisfy the `result_large_err` Clippy lint.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// Errors arising while loading the registry or decoding hook input.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The registry document could not be read.
    #[error("failed to read registry at {}: {source}", .path.display())]
    RegistryRead {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// The registry document is not valid JSON or has the wrong shape.
    #[error("failed to parse registry document: {0}")]
    RegistryParse(#[source] serde_json::Error),

    /// Hook input on stdin could not be decoded.
    #[error("failed to parse hook input: {0}")]
    InputParse(#[source] serde_json::Error),

    /// Hook input could not be read from stdin.
    #[error("failed to read hook input: {0}")]
    InputRead(#[source] Arc<std::io::Error>),

    /// The hook envelope could not be encoded or written.
    #[error("failed to write hook output: {0}")]
    OutputEncode(#[source] serde_json::Error),
}

/// Errors arising from flag marker storage.
#[derive(Debug, Error)]
pub enum FlagError {
    /// The flag directory could not be created or opened.
    #[error("flag directory {} is unavailable: {source}", .path.display())]
    Directory {
        /// Directory that was opened.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// A marker could not be written, read or removed.
    #[error("flag '{flag}' could not be accessed: {source}")]
    Io {
        /// Flag whose marker failed.
        flag: &'static str,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// A marker exists but does not hold a millisecond timestamp.
    #[error("flag '{flag}' holds an invalid timestamp '{content}'")]
    InvalidTimestamp {
        /// Flag whose marker is corrupt.
        flag: &'static str,
        /// Marker content as read.
        content: String,
    },

    /// The in-memory store's lock was poisoned by a panicking writer.
    #[error("flag store lock poisoned")]
    Poisoned,
}
