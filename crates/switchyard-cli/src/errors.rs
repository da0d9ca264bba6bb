//! Error types for the CLI runtime.

use std::io;
use std::sync::Arc;

use switchyard_core::DispatchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("failed to read hook input: {0}")]
    ReadInput(#[source] DispatchError),
    #[error("failed to write hook output: {0}")]
    WriteOutput(#[source] DispatchError),
    #[error("failed to serialise flag status: {0}")]
    SerialiseStatus(#[source] serde_json::Error),
    #[error("failed to write flag status: {0}")]
    WriteStatus(#[source] io::Error),
}
