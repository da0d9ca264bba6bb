//! Where the router obtains its registry.
//!
//! The router asks its source for a registry only once the fast path has
//! declined the prompt, so slash commands, greetings and extension routes
//! never touch the registry document.

use std::path::{Path, PathBuf};

use super::Registry;
use crate::error::DispatchError;

/// Supplies a registry on demand.
pub trait RegistrySource {
    /// Produces the registry for one classification.
    ///
    /// # Errors
    ///
    /// Returns a [`DispatchError`] when the registry cannot be obtained;
    /// callers treat this as an empty registry.
    fn load(&self) -> Result<Registry, DispatchError>;
}

impl<T: RegistrySource + ?Sized> RegistrySource for &T {
    fn load(&self) -> Result<Registry, DispatchError> {
        (**self).load()
    }
}

/// An in-memory registry is its own source.
impl RegistrySource for Registry {
    fn load(&self) -> Result<Registry, DispatchError> {
        Ok(self.clone())
    }
}

/// Reads the registry document from disk on every load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRegistry {
    path: PathBuf,
}

impl FileRegistry {
    /// Creates a source reading `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the document path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RegistrySource for FileRegistry {
    fn load(&self) -> Result<Registry, DispatchError> {
        Registry::load(&self.path)
    }
}
