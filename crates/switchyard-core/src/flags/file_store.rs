//! Flag markers persisted as files in a shared cache directory.
//!
//! Each flag owns one file, `<flag>.flag`, whose content is the decimal
//! Unix-millisecond timestamp at which it was raised. Writes replace the file
//! wholesale; concurrent hook processes race with last-write-wins semantics.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use cap_std::ambient_authority;
use cap_std::fs::Dir;

use super::{FlagName, FlagStore};
use crate::error::FlagError;

/// Flag store backed by marker files in a directory.
#[derive(Debug, Clone)]
pub struct FileFlagStore {
    dir: PathBuf,
}

impl FileFlagStore {
    /// Creates a store rooted at `dir`. The directory is created lazily on
    /// the first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the marker directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the path of the marker file for `flag`.
    #[must_use]
    pub fn marker_path(&self, flag: FlagName) -> PathBuf {
        self.dir.join(flag.file_name())
    }

    fn open_dir(&self) -> Result<Option<Dir>, FlagError> {
        match Dir::open_ambient_dir(&self.dir, ambient_authority()) {
            Ok(dir) => Ok(Some(dir)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(self.directory_error(source)),
        }
    }

    fn create_dir(&self) -> Result<Dir, FlagError> {
        Dir::create_ambient_dir_all(&self.dir, ambient_authority())
            .and_then(|()| Dir::open_ambient_dir(&self.dir, ambient_authority()))
            .map_err(|source| self.directory_error(source))
    }

    fn directory_error(&self, source: io::Error) -> FlagError {
        FlagError::Directory {
            path: self.dir.clone(),
            source: Arc::new(source),
        }
    }
}

fn marker_error(flag: FlagName, source: io::Error) -> FlagError {
    FlagError::Io {
        flag: flag.as_str(),
        source: Arc::new(source),
    }
}

impl FlagStore for FileFlagStore {
    fn save(&self, flag: FlagName, created_at: u64) -> Result<(), FlagError> {
        let dir = self.create_dir()?;
        dir.write(flag.file_name(), created_at.to_string())
            .map_err(|source| marker_error(flag, source))
    }

    fn load(&self, flag: FlagName) -> Result<Option<u64>, FlagError> {
        let Some(dir) = self.open_dir()? else {
            return Ok(None);
        };
        let content = match dir.read_to_string(flag.file_name()) {
            Ok(content) => content,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(marker_error(flag, source)),
        };
        match content.trim().parse::<u64>() {
            Ok(created_at) => Ok(Some(created_at)),
            Err(_) => Err(FlagError::InvalidTimestamp {
                flag: flag.as_str(),
                content,
            }),
        }
    }

    fn expire(&self, flag: FlagName) -> Result<(), FlagError> {
        let Some(dir) = self.open_dir()? else {
            return Ok(());
        };
        match dir.remove_file(flag.file_name()) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(marker_error(flag, source)),
        }
    }
}
