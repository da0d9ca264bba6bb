//! In-process flag storage.

use std::collections::HashMap;
use std::sync::Mutex;

use super::{FlagName, FlagStore};
use crate::error::FlagError;

/// Flag store kept in memory; nothing outlives the value.
#[derive(Debug, Default)]
pub struct MemoryFlagStore {
    markers: Mutex<HashMap<FlagName, u64>>,
}

impl MemoryFlagStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when a marker exists for `flag`, live or not.
    #[must_use]
    pub fn contains(&self, flag: FlagName) -> bool {
        self.markers
            .lock()
            .is_ok_and(|markers| markers.contains_key(&flag))
    }
}

impl FlagStore for MemoryFlagStore {
    fn save(&self, flag: FlagName, created_at: u64) -> Result<(), FlagError> {
        let mut markers = self.markers.lock().map_err(|_| FlagError::Poisoned)?;
        markers.insert(flag, created_at);
        Ok(())
    }

    fn load(&self, flag: FlagName) -> Result<Option<u64>, FlagError> {
        let markers = self.markers.lock().map_err(|_| FlagError::Poisoned)?;
        Ok(markers.get(&flag).copied())
    }

    fn expire(&self, flag: FlagName) -> Result<(), FlagError> {
        let mut markers = self.markers.lock().map_err(|_| FlagError::Poisoned)?;
        markers.remove(&flag);
        Ok(())
    }
}
