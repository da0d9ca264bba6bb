//! Time-windowed activity flags.
//!
//! A flag is a named marker holding the Unix-millisecond time at which it was
//! raised. It is *active* while younger than [`FLAG_TTL_MS`] and inactive
//! otherwise; a missing marker is simply inactive. Markers are advisory hints
//! shared by independent hook processes, so there is no locking: the last
//! writer wins and a lost update only ever produces a false negative.
//!
//! Storage is abstracted behind [`FlagStore`] with explicit save, load and
//! expire operations. [`ActivityFlags`] layers the time-to-live policy on top
//! and swallows every storage failure, logging it at `debug`.

mod clock;
mod file_store;
mod memory;

use std::fmt;

use tracing::debug;

use crate::error::FlagError;

pub use self::clock::{Clock, ManualClock, SystemClock};
pub use self::file_store::FileFlagStore;
pub use self::memory::MemoryFlagStore;

/// Tracing target for flag operations.
pub(crate) const FLAGS_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::flags");

/// Lifetime of every flag, in milliseconds. Fixed for all flags.
pub const FLAG_TTL_MS: u64 = 90_000;

/// Flags understood by the hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagName {
    /// An explicit slash command started on the main thread.
    CommandActive,
    /// A skill invocation is in progress.
    SkillActive,
    /// A structured requirements interview is in progress.
    InterviewActive,
}

impl FlagName {
    /// Every known flag, in a stable order.
    pub const ALL: [Self; 3] = [Self::CommandActive, Self::SkillActive, Self::InterviewActive];

    /// Returns the canonical flag name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CommandActive => "command-active",
            Self::SkillActive => "skill-active",
            Self::InterviewActive => "interview-active",
        }
    }

    /// Returns the marker file name used by on-disk stores.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::CommandActive => "command-active.flag",
            Self::SkillActive => "skill-active.flag",
            Self::InterviewActive => "interview-active.flag",
        }
    }

    /// Parses a canonical flag name (case-insensitive).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let wanted = value.trim();
        Self::ALL
            .into_iter()
            .find(|flag| flag.as_str().eq_ignore_ascii_case(wanted))
    }
}

impl fmt::Display for FlagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Backing storage for flag markers.
pub trait FlagStore {
    /// Records `created_at` (Unix milliseconds) as the marker for `flag`,
    /// replacing any previous marker.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError`] when the marker cannot be written.
    fn save(&self, flag: FlagName, created_at: u64) -> Result<(), FlagError>;

    /// Returns the marker timestamp, or `None` when no marker exists.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError`] when the marker exists but cannot be read.
    fn load(&self, flag: FlagName) -> Result<Option<u64>, FlagError>;

    /// Removes the marker. Removing a missing marker succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError`] when an existing marker cannot be removed.
    fn expire(&self, flag: FlagName) -> Result<(), FlagError>;
}

impl<T: FlagStore + ?Sized> FlagStore for &T {
    fn save(&self, flag: FlagName, created_at: u64) -> Result<(), FlagError> {
        (**self).save(flag, created_at)
    }

    fn load(&self, flag: FlagName) -> Result<Option<u64>, FlagError> {
        (**self).load(flag)
    }

    fn expire(&self, flag: FlagName) -> Result<(), FlagError> {
        (**self).expire(flag)
    }
}

/// Returns `true` when a marker raised at `created_at` is still live at `now`.
///
/// Markers from the future (clock skew between processes) count as live.
#[must_use]
pub const fn is_fresh(created_at: u64, now: u64) -> bool {
    now.saturating_sub(created_at) < FLAG_TTL_MS
}

/// Fail-open view over a [`FlagStore`] that applies the flag lifetime.
#[derive(Debug, Clone, Default)]
pub struct ActivityFlags<S, C = SystemClock> {
    store: S,
    clock: C,
}

impl<S> ActivityFlags<S, SystemClock> {
    /// Wraps `store` using the system clock.
    #[must_use]
    pub const fn with_system_clock(store: S) -> Self {
        Self {
            store,
            clock: SystemClock,
        }
    }
}

impl<S, C> ActivityFlags<S, C> {
    /// Wraps `store` using `clock` for the current time.
    #[must_use]
    pub const fn new(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    /// Returns the underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Returns the clock.
    #[must_use]
    pub const fn clock(&self) -> &C {
        &self.clock
    }
}

impl<S, C> ActivityFlags<S, C>
where
    S: FlagStore,
    C: Clock,
{
    /// Raises `flag` now. Storage failures are logged and ignored.
    pub fn set(&self, flag: FlagName) {
        let now = self.clock.now_millis();
        match self.store.save(flag, now) {
            Ok(()) => debug!(target: FLAGS_TARGET, flag = %flag, at = now, "flag raised"),
            Err(error) => {
                debug!(target: FLAGS_TARGET, flag = %flag, %error, "failed to raise flag");
            }
        }
    }

    /// Returns `true` when `flag` has a marker younger than the lifetime.
    ///
    /// Missing, unreadable and corrupt markers all read as inactive.
    #[must_use]
    pub fn is_active(&self, flag: FlagName) -> bool {
        match self.store.load(flag) {
            Ok(Some(created_at)) => is_fresh(created_at, self.clock.now_millis()),
            Ok(None) => false,
            Err(error) => {
                debug!(target: FLAGS_TARGET, flag = %flag, %error, "treating unreadable flag as inactive");
                false
            }
        }
    }

    /// Removes markers for `flags` that exist but are no longer active.
    ///
    /// Corrupt markers are removed as well; missing markers are skipped.
    pub fn sweep_stale(&self, flags: &[FlagName]) {
        let now = self.clock.now_millis();
        for &flag in flags {
            let stale = match self.store.load(flag) {
                Ok(Some(created_at)) => !is_fresh(created_at, now),
                Ok(None) => false,
                Err(FlagError::InvalidTimestamp { .. }) => true,
                Err(error) => {
                    debug!(target: FLAGS_TARGET, flag = %flag, %error, "skipping unreadable flag");
                    false
                }
            };
            if !stale {
                continue;
            }
            match self.store.expire(flag) {
                Ok(()) => debug!(target: FLAGS_TARGET, flag = %flag, "removed stale flag"),
                Err(error) => {
                    debug!(target: FLAGS_TARGET, flag = %flag, %error, "failed to remove stale flag");
                }
            }
        }
    }

    /// Reports the activity of every known flag.
    #[must_use]
    pub fn snapshot(&self) -> Vec<(FlagName, bool)> {
        FlagName::ALL
            .into_iter()
            .map(|flag| (flag, self.is_active(flag)))
            .collect()
    }
}
