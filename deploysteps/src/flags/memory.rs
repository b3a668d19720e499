//! In-memory flag store.

use super::{Flag, FlagStore};
use crate::errors::FileSystemError;
use parking_lot::RwLock;
use std::collections::BTreeSet;

/// A flag store that lives only as long as the process.
///
/// Useful for dry runs and tests that exercise several phases in one
/// process.
#[derive(Debug, Default)]
pub struct MemoryFlagStore {
    flags: RwLock<BTreeSet<Flag>>,
}

impl MemoryFlagStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with the given flags already set.
    #[must_use]
    pub fn with_flags(flags: impl IntoIterator<Item = Flag>) -> Self {
        Self {
            flags: RwLock::new(flags.into_iter().collect()),
        }
    }

    /// Returns the flags currently set.
    #[must_use]
    pub fn flags(&self) -> Vec<Flag> {
        self.flags.read().iter().copied().collect()
    }
}

impl FlagStore for MemoryFlagStore {
    fn exists(&self, flag: Flag) -> Result<bool, FileSystemError> {
        Ok(self.flags.read().contains(&flag))
    }

    fn set(&self, flag: Flag) -> Result<(), FileSystemError> {
        self.flags.write().insert(flag);
        Ok(())
    }

    fn delete(&self, flag: Flag) -> Result<bool, FileSystemError> {
        Ok(self.flags.write().remove(&flag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::reset_flags;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryFlagStore::new();
        store.set(Flag::StaticContentDeployPending).unwrap();
        assert!(store.exists(Flag::StaticContentDeployPending).unwrap());
        assert!(store.delete(Flag::StaticContentDeployPending).unwrap());
        assert!(!store.delete(Flag::StaticContentDeployPending).unwrap());
    }

    #[test]
    fn test_reset_clears_preset_flags() {
        let store = MemoryFlagStore::with_flags(Flag::ALL);
        assert_eq!(store.flags().len(), 2);

        reset_flags(&store).unwrap();
        assert!(store.flags().is_empty());
    }
}
