//! Local identity for nested draft entries using ULIDs
//!
//! Server records are identified by the backend's `_id` strings. Entries
//! created inside a draft (milestones, tasks, risks) have no server id until
//! the project is saved, so each one carries an [`EntryKey`] generated when
//! the entry is created or loaded. Keys never leave the process.

use ulid::Ulid;

/// Stable, session-local key for an entry in a draft collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryKey(Ulid);

impl EntryKey {
    /// Generate a fresh key
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for EntryKey {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_unique() {
        let a = EntryKey::new();
        let b = EntryKey::default();
        assert_ne!(a, b);
    }

    #[test]
    fn test_copies_share_identity() {
        let key = EntryKey::new();
        let copy = key;
        assert_eq!(key, copy);
    }
}
