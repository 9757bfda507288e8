//! Core trait definitions.
//!
//! The roster store talks to persistence only through [`RosterStorage`], so
//! tests can swap the real file for [`crate::storage::MemoryStorage`].

use crate::error::StorageError;

/// Backend holding the serialized roster.
pub trait RosterStorage {
    /// Read the whole persisted roster, or `None` if nothing was ever saved.
    fn load(&self) -> Result<Option<String>, StorageError>;

    /// Replace the persisted roster with `contents`.
    fn save(&mut self, contents: &str) -> Result<(), StorageError>;

    /// Human-readable location for logs and messages (e.g. a file path).
    fn location(&self) -> String;
}
