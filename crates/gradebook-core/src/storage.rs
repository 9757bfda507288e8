//! Storage backends for the roster.

use std::fs::File;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::StorageError;
use crate::traits::RosterStorage;

/// File name used when no path is configured.
pub const DEFAULT_DATA_FILE: &str = "students.txt";

/// Roster persisted to a UTF-8 text file.
///
/// Every save truncates and rewrites the file in place. There is no
/// temporary-file swap, so an interrupted write can leave a partial file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileStorage {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_FILE)
    }
}

impl RosterStorage for FileStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn save(&mut self, contents: &str) -> Result<(), StorageError> {
        let write_err = |source| StorageError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }

        // The handle is dropped at the end of this scope, on success or error.
        let mut file = File::create(&self.path).map_err(write_err)?;
        file.write_all(contents.as_bytes()).map_err(write_err)?;
        file.flush().map_err(write_err)?;

        tracing::debug!(path = %self.path.display(), bytes = contents.len(), "roster written");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory backend for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    contents: Option<String>,
    saves: usize,
}

impl MemoryStorage {
    /// Empty storage, as if no file existed yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with serialized roster contents.
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Some(contents.into()),
            saves: 0,
        }
    }

    /// Last contents saved (or seeded).
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    /// Number of saves performed since construction.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl RosterStorage for MemoryStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self.contents.clone())
    }

    fn save(&mut self, contents: &str) -> Result<(), StorageError> {
        self.contents = Some(contents.to_string());
        self.saves += 1;
        Ok(())
    }

    fn location(&self) -> String {
        "<memory>".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("absent.txt"));
        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn save_overwrites_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path().join("students.txt"));
        storage.save("1|Ann|\n2|Bob|\n").unwrap();
        storage.save("1|Ann|\n").unwrap();
        assert_eq!(storage.load().unwrap().as_deref(), Some("1|Ann|\n"));
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/data/students.txt");
        let mut storage = FileStorage::new(&path);
        storage.save("1|Ann|\n").unwrap();
        assert!(path.exists());
        assert_eq!(storage.location(), path.display().to_string());
    }

    #[test]
    fn save_into_directory_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path());
        let err = storage.save("1|Ann|\n").unwrap_err();
        assert!(matches!(err, StorageError::Write { .. }));
    }

    #[test]
    fn default_uses_students_txt() {
        assert_eq!(FileStorage::default().path(), Path::new(DEFAULT_DATA_FILE));
    }

    #[test]
    fn memory_storage_tracks_saves() {
        let mut storage = MemoryStorage::with_contents("1|Ann|\n");
        assert_eq!(storage.load().unwrap().as_deref(), Some("1|Ann|\n"));
        storage.save("").unwrap();
        storage.save("2|Bob|\n").unwrap();
        assert_eq!(storage.save_count(), 2);
        assert_eq!(storage.contents(), Some("2|Bob|\n"));
        assert!(MemoryStorage::new().load().unwrap().is_none());
    }
}
