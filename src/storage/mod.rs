//! Storage layer for expense-tracker
//!
//! A JSON-file document store with atomic writes, plus the mapping from
//! loosely-shaped documents to typed records.

pub mod documents;
pub mod file_io;
pub mod mapping;

pub use documents::{Document, DocumentStore, LoadedRecords};
pub use file_io::{read_json, write_json_atomic};
pub use mapping::{document_to_record, FieldMapping, MappingIssue};

use std::path::PathBuf;

use tracing::info;

use crate::config::paths::TrackerPaths;
use crate::error::TrackerError;

/// Main storage coordinator
pub struct Storage {
    paths: TrackerPaths,
    pub documents: DocumentStore,
    external: bool,
}

impl Storage {
    /// Create storage over the default documents file
    pub fn new(paths: TrackerPaths) -> Result<Self, TrackerError> {
        paths.ensure_directories()?;

        Ok(Self {
            documents: DocumentStore::new(paths.documents_file()),
            paths,
            external: false,
        })
    }

    /// Create storage over an explicit export file instead of the default one
    pub fn with_documents_file(paths: TrackerPaths, file: PathBuf) -> Self {
        Self {
            documents: DocumentStore::new(file),
            paths,
            external: true,
        }
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &TrackerPaths {
        &self.paths
    }

    /// Load all data from disk
    ///
    /// An explicit file must exist; the default one may not have been
    /// written yet.
    pub fn load_all(&self) -> Result<(), TrackerError> {
        if self.external {
            self.documents.load_required()
        } else {
            self.documents.load()
        }
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), TrackerError> {
        self.documents.save()
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}

/// Create the data directory, default settings and an empty documents file
///
/// Returns `false` if everything already existed.
pub fn initialize_storage(
    paths: &TrackerPaths,
    settings: &crate::config::Settings,
) -> Result<bool, TrackerError> {
    paths.ensure_directories()?;
    let mut created = false;

    if !paths.settings_file().exists() {
        settings.save(paths)?;
        created = true;
    }

    let documents_file = paths.documents_file();
    if !documents_file.exists() {
        DocumentStore::new(documents_file).save()?;
        created = true;
    }

    if created {
        info!(base_dir = %paths.base_dir().display(), "initialized data directory");
    }
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_storage_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert!(initialize_storage(&paths, &Settings::default()).unwrap());
        assert!(paths.settings_file().exists());
        assert!(paths.documents_file().exists());
        assert!(!initialize_storage(&paths, &Settings::default()).unwrap());

        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        assert!(storage.is_initialized());
        assert!(storage.documents.is_empty().unwrap());
    }

    #[test]
    fn test_external_file_must_exist() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage =
            Storage::with_documents_file(paths, temp_dir.path().join("export.json"));
        assert!(storage.load_all().is_err());
    }
}
