// ABOUTME: RecordManager pairs a RecordStore with its backing file.
// ABOUTME: Loads on request and rewrites the whole file after every successful mutation.

use std::path::{Path, PathBuf};

use roster_core::{RecordStore, SCORE_COUNT, StoreError};
use thiserror::Error;

use crate::codec::{self, CodecError};

/// Errors from a managed mutation: either the store rejected it, or it was
/// applied in memory but could not be written out.
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Owns the record store and the path it is persisted to.
///
/// Every mutating method saves the full store after the store accepts the
/// change. A rejected mutation never touches the file. Sorts reorder the
/// store without saving; the new order reaches disk with the next save.
pub struct RecordManager {
    path: PathBuf,
    store: RecordStore,
}

impl RecordManager {
    /// Create a manager with an empty store. Nothing is read until
    /// [`RecordManager::load`] is called.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            store: RecordStore::new(),
        }
    }

    /// Return the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Replace the store contents with the backing file's records and
    /// return how many were admitted. If the file cannot be read the store
    /// is left empty and the error is returned for the caller to report.
    pub fn load(&mut self) -> Result<usize, CodecError> {
        match codec::load(&self.path) {
            Ok(records) => {
                let skipped = self.store.replace_all(records);
                if skipped > 0 {
                    tracing::warn!("skipped {} duplicate records on load", skipped);
                }
                Ok(self.store.len())
            }
            Err(err) => {
                tracing::warn!("starting with an empty store: {}", err);
                self.store.replace_all(Vec::new());
                Err(err)
            }
        }
    }

    /// Write the whole store to the backing file.
    pub fn save(&self) -> Result<(), CodecError> {
        codec::save(&self.path, self.store.records())
    }

    pub fn add(
        &mut self,
        name: String,
        id: i64,
        department: String,
        major: String,
        scores: &[i32],
    ) -> Result<(), ManagerError> {
        self.store.add(name, id, department, major, scores)?;
        self.save()?;
        Ok(())
    }

    pub fn delete_by_name(&mut self, name: &str) -> Result<(), ManagerError> {
        self.store.delete_by_name(name)?;
        self.save()?;
        Ok(())
    }

    pub fn delete_by_id(&mut self, id: i64) -> Result<(), ManagerError> {
        self.store.delete_by_id(id)?;
        self.save()?;
        Ok(())
    }

    pub fn modify_by_name(
        &mut self,
        name: &str,
        department: String,
        major: String,
        scores: [i32; SCORE_COUNT],
    ) -> Result<(), ManagerError> {
        self.store.modify_by_name(name, department, major, scores)?;
        self.save()?;
        Ok(())
    }

    pub fn modify_by_id(
        &mut self,
        id: i64,
        department: String,
        major: String,
        scores: [i32; SCORE_COUNT],
    ) -> Result<(), ManagerError> {
        self.store.modify_by_id(id, department, major, scores)?;
        self.save()?;
        Ok(())
    }

    pub fn sort_by_id(&mut self) {
        self.store.sort_by_id();
    }

    pub fn sort_by_total_score(&mut self, ascending: bool) {
        self.store.sort_by_total_score(ascending);
    }

    pub fn sort_by_course(&mut self, course: usize, ascending: bool) -> Result<(), StoreError> {
        self.store.sort_by_course(course, ascending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::ValidationError;
    use std::fs;
    use tempfile::TempDir;

    fn add_alice(manager: &mut RecordManager) -> Result<(), ManagerError> {
        manager.add(
            "Alice".to_string(),
            1001,
            "CS".to_string(),
            "AI".to_string(),
            &[90, 80, 70, 60, 50],
        )
    }

    #[test]
    fn add_persists_immediately() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("students.dat");
        let mut manager = RecordManager::new(&path);

        add_alice(&mut manager).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Alice 1001 CS AI 90 80 70 60 50\n"
        );
    }

    #[test]
    fn rejected_mutation_does_not_write() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("students.dat");
        let mut manager = RecordManager::new(&path);

        let err = manager
            .add(
                "Alice".to_string(),
                1,
                "CS".to_string(),
                "AI".to_string(),
                &[1, 2, 3],
            )
            .unwrap_err();

        assert!(matches!(
            err,
            ManagerError::Store(StoreError::Validation(
                ValidationError::WrongScoreCount { found: 3, .. }
            ))
        ));
        assert!(!path.exists());
    }

    #[test]
    fn load_round_trips_through_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("students.dat");

        let mut writer = RecordManager::new(&path);
        add_alice(&mut writer).unwrap();
        writer
            .modify_by_id(1001, "Math".to_string(), "Logic".to_string(), [1, 2, 3, 4, 5])
            .unwrap();

        let mut reader = RecordManager::new(&path);
        assert_eq!(reader.load().unwrap(), 1);

        let alice = reader.store().find_by_name("Alice").unwrap();
        assert_eq!(alice.department(), "Math");
        assert_eq!(alice.total_score(), 15);
    }

    #[test]
    fn load_missing_file_leaves_empty_store() {
        let dir = TempDir::new().unwrap();
        let mut manager = RecordManager::new(dir.path().join("absent.dat"));

        let err = manager.load().unwrap_err();

        assert!(matches!(err, CodecError::Read { .. }));
        assert!(manager.store().is_empty());
    }

    #[test]
    fn load_replaces_existing_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("students.dat");

        let mut manager = RecordManager::new(&path);
        add_alice(&mut manager).unwrap();
        fs::write(&path, "Bob 2 EE RF 1 1 1 1 1\n").unwrap();
        manager.load().unwrap();

        assert_eq!(manager.store().len(), 1);
        assert!(manager.store().find_by_name("Alice").is_none());
    }

    #[test]
    fn delete_persists_and_missing_key_does_not() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("students.dat");
        let mut manager = RecordManager::new(&path);
        add_alice(&mut manager).unwrap();

        let err = manager.delete_by_name("Zed").unwrap_err();
        assert!(matches!(err, ManagerError::Store(StoreError::NotFound(_))));
        assert_eq!(manager.store().len(), 1);

        manager.delete_by_id(1001).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn sort_order_reaches_disk_on_save() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("students.dat");
        let mut manager = RecordManager::new(&path);
        add_alice(&mut manager).unwrap();
        manager
            .add("Zoe".to_string(), 9, "X".to_string(), "Y".to_string(), &[0; 5])
            .unwrap();
        assert!(fs::read_to_string(&path).unwrap().starts_with("Alice "));

        manager.sort_by_id();
        manager.save().unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("Zoe 9 "));
    }
}
