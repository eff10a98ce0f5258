//! File-backed chirp store
//!
//! The whole mapping lives in memory and is rewritten to the backing file
//! on every create. Writes go to a sibling `.tmp` file which is fsynced and
//! then renamed over the backing file, so readers of the file never see a
//! partially written store. A failed write removes the temp file.
//!
//! A single `RwLock` serializes all access: creates hold the write lock for
//! the full assign-insert-persist sequence, lists take the read lock.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use super::errors::{StorageError, StorageResult};
use crate::observability::Logger;
use super::record::{Chirp, StoreFile, StoreFileRef};

#[derive(Debug)]
struct StoreState {
    chirps: BTreeMap<u64, Chirp>,
    next_id: u64,
}

impl StoreState {
    /// Returns `None` when the highest stored id leaves no id to assign.
    fn from_chirps(chirps: BTreeMap<u64, Chirp>) -> Option<Self> {
        let next_id = match chirps.keys().next_back() {
            Some(max) => max.checked_add(1)?,
            None => 1,
        };
        Some(Self { chirps, next_id })
    }
}

/// Durable mapping from chirp id to chirp.
#[derive(Debug)]
pub struct ChirpStore {
    path: PathBuf,
    state: RwLock<StoreState>,
}

impl ChirpStore {
    /// Opens the store backed by the file at `path`.
    ///
    /// A missing or empty file yields an empty store; the file is created on
    /// the first write.
    ///
    /// # Errors
    ///
    /// Returns `CHIRPY_STORAGE_INIT_FAILED` if the file exists but cannot be
    /// read, is not valid JSON, or holds inconsistent ids.
    pub fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();
        let chirps = Self::load(&path)?;
        let state = StoreState::from_chirps(chirps).ok_or_else(|| {
            StorageError::malformed_store(
                format!("Inconsistent store file: {}", path.display()),
                format!("chirp id {} leaves no id to assign", u64::MAX),
            )
        })?;

        Ok(Self {
            path,
            state: RwLock::new(state),
        })
    }

    fn load(path: &Path) -> StorageResult<BTreeMap<u64, Chirp>> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(StorageError::init_failed(
                    format!("Failed to read store file: {}", path.display()),
                    e,
                ))
            }
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(BTreeMap::new());
        }

        let file: StoreFile = serde_json::from_slice(&bytes).map_err(|e| {
            StorageError::malformed_store(
                format!("Invalid store file: {}", path.display()),
                e.to_string(),
            )
        })?;

        file.check_consistency().map_err(|reason| {
            StorageError::malformed_store(
                format!("Inconsistent store file: {}", path.display()),
                reason,
            )
        })?;

        Ok(file.chirps)
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Assigns the next id, stores the chirp and persists the whole store.
    ///
    /// On a failed write the in-memory mapping is left exactly as it was, so
    /// the next create reuses the same id. `u64::MAX` is never assigned: a
    /// store whose next id is the last one refuses further creates.
    pub fn create_chirp(&self, body: impl Into<String>) -> StorageResult<Chirp> {
        let mut state = self
            .state
            .write()
            .map_err(|_| StorageError::write_failed_no_source("Chirp store lock poisoned"))?;

        let id = state.next_id;
        let next_id = id
            .checked_add(1)
            .ok_or_else(|| StorageError::write_failed_no_source("Chirp id space exhausted"))?;
        let chirp = Chirp::new(id, body);
        state.chirps.insert(id, chirp.clone());

        if let Err(e) = self.persist(&state.chirps) {
            state.chirps.remove(&id);
            return Err(e);
        }

        state.next_id = next_id;
        Ok(chirp)
    }

    /// Returns every chirp ordered by ascending id.
    pub fn list_chirps(&self) -> StorageResult<Vec<Chirp>> {
        let state = self
            .state
            .read()
            .map_err(|_| StorageError::read_failed("Chirp store lock poisoned"))?;
        Ok(state.chirps.values().cloned().collect())
    }

    /// Number of stored chirps.
    pub fn count(&self) -> StorageResult<usize> {
        let state = self
            .state
            .read()
            .map_err(|_| StorageError::read_failed("Chirp store lock poisoned"))?;
        Ok(state.chirps.len())
    }

    fn persist(&self, chirps: &BTreeMap<u64, Chirp>) -> StorageResult<()> {
        let encoded = serde_json::to_vec(&StoreFileRef { chirps }).map_err(|e| {
            StorageError::write_failed_no_source(format!("Failed to encode store: {}", e))
        })?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    StorageError::write_failed(
                        format!("Failed to create store directory: {}", parent.display()),
                        e,
                    )
                })?;
            }
        }

        let tmp_path = self.tmp_path();
        let mut file = File::create(&tmp_path).map_err(|e| {
            StorageError::write_failed(
                format!("Failed to create temp store file: {}", tmp_path.display()),
                e,
            )
        })?;

        let written = Self::write_synced(&mut file, &encoded);
        drop(file);

        let result = written.and_then(|()| {
            fs::rename(&tmp_path, &self.path).map_err(|e| {
                StorageError::write_failed(
                    format!("Failed to replace store file: {}", self.path.display()),
                    e,
                )
            })
        });

        if result.is_err() {
            Self::remove_tmp(&tmp_path);
        }
        result
    }

    fn write_synced(file: &mut File, encoded: &[u8]) -> StorageResult<()> {
        file.write_all(encoded)
            .map_err(|e| StorageError::write_failed("Failed to write store", e))?;

        // fsync before rename so the rename never publishes unsynced data
        file.sync_all()
            .map_err(|e| StorageError::write_failed("fsync failed after writing store", e))
    }

    /// Best effort: the write error is what the caller reports.
    fn remove_tmp(tmp_path: &Path) {
        match fs::remove_file(tmp_path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => Logger::warn(
                "STORE_TMP_CLEANUP_FAILED",
                &[
                    ("path", tmp_path.display().to_string().as_str()),
                    ("reason", e.to_string().as_str()),
                ],
            ),
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageErrorCode;
    use tempfile::TempDir;

    fn store_path(dir: &TempDir) -> PathBuf {
        dir.path().join("database.json")
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = store_path(&temp_dir);

        let store = ChirpStore::open(&path).unwrap();

        assert_eq!(store.count().unwrap(), 0);
        assert!(store.list_chirps().unwrap().is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn test_open_empty_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = store_path(&temp_dir);
        fs::write(&path, "").unwrap();

        let store = ChirpStore::open(&path).unwrap();
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_open_malformed_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = store_path(&temp_dir);
        fs::write(&path, "{not json").unwrap();

        let err = ChirpStore::open(&path).unwrap_err();
        assert_eq!(err.code(), StorageErrorCode::ChirpyStorageInitFailed);
        assert!(err.is_fatal());
    }

    #[test]
    fn test_open_directory_fails() {
        let temp_dir = TempDir::new().unwrap();

        let err = ChirpStore::open(temp_dir.path()).unwrap_err();
        assert_eq!(err.code(), StorageErrorCode::ChirpyStorageInitFailed);
    }

    #[test]
    fn test_first_write_creates_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = store_path(&temp_dir);

        let store = ChirpStore::open(&path).unwrap();
        let chirp = store.create_chirp("hello").unwrap();

        assert_eq!(chirp, Chirp::new(1, "hello"));
        assert!(path.exists());
        assert!(!store.tmp_path().exists());
    }

    #[test]
    fn test_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("db").join("database.json");

        let store = ChirpStore::open(&path).unwrap();
        store.create_chirp("hello").unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_next_id_continues_after_existing_max() {
        let temp_dir = TempDir::new().unwrap();
        let path = store_path(&temp_dir);
        fs::write(
            &path,
            r#"{"chirps":{"2":{"id":2,"body":"a"},"7":{"id":7,"body":"b"}}}"#,
        )
        .unwrap();

        let store = ChirpStore::open(&path).unwrap();
        let chirp = store.create_chirp("c").unwrap();

        assert_eq!(chirp.id, 8);
    }

    #[test]
    fn test_open_rejects_exhausted_id_space() {
        let temp_dir = TempDir::new().unwrap();
        let path = store_path(&temp_dir);
        fs::write(
            &path,
            r#"{"chirps":{"18446744073709551615":{"id":18446744073709551615,"body":"last"}}}"#,
        )
        .unwrap();

        let err = ChirpStore::open(&path).unwrap_err();
        assert_eq!(err.code(), StorageErrorCode::ChirpyStorageInitFailed);
        assert!(err.is_fatal());
    }

    #[test]
    fn test_create_refuses_last_id() {
        let temp_dir = TempDir::new().unwrap();
        let path = store_path(&temp_dir);
        let max = u64::MAX - 1;
        fs::write(
            &path,
            format!(r#"{{"chirps":{{"{max}":{{"id":{max},"body":"a"}}}}}}"#),
        )
        .unwrap();
        let before = fs::read(&path).unwrap();

        let store = ChirpStore::open(&path).unwrap();
        let err = store.create_chirp("b").unwrap_err();

        assert_eq!(err.code(), StorageErrorCode::ChirpyStorageWriteFailed);
        assert_eq!(store.count().unwrap(), 1);
        assert_eq!(fs::read(&path).unwrap(), before);
        assert!(ChirpStore::open(&path).is_ok());
    }

    #[test]
    fn test_failed_rename_removes_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = store_path(&temp_dir);
        let store = ChirpStore::open(&path).unwrap();

        // A non-empty directory at the store path makes the rename fail
        fs::create_dir(&path).unwrap();
        fs::write(path.join("occupied"), "x").unwrap();

        let err = store.create_chirp("hello").unwrap_err();
        assert_eq!(err.code(), StorageErrorCode::ChirpyStorageWriteFailed);
        assert!(!store.tmp_path().exists());
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_failed_persist_rolls_back() {
        let temp_dir = TempDir::new().unwrap();
        let path = store_path(&temp_dir);
        let store = ChirpStore::open(&path).unwrap();
        store.create_chirp("first").unwrap();

        // A directory where the temp file should go makes the write fail
        fs::create_dir(store.tmp_path()).unwrap();

        let err = store.create_chirp("second").unwrap_err();
        assert_eq!(err.code(), StorageErrorCode::ChirpyStorageWriteFailed);
        assert_eq!(store.count().unwrap(), 1);

        fs::remove_dir(store.tmp_path()).unwrap();

        let retried = store.create_chirp("second").unwrap();
        assert_eq!(retried.id, 2);

        let reopened = ChirpStore::open(&path).unwrap();
        assert_eq!(
            reopened.list_chirps().unwrap(),
            vec![Chirp::new(1, "first"), Chirp::new(2, "second")]
        );
    }
}
