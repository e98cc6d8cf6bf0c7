//! JSON-file-per-record store
//!
//! Each collection is a directory under the storage root and each record a
//! pretty-printed JSON file inside it.

use log::{debug, error, info};
use serde_json::Value;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use crate::error::StorageError;
use crate::storage::validation::{key_from_file_name, record_file_name};
use crate::storage::{Collection, RecordStore};

const TEMP_SUFFIX: &str = "tmp";

/// Record store backed by a directory of JSON documents
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    root: PathBuf,
    max_retries: usize,
}

impl JsonDirStore {
    /// Open (and create if needed) a store rooted at `root`
    pub fn open(root: impl Into<PathBuf>, max_retries: usize) -> Result<Self, StorageError> {
        let root = root.into();

        for collection in [Collection::Fat, Collection::Blocks] {
            fs::create_dir_all(root.join(collection.dir_name()))?;
        }

        info!("Record store opened at {}", root.display());

        Ok(Self {
            root,
            max_retries: max_retries.max(1),
        })
    }

    fn record_path(&self, collection: Collection, id: &str) -> Result<PathBuf, StorageError> {
        Ok(self
            .root
            .join(collection.dir_name())
            .join(record_file_name(id)?))
    }
}

impl RecordStore for JsonDirStore {
    fn get(&self, collection: Collection, id: &str) -> Result<Option<Value>, StorageError> {
        let path = self.record_path(collection, id)?;

        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StorageError::from(e)),
        };

        Ok(Some(serde_json::from_str(&text)?))
    }

    fn put(
        &mut self,
        collection: Collection,
        id: &str,
        record: &Value,
    ) -> Result<(), StorageError> {
        let path = self.record_path(collection, id)?;
        let temp_path = path.with_extension(format!("json.{}", TEMP_SUFFIX));

        let text = serde_json::to_string_pretty(record)?;
        fs::write(&temp_path, text)?;
        fs::rename(&temp_path, &path)?;

        debug!("Wrote {}/{}", collection.dir_name(), id);
        Ok(())
    }

    fn delete(&mut self, collection: Collection, id: &str) -> Result<bool, StorageError> {
        let path = self.record_path(collection, id)?;

        // Retry for transient permission issues
        for attempt in 1..=self.max_retries {
            match fs::remove_file(&path) {
                Ok(_) => {
                    debug!("Deleted {}/{}", collection.dir_name(), id);
                    return Ok(true);
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
                Err(e) => {
                    if attempt < self.max_retries && e.kind() == io::ErrorKind::PermissionDenied {
                        thread::sleep(Duration::from_millis(100 * attempt as u64));
                        continue;
                    }
                    error!(
                        "Failed to delete record {} ({}): {}",
                        id,
                        path.display(),
                        e
                    );
                    return Err(StorageError::from(e));
                }
            }
        }

        Err(StorageError::IoError(io::Error::other(
            "Failed to delete record after retries",
        )))
    }

    fn list(&self, collection: Collection) -> Result<Vec<String>, StorageError> {
        let dir = self.root.join(collection.dir_name());
        let mut keys = Vec::new();

        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let file_name = entry.file_name().to_string_lossy().to_string();
            if let Some(key) = key_from_file_name(&file_name) {
                keys.push(key.to_string());
            }
        }

        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_put_get_delete_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonDirStore::open(dir.path(), 3).unwrap();

        let record = json!({"data": "héllo", "next": null, "is_last": true});
        store.put(Collection::Blocks, "b1", &record).unwrap();

        assert_eq!(store.get(Collection::Blocks, "b1").unwrap(), Some(record));
        assert!(store.delete(Collection::Blocks, "b1").unwrap());
        assert!(!store.delete(Collection::Blocks, "b1").unwrap());
        assert_eq!(store.get(Collection::Blocks, "b1").unwrap(), None);
    }

    #[test]
    fn test_records_are_human_readable() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonDirStore::open(dir.path(), 3).unwrap();

        store
            .put(Collection::Fat, "año/2024", &json!({"name": "año/2024"}))
            .unwrap();

        let text = fs::read_to_string(dir.path().join("fat").join("año_2024.json")).unwrap();
        assert!(text.contains("\"name\": \"año/2024\""));
        assert_eq!(store.list(Collection::Fat).unwrap(), vec!["año_2024"]);
    }

    #[test]
    fn test_list_ignores_foreign_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonDirStore::open(dir.path(), 3).unwrap();
        store.put(Collection::Fat, "notes", &json!({})).unwrap();
        fs::write(dir.path().join("fat").join("README"), "x").unwrap();

        assert_eq!(store.list(Collection::Fat).unwrap(), vec!["notes"]);
    }

    #[test]
    fn test_corrupt_record_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonDirStore::open(dir.path(), 3).unwrap();
        fs::write(dir.path().join("blocks").join("bad.json"), "{not json").unwrap();

        assert!(matches!(
            store.get(Collection::Blocks, "bad"),
            Err(StorageError::Serialization(_))
        ));
    }
}
