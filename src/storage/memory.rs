//! In-memory record store
//!
//! Substitute substrate for tests and throwaway sessions.

use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::StorageError;
use crate::storage::validation::{sanitize_key, validate_key};
use crate::storage::{Collection, RecordStore};

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    records: BTreeMap<(Collection, String), Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map key under the same rules as the file backend
    fn record_key(collection: Collection, id: &str) -> Result<(Collection, String), StorageError> {
        validate_key(id)?;
        Ok((collection, sanitize_key(id)))
    }

    /// Number of records held in a collection
    pub fn count(&self, collection: Collection) -> usize {
        self.records.keys().filter(|(c, _)| *c == collection).count()
    }
}

impl RecordStore for MemoryStore {
    fn get(&self, collection: Collection, id: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.records.get(&Self::record_key(collection, id)?).cloned())
    }

    fn put(
        &mut self,
        collection: Collection,
        id: &str,
        record: &Value,
    ) -> Result<(), StorageError> {
        self.records
            .insert(Self::record_key(collection, id)?, record.clone());
        Ok(())
    }

    fn delete(&mut self, collection: Collection, id: &str) -> Result<bool, StorageError> {
        Ok(self.records.remove(&Self::record_key(collection, id)?).is_some())
    }

    fn list(&self, collection: Collection) -> Result<Vec<String>, StorageError> {
        Ok(self
            .records
            .keys()
            .filter(|(c, _)| *c == collection)
            .map(|(_, id)| id.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_separator_keys_share_a_record() {
        let mut store = MemoryStore::new();
        store.put(Collection::Fat, "a/b", &json!({"name": "a/b"})).unwrap();

        assert_eq!(
            store.get(Collection::Fat, "a_b").unwrap(),
            Some(json!({"name": "a/b"}))
        );
        assert_eq!(store.list(Collection::Fat).unwrap(), vec!["a_b"]);
        assert!(store.delete(Collection::Fat, "a\\b").unwrap());
        assert_eq!(store.count(Collection::Fat), 0);
    }

    #[test]
    fn test_rejects_empty_key() {
        let mut store = MemoryStore::new();
        assert!(store.put(Collection::Blocks, "", &json!({})).is_err());
    }
}
