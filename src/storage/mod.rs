//! Durable record store
//!
//! Named JSON documents grouped into collections. The file table and the
//! block chain manager only see this trait, so any key-value substrate works.

pub mod filesystem;
pub mod memory;
pub mod validation;

pub use filesystem::JsonDirStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::StorageError;

/// Record collections kept by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Collection {
    /// File table entries, keyed by file name
    Fat,
    /// Content blocks, keyed by block id
    Blocks,
}

impl Collection {
    pub fn dir_name(&self) -> &'static str {
        match self {
            Collection::Fat => "fat",
            Collection::Blocks => "blocks",
        }
    }
}

/// Generic get/put/delete over named documents
pub trait RecordStore {
    /// Fetch a document, `None` when absent
    fn get(&self, collection: Collection, id: &str) -> Result<Option<Value>, StorageError>;

    /// Create or replace a document
    fn put(&mut self, collection: Collection, id: &str, record: &Value)
    -> Result<(), StorageError>;

    /// Remove a document; returns `false` if it was already gone
    fn delete(&mut self, collection: Collection, id: &str) -> Result<bool, StorageError>;

    /// Identifiers of every document in the collection, in backend order
    fn list(&self, collection: Collection) -> Result<Vec<String>, StorageError>;
}

/// Fetch and deserialize a typed record
pub fn load<T, S>(store: &S, collection: Collection, id: &str) -> Result<Option<T>, StorageError>
where
    T: DeserializeOwned,
    S: RecordStore + ?Sized,
{
    match store.get(collection, id)? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

/// Serialize and store a typed record
pub fn save<T, S>(store: &mut S, collection: Collection, id: &str, record: &T) -> Result<(), StorageError>
where
    T: Serialize,
    S: RecordStore + ?Sized,
{
    let value = serde_json::to_value(record)?;
    store.put(collection, id, &value)
}
