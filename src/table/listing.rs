//! Listing service
//!
//! Read-only scans over every file table entry. Order follows the record
//! store's enumeration order.

use log::warn;

use crate::error::FatError;
use crate::storage::{Collection, RecordStore, load};
use crate::table::entry::FatEntry;
use crate::table::operations::FileTable;

impl<S: RecordStore> FileTable<S> {
    /// Every entry, failing on the first unreadable record
    pub fn entries(&self) -> Result<Vec<FatEntry>, FatError> {
        let mut entries = Vec::new();
        for key in self.store.list(Collection::Fat)? {
            if let Some(entry) = load::<FatEntry, S>(&self.store, Collection::Fat, &key)? {
                entries.push(entry);
            }
        }
        Ok(entries)
    }

    fn names_where(&self, in_trash: bool) -> Result<Vec<String>, FatError> {
        let mut names = Vec::new();

        for key in self.store.list(Collection::Fat)? {
            match load::<FatEntry, S>(&self.store, Collection::Fat, &key) {
                Ok(Some(entry)) if entry.in_trash == in_trash => names.push(entry.name),
                Ok(_) => {}
                Err(e) => warn!("Skipping unreadable entry {}: {}", key, e),
            }
        }

        Ok(names)
    }

    /// Names of all files not in the trash
    pub fn list_active(&self) -> Result<Vec<String>, FatError> {
        self.names_where(false)
    }

    /// Names of all trashed files
    pub fn list_trashed(&self) -> Result<Vec<String>, FatError> {
        self.names_where(true)
    }
}
