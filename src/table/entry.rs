//! File table entry
//!
//! The metadata record for one logical file.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Read/write grant for one non-owner user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Permission {
    pub read: bool,
    pub write: bool,
}

/// One FAT entry, keyed by file name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FatEntry {
    pub name: String,
    pub owner: String,
    pub head_block_id: String,
    /// Content length in characters
    pub total_size: usize,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub in_trash: bool,
    /// Never holds an entry for the owner
    #[serde(default)]
    pub permissions: BTreeMap<String, Permission>,
}

impl FatEntry {
    pub fn new(name: &str, owner: &str, head_block_id: String, total_size: usize) -> Self {
        Self {
            name: name.to_string(),
            owner: owner.to_string(),
            head_block_id,
            total_size,
            created_at: Utc::now(),
            modified_at: None,
            deleted_at: None,
            in_trash: false,
            permissions: BTreeMap::new(),
        }
    }

    pub fn is_owner(&self, user: &str) -> bool {
        self.owner == user
    }
}
