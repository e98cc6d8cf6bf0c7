//! File table result types
//!
//! Defines result structures returned by file table operations.

use crate::table::entry::{FatEntry, Permission};

/// Result of a file creation
#[derive(Debug, Clone)]
pub struct CreateResult {
    pub name: String,
    pub head_block_id: String,
    pub total_size: usize,
}

/// Result of opening a file: metadata plus reassembled content
#[derive(Debug, Clone)]
pub struct OpenResult {
    pub entry: FatEntry,
    pub content: String,
}

/// Result of a content modification
#[derive(Debug, Clone)]
pub struct ModifyResult {
    pub name: String,
    pub previous_content: String,
    pub head_block_id: String,
    pub total_size: usize,
}

/// Result of moving a file to the trash
#[derive(Debug, Clone)]
pub struct TrashResult {
    pub name: String,
}

/// Result of restoring a file from the trash
#[derive(Debug, Clone)]
pub struct RestoreResult {
    pub name: String,
}

/// Result of a permission grant
#[derive(Debug, Clone)]
pub struct GrantResult {
    pub name: String,
    pub target_user: String,
    pub permission: Permission,
}

/// Result of a permission revocation
#[derive(Debug, Clone)]
pub struct RevokeResult {
    pub name: String,
    pub target_user: String,
}
