//! File allocation table
//!
//! Per-file metadata records, their lifecycle, permission checks and listing.

pub mod entry;
pub mod listing;
pub mod operations;
pub mod permissions;
pub mod results;

pub use entry::{FatEntry, Permission};
pub use operations::FileTable;
pub use permissions::{can_read, can_write};
