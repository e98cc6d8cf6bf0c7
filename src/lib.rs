//! fatstore
//!
//! A simulated file-allocation-table storage layer over a JSON record store.

pub mod chain;
pub mod config;
pub mod error;
pub mod shell;
pub mod storage;
pub mod table;
pub mod utils;

pub use chain::BlockChain;
pub use config::StoreConfig;
pub use error::{FatError, StorageError};
pub use storage::{JsonDirStore, MemoryStore, RecordStore};
pub use table::FileTable;
