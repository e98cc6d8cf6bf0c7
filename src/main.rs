//! fatstore - Entry Point
//!
//! Opens the record store and runs the interactive shell on stdin/stdout.

use log::{error, info, warn};
use tokio::io::{BufReader, stdin, stdout};

use fatstore::shell::run_shell;
use fatstore::utils::logging::setup_logging;
use fatstore::{BlockChain, FileTable, JsonDirStore, StoreConfig};

#[tokio::main]
async fn main() {
    setup_logging();

    info!("Launching FAT simulator...");

    let config = match StoreConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return;
        }
    };

    let store = match JsonDirStore::open(config.storage_root_path(), config.max_retries) {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to open record store {}: {}", config.storage_root, e);
            return;
        }
    };

    let mut table = FileTable::new(store, BlockChain::new(config.block_size));
    info!("Block size: {} chars", table.chain().block_size());

    if config.reclaim_on_startup {
        if let Err(e) = table.reclaim_orphans() {
            warn!("Skipping orphan reclamation: {}", e);
        }
    }

    if let Err(e) = run_shell(&mut table, &config, BufReader::new(stdin()), stdout()).await {
        error!("Shell terminated: {}", e);
    }
}
