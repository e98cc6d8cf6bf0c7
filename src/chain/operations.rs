//! Block chain operations
//!
//! Handles chain creation, traversal, teardown and the orphan sweep.

use log::{debug, info, warn};
use std::collections::HashSet;

use crate::chain::block::{Block, new_block_id, split_fragments};
use crate::chain::results::{ChainDeleteResult, ChainRead};
use crate::error::StorageError;
use crate::storage::{Collection, RecordStore, load, save};

/// Allocates and walks chains of fixed-size blocks
#[derive(Debug, Clone, Copy)]
pub struct BlockChain {
    block_size: usize,
}

impl BlockChain {
    pub fn new(block_size: usize) -> Self {
        Self {
            block_size: block_size.max(1),
        }
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Persists `content` as a new chain and returns the head block id
    pub fn create_chain<S>(&self, store: &mut S, content: &str) -> Result<String, StorageError>
    where
        S: RecordStore + ?Sized,
    {
        let fragments = split_fragments(content, self.block_size);
        let ids: Vec<String> = fragments.iter().map(|_| new_block_id()).collect();

        for (i, data) in fragments.into_iter().enumerate() {
            let block = Block {
                data,
                next: ids.get(i + 1).cloned(),
                is_last: i + 1 == ids.len(),
            };
            save(store, Collection::Blocks, &ids[i], &block)?;
        }

        debug!("Created chain {} with {} block(s)", ids[0], ids.len());
        Ok(ids[0].clone())
    }

    /// Walks the chain from `head_id`, concatenating block data.
    ///
    /// Stops at the first terminal block, a missing block, or a block already
    /// visited in this walk.
    pub fn read_chain<S>(&self, store: &S, head_id: &str) -> Result<ChainRead, StorageError>
    where
        S: RecordStore + ?Sized,
    {
        let mut result = ChainRead::default();
        let mut visited = HashSet::new();
        let mut current = Some(head_id.to_string());

        while let Some(id) = current.take() {
            if !visited.insert(id.clone()) {
                warn!("Chain {} revisits block {}; stopping walk", head_id, id);
                break;
            }

            let Some(block) = load::<Block, S>(store, Collection::Blocks, &id)? else {
                if !result.block_ids.is_empty() {
                    warn!("Chain {} references missing block {}", head_id, id);
                }
                break;
            };

            result.content.push_str(&block.data);
            result.block_ids.push(id);

            if block.is_last {
                result.complete = true;
                break;
            }
            current = block.next;
        }

        if !result.complete && !result.block_ids.is_empty() {
            warn!(
                "Chain {} ended after {} block(s) without a terminal block",
                head_id,
                result.block_ids.len()
            );
        }

        Ok(result)
    }

    /// Removes every block reachable from `head_id`.
    ///
    /// Blocks already gone are counted, not treated as errors.
    pub fn delete_chain<S>(
        &self,
        store: &mut S,
        head_id: &str,
    ) -> Result<ChainDeleteResult, StorageError>
    where
        S: RecordStore + ?Sized,
    {
        let walk = self.read_chain(&*store, head_id)?;
        let mut result = ChainDeleteResult::default();

        for id in &walk.block_ids {
            if store.delete(Collection::Blocks, id)? {
                result.removed += 1;
            } else {
                debug!("Block {} already missing during teardown", id);
                result.already_missing += 1;
            }
        }

        debug!(
            "Deleted chain {} ({} removed, {} missing)",
            head_id, result.removed, result.already_missing
        );
        Ok(result)
    }

    /// Deletes every block record not in `reachable`; returns how many were removed
    pub fn reclaim_unreachable<S>(
        &self,
        store: &mut S,
        reachable: &HashSet<String>,
    ) -> Result<usize, StorageError>
    where
        S: RecordStore + ?Sized,
    {
        let mut reclaimed = 0;

        for id in store.list(Collection::Blocks)? {
            if reachable.contains(&id) {
                continue;
            }
            if store.delete(Collection::Blocks, &id)? {
                reclaimed += 1;
            }
        }

        if reclaimed > 0 {
            info!("Reclaimed {} orphaned block(s)", reclaimed);
        }
        Ok(reclaimed)
    }
}
