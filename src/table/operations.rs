//! File table operations
//!
//! Lifecycle of FAT entries: create, open, modify, trash, restore and
//! permission management. Every content access and permission change is
//! gated through the permission evaluator.

use chrono::Utc;
use log::{info, warn};
use std::collections::HashSet;

use crate::chain::BlockChain;
use crate::error::{Access, FatError, Unchanged};
use crate::storage::{Collection, RecordStore, load, save};
use crate::table::entry::{FatEntry, Permission};
use crate::table::permissions::{can_read, can_write};
use crate::table::results::{
    CreateResult, GrantResult, ModifyResult, OpenResult, RestoreResult, RevokeResult, TrashResult,
};

/// File allocation table over a record store
pub struct FileTable<S: RecordStore> {
    pub(crate) store: S,
    pub(crate) chain: BlockChain,
}

impl<S: RecordStore> FileTable<S> {
    pub fn new(store: S, chain: BlockChain) -> Self {
        Self { store, chain }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn chain(&self) -> &BlockChain {
        &self.chain
    }

    fn load_entry(&self, name: &str) -> Result<FatEntry, FatError> {
        load(&self.store, Collection::Fat, name)?.ok_or_else(|| FatError::NotFound(name.to_string()))
    }

    fn save_entry(&mut self, entry: &FatEntry) -> Result<(), FatError> {
        save(&mut self.store, Collection::Fat, &entry.name, entry)?;
        Ok(())
    }

    fn deny(entry: &FatEntry, user: &str, access: Access) -> FatError {
        warn!("Denied {} access on {} to {}", access, entry.name, user);
        FatError::PermissionDenied {
            file: entry.name.clone(),
            user: user.to_string(),
            access,
        }
    }

    /// Stored metadata for `name`, without permission checks or content
    pub fn stat(&self, name: &str) -> Result<FatEntry, FatError> {
        self.load_entry(name)
    }

    /// Creates a file owned by `owner` holding `content`
    pub fn create(&mut self, name: &str, content: &str, owner: &str) -> Result<CreateResult, FatError> {
        if self.store.get(Collection::Fat, name)?.is_some() {
            return Err(FatError::AlreadyExists(name.to_string()));
        }

        let head_block_id = self.chain.create_chain(&mut self.store, content)?;
        let total_size = content.chars().count();
        let entry = FatEntry::new(name, owner, head_block_id.clone(), total_size);
        self.save_entry(&entry)?;

        info!("Created {} for {} ({} chars)", name, owner, total_size);

        Ok(CreateResult {
            name: name.to_string(),
            head_block_id,
            total_size,
        })
    }

    /// Returns metadata and content of `name` if `user` may read it
    pub fn open(&self, name: &str, user: &str) -> Result<OpenResult, FatError> {
        let entry = self.load_entry(name)?;

        if entry.in_trash {
            return Err(FatError::InTrash(name.to_string()));
        }
        if !can_read(&entry, user) {
            return Err(Self::deny(&entry, user, Access::Read));
        }

        let content = self.chain.read_chain(&self.store, &entry.head_block_id)?.content;
        info!("{} opened {}", user, name);

        Ok(OpenResult { entry, content })
    }

    /// Replaces the content of `name` with `new_content`.
    ///
    /// The entry is repointed at the new chain and persisted before the old
    /// chain is torn down, so a failure in between leaks blocks but never
    /// leaves the entry dangling.
    pub fn modify(&mut self, name: &str, user: &str, new_content: &str) -> Result<ModifyResult, FatError> {
        let mut entry = self.load_entry(name)?;

        if entry.in_trash {
            return Err(FatError::InTrash(name.to_string()));
        }
        if !can_write(&entry, user) {
            return Err(Self::deny(&entry, user, Access::Write));
        }

        let old_head = entry.head_block_id.clone();
        let previous_content = self.chain.read_chain(&self.store, &old_head)?.content;

        let new_head = self.chain.create_chain(&mut self.store, new_content)?;
        entry.head_block_id = new_head.clone();
        entry.total_size = new_content.chars().count();
        entry.modified_at = Some(Utc::now());
        self.save_entry(&entry)?;

        // The entry is committed; a failed teardown only leaks the old chain
        if let Err(e) = self.chain.delete_chain(&mut self.store, &old_head) {
            warn!("Old chain {} of {} left for reclamation: {}", old_head, name, e);
        }

        info!("{} modified {} ({} chars)", user, name, entry.total_size);

        Ok(ModifyResult {
            name: name.to_string(),
            previous_content,
            head_block_id: new_head,
            total_size: entry.total_size,
        })
    }

    /// Soft-deletes `name`; its blocks stay on storage
    pub fn trash(&mut self, name: &str, user: &str) -> Result<TrashResult, FatError> {
        let mut entry = self.load_entry(name)?;

        if !can_write(&entry, user) {
            return Err(Self::deny(&entry, user, Access::Write));
        }
        if entry.in_trash {
            return Err(FatError::AlreadyInState {
                file: name.to_string(),
                state: Unchanged::AlreadyTrashed,
            });
        }

        entry.in_trash = true;
        entry.deleted_at = Some(Utc::now());
        self.save_entry(&entry)?;

        info!("{} moved {} to trash", user, name);
        Ok(TrashResult { name: name.to_string() })
    }

    /// Brings `name` back from the trash; owner only
    pub fn restore(&mut self, name: &str, user: &str) -> Result<RestoreResult, FatError> {
        let mut entry = self.load_entry(name)?;

        if !entry.is_owner(user) {
            return Err(Self::deny(&entry, user, Access::Owner));
        }
        if !entry.in_trash {
            return Err(FatError::AlreadyInState {
                file: name.to_string(),
                state: Unchanged::NotTrashed,
            });
        }

        entry.in_trash = false;
        self.save_entry(&entry)?;

        info!("{} restored {}", user, name);
        Ok(RestoreResult { name: name.to_string() })
    }

    fn load_for_owner(&self, name: &str, acting_owner: &str, target_user: &str) -> Result<FatEntry, FatError> {
        let entry = self.load_entry(name)?;

        if !entry.is_owner(acting_owner) {
            return Err(Self::deny(&entry, acting_owner, Access::Owner));
        }
        if entry.is_owner(target_user) {
            return Err(FatError::InvalidTarget(target_user.to_string()));
        }

        Ok(entry)
    }

    /// Sets `target_user`'s read/write flags on `name`
    pub fn grant(
        &mut self,
        name: &str,
        acting_owner: &str,
        target_user: &str,
        read: bool,
        write: bool,
    ) -> Result<GrantResult, FatError> {
        let mut entry = self.load_for_owner(name, acting_owner, target_user)?;

        let permission = Permission { read, write };
        entry.permissions.insert(target_user.to_string(), permission);
        entry.modified_at = Some(Utc::now());
        self.save_entry(&entry)?;

        info!(
            "{} granted {} on {} (read: {}, write: {})",
            acting_owner, target_user, name, read, write
        );

        Ok(GrantResult {
            name: name.to_string(),
            target_user: target_user.to_string(),
            permission,
        })
    }

    /// Removes every permission `target_user` holds on `name`
    pub fn revoke(&mut self, name: &str, acting_owner: &str, target_user: &str) -> Result<RevokeResult, FatError> {
        let mut entry = self.load_for_owner(name, acting_owner, target_user)?;

        if entry.permissions.remove(target_user).is_none() {
            return Err(FatError::AlreadyInState {
                file: name.to_string(),
                state: Unchanged::NoPermissions(target_user.to_string()),
            });
        }
        entry.modified_at = Some(Utc::now());
        self.save_entry(&entry)?;

        info!("{} revoked {} on {}", acting_owner, target_user, name);

        Ok(RevokeResult {
            name: name.to_string(),
            target_user: target_user.to_string(),
        })
    }

    /// Deletes blocks no entry (active or trashed) can reach.
    ///
    /// Aborts without deleting anything if any entry cannot be read, since
    /// its blocks would otherwise look orphaned.
    pub fn reclaim_orphans(&mut self) -> Result<usize, FatError> {
        let mut reachable = HashSet::new();

        for entry in self.entries()? {
            let walk = self.chain.read_chain(&self.store, &entry.head_block_id)?;
            reachable.extend(walk.block_ids);
        }

        Ok(self.chain.reclaim_unreachable(&mut self.store, &reachable)?)
    }
}
