//! File permissions
//!
//! Pure access decisions over a file table entry. The owner always holds
//! full rights; everyone else gets what the permission map says.

use crate::table::entry::FatEntry;

/// Check if `user` may read the entry's content
pub fn can_read(entry: &FatEntry, user: &str) -> bool {
    entry.is_owner(user) || entry.permissions.get(user).is_some_and(|p| p.read)
}

/// Check if `user` may write the entry's content or trash it
pub fn can_write(entry: &FatEntry, user: &str) -> bool {
    entry.is_owner(user) || entry.permissions.get(user).is_some_and(|p| p.write)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::entry::Permission;

    fn entry() -> FatEntry {
        FatEntry::new("notes", "alice", "head".into(), 0)
    }

    #[test]
    fn test_owner_has_full_rights() {
        let mut entry = entry();
        assert!(can_read(&entry, "alice"));
        assert!(can_write(&entry, "alice"));

        // A stray map entry for the owner cannot take rights away
        entry
            .permissions
            .insert("alice".into(), Permission { read: false, write: false });
        assert!(can_read(&entry, "alice"));
        assert!(can_write(&entry, "alice"));
    }

    #[test]
    fn test_flags_are_independent() {
        let mut entry = entry();
        entry
            .permissions
            .insert("bob".into(), Permission { read: true, write: false });
        entry
            .permissions
            .insert("carol".into(), Permission { read: false, write: true });

        assert!(can_read(&entry, "bob"));
        assert!(!can_write(&entry, "bob"));
        assert!(!can_read(&entry, "carol"));
        assert!(can_write(&entry, "carol"));
    }

    #[test]
    fn test_absent_user_is_denied() {
        let entry = entry();
        assert!(!can_read(&entry, "mallory"));
        assert!(!can_write(&entry, "mallory"));
    }
}
