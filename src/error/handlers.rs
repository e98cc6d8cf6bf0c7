//! Error handlers
//!
//! Converts file table errors into the text shown by the shell.

use crate::error::types::{Access, FatError, Unchanged};
use log::error;

/// Log an unrecoverable storage error
pub fn handle_error(err: &FatError) {
    if let FatError::StorageFailure(e) = err {
        error!("Storage failure: {}", e);
    }
}

/// Convert an error to the message rendered by the shell
pub fn error_message(err: &FatError) -> String {
    match err {
        FatError::NotFound(_) => "No such file.".into(),
        FatError::AlreadyExists(_) => "A file with that name already exists.".into(),
        FatError::InTrash(_) => "That file is in the trash. Restore it first.".into(),
        FatError::PermissionDenied { access, .. } => match access {
            Access::Read => "You do not have READ permission on this file.".into(),
            Access::Write => "You do not have WRITE permission on this file.".into(),
            Access::Owner => "Only the OWNER can do that.".into(),
        },
        FatError::InvalidTarget(_) => "The OWNER already holds every permission.".into(),
        FatError::AlreadyInState { state, .. } => match state {
            Unchanged::AlreadyTrashed => "Already in the trash.".into(),
            Unchanged::NotTrashed => "The file is not in the trash.".into(),
            Unchanged::NoPermissions(_) => "That user has no permissions assigned.".into(),
        },
        FatError::StorageFailure(e) => format!("Storage failure: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;

    #[test]
    fn test_denial_messages_name_the_missing_access() {
        let err = FatError::PermissionDenied {
            file: "notes".into(),
            user: "bob".into(),
            access: Access::Write,
        };
        assert!(error_message(&err).contains("WRITE"));
    }

    #[test]
    fn test_storage_failure_is_not_benign() {
        let err = FatError::from(StorageError::InvalidKey(String::new()));
        assert!(!err.is_benign());
        assert!(error_message(&err).starts_with("Storage failure"));
    }

    #[test]
    fn test_already_in_state_is_benign() {
        let err = FatError::AlreadyInState {
            file: "notes".into(),
            state: Unchanged::AlreadyTrashed,
        };
        assert!(err.is_benign());
    }
}
