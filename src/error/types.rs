//! Error types
//!
//! Defines the error taxonomy for the record store and the file table.

use std::fmt;
use std::io;

/// Record store errors
#[derive(Debug)]
pub enum StorageError {
    IoError(io::Error),
    Serialization(serde_json::Error),
    InvalidKey(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::IoError(e) => write!(f, "IO error: {}", e),
            StorageError::Serialization(e) => write!(f, "Malformed record: {}", e),
            StorageError::InvalidKey(k) => write!(f, "Invalid record key: {:?}", k),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::IoError(e) => Some(e),
            StorageError::Serialization(e) => Some(e),
            StorageError::InvalidKey(_) => None,
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(error: io::Error) -> Self {
        StorageError::IoError(error)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(error: serde_json::Error) -> Self {
        StorageError::Serialization(error)
    }
}

/// Action a permission check was guarding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
    Owner,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Access::Read => write!(f, "read"),
            Access::Write => write!(f, "write"),
            Access::Owner => write!(f, "owner"),
        }
    }
}

/// State an entry was already in when a transition was requested
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unchanged {
    AlreadyTrashed,
    NotTrashed,
    NoPermissions(String),
}

/// File table errors
#[derive(Debug)]
pub enum FatError {
    NotFound(String),
    AlreadyExists(String),
    InTrash(String),
    PermissionDenied {
        file: String,
        user: String,
        access: Access,
    },
    InvalidTarget(String),
    AlreadyInState {
        file: String,
        state: Unchanged,
    },
    StorageFailure(StorageError),
}

impl FatError {
    /// Benign errors leave the entry untouched and are reported as no-ops
    pub fn is_benign(&self) -> bool {
        matches!(self, FatError::AlreadyInState { .. })
    }
}

impl fmt::Display for FatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FatError::NotFound(name) => write!(f, "File not found: {}", name),
            FatError::AlreadyExists(name) => write!(f, "File already exists: {}", name),
            FatError::InTrash(name) => write!(f, "File is in trash: {}", name),
            FatError::PermissionDenied { file, user, access } => {
                write!(f, "Permission denied: {} lacks {} access to {}", user, access, file)
            }
            FatError::InvalidTarget(user) => {
                write!(f, "Invalid permission target: {} owns the file", user)
            }
            FatError::AlreadyInState { file, state } => match state {
                Unchanged::AlreadyTrashed => write!(f, "{} is already in trash", file),
                Unchanged::NotTrashed => write!(f, "{} is not in trash", file),
                Unchanged::NoPermissions(user) => {
                    write!(f, "{} has no permissions on {}", user, file)
                }
            },
            FatError::StorageFailure(e) => write!(f, "Storage failure: {}", e),
        }
    }
}

impl std::error::Error for FatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FatError::StorageFailure(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StorageError> for FatError {
    fn from(error: StorageError) -> Self {
        FatError::StorageFailure(error)
    }
}
