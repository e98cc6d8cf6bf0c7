//! Record key validation
//!
//! Maps record identifiers onto safe file names.

use crate::error::StorageError;

const RECORD_EXTENSION: &str = ".json";

/// Reject keys no backend can store
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    if key.is_empty() || key.contains('\0') {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}

/// Replace path separators so a key can never escape its collection directory
pub fn sanitize_key(key: &str) -> String {
    key.replace(['/', '\\'], "_")
}

/// File name holding the record for `key`
pub fn record_file_name(key: &str) -> Result<String, StorageError> {
    validate_key(key)?;
    Ok(format!("{}{}", sanitize_key(key), RECORD_EXTENSION))
}

/// Record key for a directory entry, `None` for anything that is not a record
pub fn key_from_file_name(file_name: &str) -> Option<&str> {
    file_name
        .strip_suffix(RECORD_EXTENSION)
        .filter(|stem| !stem.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separators_are_flattened() {
        assert_eq!(record_file_name("a/b\\c").unwrap(), "a_b_c.json");
    }

    #[test]
    fn test_empty_and_nul_keys_rejected() {
        assert!(record_file_name("").is_err());
        assert!(record_file_name("bad\0key").is_err());
    }

    #[test]
    fn test_only_json_files_are_records() {
        assert_eq!(key_from_file_name("notes.json"), Some("notes"));
        assert_eq!(key_from_file_name("notes.json.tmp"), None);
        assert_eq!(key_from_file_name(".json"), None);
    }
}
