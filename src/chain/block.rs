//! Block record
//!
//! One fixed-size fragment of a file's content, linked to its successor.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted content fragment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub data: String,
    pub next: Option<String>,
    /// Authoritative end-of-chain marker, independent of `next`
    pub is_last: bool,
}

/// Allocate a fresh random block identifier
pub fn new_block_id() -> String {
    Uuid::new_v4().to_string()
}

/// Partition `content` into fragments of at most `block_size` characters.
///
/// Empty content yields a single empty fragment so every chain has a head.
pub fn split_fragments(content: &str, block_size: usize) -> Vec<String> {
    let chars: Vec<char> = content.chars().collect();
    let mut fragments: Vec<String> = chars
        .chunks(block_size.max(1))
        .map(|chunk| chunk.iter().collect())
        .collect();

    if fragments.is_empty() {
        fragments.push(String::new());
    }
    fragments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_exact_and_partial() {
        assert_eq!(split_fragments("abcdef", 3), vec!["abc", "def"]);
        assert_eq!(split_fragments("abcdefg", 3), vec!["abc", "def", "g"]);
    }

    #[test]
    fn test_split_empty_content() {
        assert_eq!(split_fragments("", 20), vec![String::new()]);
    }

    #[test]
    fn test_split_counts_characters_not_bytes() {
        let fragments = split_fragments("ñandú", 2);
        assert_eq!(fragments, vec!["ña", "nd", "ú"]);
    }

    #[test]
    fn test_block_ids_are_unique() {
        assert_ne!(new_block_id(), new_block_id());
    }
}
