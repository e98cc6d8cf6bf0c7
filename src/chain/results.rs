//! Block chain result types
//!
//! Defines result structures returned by chain operations.

/// Result of walking a chain from its head
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainRead {
    pub content: String,
    /// Block identifiers in traversal order
    pub block_ids: Vec<String>,
    /// Whether the walk ended on a terminal block
    pub complete: bool,
}

/// Result of tearing down a chain
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainDeleteResult {
    pub removed: usize,
    pub already_missing: usize,
}
