//! Error handling
//!
//! Defines error types and their rendering for the shell.

pub mod handlers;
pub mod types;

pub use types::*;
