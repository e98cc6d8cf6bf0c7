//! Block chain management
//!
//! Splits content into fixed-size blocks, links them into a chain,
//! reassembles content by walking a chain and reclaims chains.

pub mod block;
pub mod operations;
pub mod results;

pub use block::Block;
pub use operations::BlockChain;
pub use results::{ChainDeleteResult, ChainRead};
