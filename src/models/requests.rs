//! Request DTOs for the diagnostics API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::primitives::BlockHeader;

/// Request body for POST /hash
///
/// # Fields
/// - `header`: The header to resolve
/// - `use_cache`: Consult the cache before computing (default true)
#[derive(Debug, Clone, Deserialize)]
pub struct HashRequest {
    /// Header fields
    pub header: BlockHeader,
    /// Read the cache before computing
    #[serde(default = "default_use_cache")]
    pub use_cache: bool,
}

fn default_use_cache() -> bool {
    true
}
