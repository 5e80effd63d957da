//! Cache Module
//!
//! PoW hash caching: the LRU store, the locked block hash cache with its
//! maintenance policy, and the owner that builds it once per process.

mod block_cache;
mod entry;
mod lru;
mod owner;
mod stats;
mod store;


// Re-export public types
pub use block_cache::{BlockHashCache, PERSIST_THRESHOLD};
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use owner::CacheOwner;
pub use stats::CacheStats;
pub use store::HashStore;
