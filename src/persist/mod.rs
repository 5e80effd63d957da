//! Persistence Module
//!
//! Point-in-time snapshots of the block hash cache and the stores that
//! hold them.

mod flat_file;
mod memory;
mod snapshot;

pub use flat_file::{FlatFileStore, DEFAULT_SECTION, DEFAULT_SNAPSHOT_FILE};
pub use memory::MemorySnapshotStore;
pub use snapshot::{CacheSnapshot, SnapshotStore, SNAPSHOT_VERSION};
