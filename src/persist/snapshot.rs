//! Snapshot model and store interface.

use serde::{Deserialize, Serialize};

use crate::cache::CacheEntry;
use crate::error::PersistError;

/// Snapshot format version written by this build.
pub const SNAPSHOT_VERSION: u32 = 1;

// == Cache Snapshot ==
/// Consistent copy of the cache contents.
///
/// Entries are ordered least recently used first, so restoring them in
/// order reproduces the recency order at the time of the snapshot. The
/// loaded-size baseline is not stored; it is the entry count at load time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheSnapshot {
    /// Format version
    pub version: u32,
    /// Cached pairs, oldest first
    pub entries: Vec<CacheEntry>,
}

impl CacheSnapshot {
    /// Wraps entries with the current format version.
    pub fn new(entries: Vec<CacheEntry>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Snapshot Store ==
/// Durable destination for cache snapshots.
pub trait SnapshotStore: Send + Sync {
    /// Replaces the stored snapshot.
    fn write(&self, snapshot: &CacheSnapshot) -> Result<(), PersistError>;

    /// Reads the stored snapshot, or `None` if nothing was ever written.
    fn read(&self) -> Result<Option<CacheSnapshot>, PersistError>;

    /// Where snapshots go, for log lines.
    fn location(&self) -> String;
}
