//! In-memory snapshot store.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use super::{CacheSnapshot, SnapshotStore};
use crate::error::PersistError;

/// Keeps the latest snapshot in memory. Useful for embedding and tests;
/// can be told to fail writes.
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    latest: Mutex<Option<CacheSnapshot>>,
    writes: AtomicUsize,
    fail_writes: AtomicBool,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-loaded with a snapshot.
    pub fn with_snapshot(snapshot: CacheSnapshot) -> Self {
        let store = Self::default();
        *store.latest.lock().unwrap_or_else(PoisonError::into_inner) = Some(snapshot);
        store
    }

    /// Number of successful writes.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Most recently written snapshot.
    pub fn latest(&self) -> Option<CacheSnapshot> {
        self.latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Makes subsequent writes fail with an I/O error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn write(&self, snapshot: &CacheSnapshot) -> Result<(), PersistError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(PersistError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "snapshot writes disabled",
            )));
        }
        *self.latest.lock().unwrap_or_else(PoisonError::into_inner) = Some(snapshot.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn read(&self) -> Result<Option<CacheSnapshot>, PersistError> {
        Ok(self.latest())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
