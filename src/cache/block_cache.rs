//! Block Hash Cache
//!
//! Process-wide cache of header PoW hashes keyed by header fingerprint.
//! All state sits behind one mutex; every public method takes it for its
//! whole duration, including the PoW computation inside `get_or_compute`,
//! so concurrent requests for the same header are serialized and the hash
//! is computed once.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, error, info, warn};

use crate::cache::{CacheStats, HashStore};
use crate::config::CacheConfig;
use crate::error::PersistError;
use crate::persist::{CacheSnapshot, SnapshotStore, SNAPSHOT_VERSION};
use crate::pow::{IdentitySource, PowDispatcher};
use crate::primitives::{BlockHeader, Fingerprint, Hash256, PowHash};

/// Growth since the last load, in entries, beyond which `maybe_persist`
/// writes a snapshot.
pub const PERSIST_THRESHOLD: usize = 100;

/// Everything the lock guards.
#[derive(Debug)]
struct CacheState {
    store: HashStore,
    /// Entry count at the last successful load. Only `restore` changes it.
    loaded_size: usize,
}

// == Block Hash Cache ==
/// Bounded LRU cache of PoW hashes with optional continuous validation.
///
/// In validate mode every `get_or_compute` recomputes the PoW hash, even on
/// a hit, and corrects the cache when the stored value differs. That mode
/// exists to detect corruption and gives up the whole performance benefit
/// of caching.
pub struct BlockHashCache {
    state: Mutex<CacheState>,
    /// Serializes snapshot writers so they land in snapshot order
    persist_lock: Mutex<()>,
    dispatcher: PowDispatcher,
    validate: bool,
    snapshots: Option<Arc<dyn SnapshotStore>>,
}

impl BlockHashCache {
    // == Constructor ==
    /// Creates an empty cache.
    pub fn new(config: CacheConfig, dispatcher: PowDispatcher) -> Self {
        if config.validate {
            info!("BlockCache: validation and auto correction enabled");
        }
        Self {
            state: Mutex::new(CacheState {
                store: HashStore::new(config.max_entries),
                loaded_size: 0,
            }),
            persist_lock: Mutex::new(()),
            dispatcher,
            validate: config.validate,
            snapshots: None,
        }
    }

    /// Attaches the durable store used by `maybe_persist` and `load_snapshot`.
    pub fn with_snapshot_store(mut self, store: Arc<dyn SnapshotStore>) -> Self {
        self.snapshots = Some(store);
        self
    }

    fn state(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // == Raw Map Operations ==
    /// Returns the cached PoW hash, refreshing its recency on a hit.
    pub fn lookup(&self, fingerprint: &Fingerprint) -> Option<PowHash> {
        self.state().store.lookup(fingerprint)
    }

    /// Inserts or overwrites an entry as most recently used, evicting the
    /// least recently used entry when over capacity.
    pub fn insert(&self, fingerprint: Fingerprint, value: PowHash) {
        self.state().store.insert(fingerprint, value);
    }

    /// Removes an entry if present.
    pub fn erase(&self, fingerprint: &Fingerprint) -> bool {
        self.state().store.erase(fingerprint)
    }

    /// Empties the cache and returns the number of entries dropped. The
    /// loaded-size baseline is left alone.
    pub fn clear(&self) -> usize {
        self.state().store.clear()
    }

    // == Get Or Compute ==
    /// Resolves a header's PoW hash through the cache.
    ///
    /// The PoW function runs when there is no cached value (or `use_cache`
    /// is false), and on every call in validate mode. Whenever it runs, its
    /// result is authoritative: a differing cached value is logged as
    /// corruption and replaced.
    pub fn get_or_compute(&self, header: &BlockHeader, use_cache: bool) -> PowHash {
        let fingerprint = header.fingerprint();
        let mut state = self.state();

        let cached = if use_cache {
            state.store.lookup(&fingerprint)
        } else {
            None
        };

        if let Some(value) = cached {
            if !self.validate {
                return value;
            }
        } else {
            debug!("BlockCache miss: headerHash: {}", fingerprint);
        }

        let computed = self.dispatcher.compute_hash(header);
        state.store.stats_mut().record_recomputation();

        if let Some(value) = cached.filter(|value| *value != computed) {
            error!(
                "BlockCache failure: headerHash: {}, from cache: {}, computed: {}, correcting",
                fingerprint, value, computed
            );
            state.store.stats_mut().record_correction();
        }

        state.store.erase(&fingerprint);
        state.store.insert(fingerprint, computed);
        computed
    }

    /// `get_or_compute(header, true)`.
    pub fn block_hash(&self, header: &BlockHeader) -> PowHash {
        self.get_or_compute(header, true)
    }

    // == Identity ==
    /// The hash the rest of the system uses to identify a header.
    ///
    /// | algorithm   | identity                                   |
    /// |-------------|--------------------------------------------|
    /// | `CurveHash` | fingerprint, no cache access               |
    /// | `MinotaurX` | PoW hash via [`Self::get_or_compute`]      |
    /// | invalid     | `Hash256::MAX`, no cache access            |
    pub fn identity_hash(&self, header: &BlockHeader) -> Hash256 {
        match header.algorithm() {
            Ok(algo) => match IdentitySource::for_algorithm(algo) {
                IdentitySource::Fingerprint => header.fingerprint(),
                IdentitySource::CachedPow => self.get_or_compute(header, true),
            },
            Err(invalid) => {
                warn!(
                    "IdentityHash: invalid PoW algorithm tag {}, returning high hash",
                    invalid.0
                );
                Hash256::MAX
            }
        }
    }

    /// Fingerprint accessor, never touches the cache.
    pub fn fingerprint(&self, header: &BlockHeader) -> Fingerprint {
        self.dispatcher.fingerprint(header)
    }

    // == Maintenance ==
    /// True when the cache has grown more than [`PERSIST_THRESHOLD`] entries
    /// past the size it had when last loaded.
    pub fn needs_persist(&self) -> bool {
        let state = self.state();
        state.store.len().saturating_sub(state.loaded_size) > PERSIST_THRESHOLD
    }

    /// Writes a snapshot if the cache has grown enough since the last load.
    ///
    /// Returns `Ok(true)` when a snapshot was written and `Ok(false)` when
    /// nothing was due or no store is attached. The state lock is held only
    /// while copying entries; the write happens after it is released.
    pub fn maybe_persist(&self) -> Result<bool, PersistError> {
        let Some(store) = self.snapshots.as_ref() else {
            return Ok(false);
        };
        let _writer = self
            .persist_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let snapshot = {
            let state = self.state();
            if state.store.len().saturating_sub(state.loaded_size) <= PERSIST_THRESHOLD {
                return Ok(false);
            }
            CacheSnapshot::new(state.store.entries_oldest_first())
        };

        Self::write_snapshot(store.as_ref(), &snapshot)?;
        Ok(true)
    }

    /// Writes a snapshot unconditionally, e.g. on shutdown.
    pub fn persist(&self) -> Result<(), PersistError> {
        let Some(store) = self.snapshots.as_ref() else {
            return Ok(());
        };
        let _writer = self
            .persist_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let snapshot = self.snapshot();
        Self::write_snapshot(store.as_ref(), &snapshot)
    }

    fn write_snapshot(
        store: &dyn SnapshotStore,
        snapshot: &CacheSnapshot,
    ) -> Result<(), PersistError> {
        match store.write(snapshot) {
            Ok(()) => {
                info!(
                    "BlockCache: Saving... ({} entries to {})",
                    snapshot.len(),
                    store.location()
                );
                Ok(())
            }
            Err(e) => {
                warn!("BlockCache: save to {} failed: {}", store.location(), e);
                Err(e)
            }
        }
    }

    /// Loads the attached store's snapshot, if any. Returns entries loaded.
    pub fn load_snapshot(&self) -> Result<usize, PersistError> {
        let Some(store) = self.snapshots.as_ref() else {
            return Ok(0);
        };
        match store.read()? {
            Some(snapshot) => self.restore(snapshot),
            None => {
                info!("BlockCache: no snapshot at {}, starting empty", store.location());
                Ok(0)
            }
        }
    }

    /// Replaces the contents with a snapshot and resets the loaded-size
    /// baseline to the number of entries kept.
    pub fn restore(&self, snapshot: CacheSnapshot) -> Result<usize, PersistError> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(PersistError::UnsupportedVersion {
                expected: SNAPSHOT_VERSION,
                found: snapshot.version,
            });
        }

        let mut state = self.state();
        state.store.clear();
        for entry in snapshot.entries {
            state.store.insert(entry.fingerprint, entry.pow_hash);
        }
        state.loaded_size = state.store.len();
        info!("BlockCache: loaded {} entries", state.loaded_size);
        Ok(state.loaded_size)
    }

    /// Point-in-time copy of the contents, oldest first.
    pub fn snapshot(&self) -> CacheSnapshot {
        CacheSnapshot::new(self.state().store.entries_oldest_first())
    }

    // == Diagnostics ==
    /// One-line summary.
    pub fn describe(&self) -> String {
        format!("BlockCache: elements: {}", self.len())
    }

    pub fn stats(&self) -> CacheStats {
        self.state().store.stats()
    }

    pub fn len(&self) -> usize {
        self.state().store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state().store.is_empty()
    }

    /// Entry count at the last load.
    pub fn loaded_size(&self) -> usize {
        self.state().loaded_size
    }

    pub fn max_entries(&self) -> usize {
        self.state().store.max_entries()
    }

    pub fn is_validating(&self) -> bool {
        self.validate
    }

    pub fn dispatcher(&self) -> &PowDispatcher {
        &self.dispatcher
    }
}

impl fmt::Debug for BlockHashCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockHashCache")
            .field("entries", &self.len())
            .field("validate", &self.validate)
            .field("persistent", &self.snapshots.is_some())
            .finish()
    }
}
