//! Cache Owner
//!
//! Holds the single block hash cache for a process. The cache is built on
//! first access from configuration read at that moment; later configuration
//! changes have no effect until restart.

use std::fmt;
use std::sync::{Arc, OnceLock};

use tracing::info;

use crate::cache::BlockHashCache;
use crate::config::CacheConfig;
use crate::persist::SnapshotStore;
use crate::pow::{AlgorithmSet, PowDispatcher};

type ConfigLoader = Box<dyn Fn() -> CacheConfig + Send + Sync>;

// == Cache Owner ==
/// Startup-context object owning the process's block hash cache.
///
/// Pass it (or the `Arc` returned by [`CacheOwner::instance`]) to every
/// consumer instead of reaching for a global.
pub struct CacheOwner {
    load_config: ConfigLoader,
    algorithms: AlgorithmSet,
    snapshots: Option<Arc<dyn SnapshotStore>>,
    cache: OnceLock<Arc<BlockHashCache>>,
}

impl CacheOwner {
    /// Owner that reads [`CacheConfig::from_env`] on first access.
    pub fn from_env(algorithms: AlgorithmSet) -> Self {
        Self::with_loader(algorithms, CacheConfig::from_env)
    }

    /// Owner with a custom configuration source.
    pub fn with_loader<F>(algorithms: AlgorithmSet, load_config: F) -> Self
    where
        F: Fn() -> CacheConfig + Send + Sync + 'static,
    {
        Self {
            load_config: Box::new(load_config),
            algorithms,
            snapshots: None,
            cache: OnceLock::new(),
        }
    }

    /// Attaches the snapshot store handed to the cache when it is built.
    pub fn with_snapshot_store(mut self, store: Arc<dyn SnapshotStore>) -> Self {
        self.snapshots = Some(store);
        self
    }

    // == Instance ==
    /// The process's cache, built on the first call.
    pub fn instance(&self) -> Arc<BlockHashCache> {
        self.cache
            .get_or_init(|| {
                let config = (self.load_config)();
                info!(
                    "BlockCache: creating cache, max_entries={}, validate={}",
                    config.max_entries, config.validate
                );
                let cache =
                    BlockHashCache::new(config, PowDispatcher::new(self.algorithms.clone()));
                let cache = match &self.snapshots {
                    Some(store) => cache.with_snapshot_store(store.clone()),
                    None => cache,
                };
                Arc::new(cache)
            })
            .clone()
    }
}

impl fmt::Debug for CacheOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheOwner")
            .field("cache", &self.cache.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_instance_is_built_once() {
        let reads = Arc::new(AtomicUsize::new(0));
        let counter = reads.clone();
        let owner = CacheOwner::with_loader(AlgorithmSet::development(), move || {
            counter.fetch_add(1, Ordering::SeqCst);
            CacheConfig::new(64, true)
        });

        assert_eq!(reads.load(Ordering::SeqCst), 0);

        let first = owner.instance();
        let second = owner.instance();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(reads.load(Ordering::SeqCst), 1);
        assert_eq!(first.max_entries(), 64);
        assert!(first.is_validating());
    }

    #[test]
    fn test_config_read_at_first_access() {
        let size = Arc::new(AtomicUsize::new(10));
        let source = size.clone();
        let owner = CacheOwner::with_loader(AlgorithmSet::development(), move || {
            CacheConfig::new(source.load(Ordering::SeqCst), false)
        });

        size.store(20, Ordering::SeqCst);
        assert_eq!(owner.instance().max_entries(), 20);

        size.store(30, Ordering::SeqCst);
        assert_eq!(owner.instance().max_entries(), 20);
    }

    #[test]
    fn test_zero_size_uses_default() {
        let owner = CacheOwner::with_loader(AlgorithmSet::development(), || {
            CacheConfig::new(0, false)
        });
        assert_eq!(
            owner.instance().max_entries(),
            crate::config::DEFAULT_BLOCK_CACHE_SIZE
        );
    }
}
