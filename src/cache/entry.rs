//! Cache Entry Module
//!
//! The (fingerprint, PoW hash) pair stored by the cache and written to
//! snapshots.

use serde::{Deserialize, Serialize};

use crate::primitives::{Fingerprint, PowHash};

// == Cache Entry ==
/// A single cached PoW result keyed by header fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Header fingerprint (cache key)
    pub fingerprint: Fingerprint,
    /// Verified PoW hash for that header
    pub pow_hash: PowHash,
}

impl CacheEntry {
    /// Creates a new entry.
    pub const fn new(fingerprint: Fingerprint, pow_hash: PowHash) -> Self {
        Self {
            fingerprint,
            pow_hash,
        }
    }
}

impl From<(Fingerprint, PowHash)> for CacheEntry {
    fn from((fingerprint, pow_hash): (Fingerprint, PowHash)) -> Self {
        Self::new(fingerprint, pow_hash)
    }
}
