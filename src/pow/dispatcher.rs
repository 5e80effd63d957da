//! PoW Dispatcher
//!
//! Maps a header's algorithm tag onto exactly one PoW function.

use std::fmt;
use std::sync::Arc;

use tracing::warn;

use super::dev::DomainHasher;
use crate::primitives::{BlockHeader, Fingerprint, Hash256, PowAlgorithm, PowHash};

// == PoW Function ==
/// A pure proof-of-work hash over the encoded header bytes.
pub trait PowFunction: Send + Sync {
    /// Hashes the encoded header.
    fn hash(&self, header_bytes: &[u8]) -> PowHash;
}

impl<F> PowFunction for F
where
    F: Fn(&[u8]) -> PowHash + Send + Sync,
{
    fn hash(&self, header_bytes: &[u8]) -> PowHash {
        self(header_bytes)
    }
}

// == Algorithm Set ==
/// One PoW function per [`PowAlgorithm`] variant.
#[derive(Clone)]
pub struct AlgorithmSet {
    /// Used for `PowAlgorithm::CurveHash` headers
    pub curvehash: Arc<dyn PowFunction>,
    /// Used for `PowAlgorithm::MinotaurX` headers
    pub minotaurx: Arc<dyn PowFunction>,
}

impl AlgorithmSet {
    /// Builds a set from explicit functions.
    pub fn new(curvehash: Arc<dyn PowFunction>, minotaurx: Arc<dyn PowFunction>) -> Self {
        Self {
            curvehash,
            minotaurx,
        }
    }

    /// Domain-separated BLAKE3 stand-ins.
    ///
    /// These let the daemon and tests run without native PoW libraries.
    /// They are not the consensus algorithms.
    pub fn development() -> Self {
        Self::new(
            Arc::new(DomainHasher::new(b"powcache/curvehash-dev")),
            Arc::new(DomainHasher::new(b"powcache/minotaurx-dev")),
        )
    }

    fn function(&self, algo: PowAlgorithm) -> &dyn PowFunction {
        match algo {
            PowAlgorithm::CurveHash => self.curvehash.as_ref(),
            PowAlgorithm::MinotaurX => self.minotaurx.as_ref(),
        }
    }
}

impl fmt::Debug for AlgorithmSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlgorithmSet").finish_non_exhaustive()
    }
}

// == Identity Source ==
/// Which accessor yields a header's canonical identity hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentitySource {
    /// Identity is [`BlockHeader::fingerprint`]; no PoW hash or cache access.
    Fingerprint,
    /// Identity is the PoW hash, resolved through the block hash cache.
    CachedPow,
}

impl IdentitySource {
    /// Identity semantics for an algorithm.
    pub const fn for_algorithm(algo: PowAlgorithm) -> Self {
        match algo {
            PowAlgorithm::CurveHash => Self::Fingerprint,
            PowAlgorithm::MinotaurX => Self::CachedPow,
        }
    }
}

// == PoW Dispatcher ==
/// Selects and runs the PoW function for a header.
///
/// Never touches the block hash cache; caching is layered above it.
#[derive(Debug, Clone)]
pub struct PowDispatcher {
    algorithms: AlgorithmSet,
}

impl PowDispatcher {
    /// Creates a dispatcher over the given algorithm set.
    pub fn new(algorithms: AlgorithmSet) -> Self {
        Self { algorithms }
    }

    /// Computes the PoW hash for a header.
    ///
    /// An unknown algorithm tag is not an error: it is logged and the
    /// maximum hash is returned, which fails every difficulty check
    /// downstream.
    pub fn compute_hash(&self, header: &BlockHeader) -> PowHash {
        match header.algorithm() {
            Ok(algo) => self.algorithms.function(algo).hash(&header.to_bytes()),
            Err(invalid) => {
                warn!(
                    tag = invalid.0,
                    "ComputeHash: unknown PoW algorithm, returning high hash"
                );
                Hash256::MAX
            }
        }
    }

    /// The cheap fingerprint accessor. Identical to
    /// [`BlockHeader::fingerprint`] for every tag.
    pub fn fingerprint(&self, header: &BlockHeader) -> Fingerprint {
        header.fingerprint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn header(algorithm: u8) -> BlockHeader {
        BlockHeader {
            version: 1,
            prev_block: Hash256::ZERO,
            merkle_root: Hash256([3u8; 32]),
            time: 1_650_000_000,
            bits: 0x1d00_ffff,
            nonce: 77,
            algorithm,
        }
    }

    #[test]
    fn test_dispatch_invokes_matching_function_only() {
        let curve_calls = Arc::new(AtomicUsize::new(0));
        let mino_calls = Arc::new(AtomicUsize::new(0));
        let (c, m) = (curve_calls.clone(), mino_calls.clone());
        let set = AlgorithmSet::new(
            Arc::new(move |_: &[u8]| {
                c.fetch_add(1, Ordering::SeqCst);
                Hash256([0xc0; 32])
            }),
            Arc::new(move |_: &[u8]| {
                m.fetch_add(1, Ordering::SeqCst);
                Hash256([0x70; 32])
            }),
        );
        let dispatcher = PowDispatcher::new(set);

        assert_eq!(dispatcher.compute_hash(&header(0)), Hash256([0xc0; 32]));
        assert_eq!(dispatcher.compute_hash(&header(1)), Hash256([0x70; 32]));
        assert_eq!(curve_calls.load(Ordering::SeqCst), 1);
        assert_eq!(mino_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_invalid_tag_returns_sentinel_without_calling_functions() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (a, b) = (calls.clone(), calls.clone());
        let set = AlgorithmSet::new(
            Arc::new(move |_: &[u8]| {
                a.fetch_add(1, Ordering::SeqCst);
                Hash256::ZERO
            }),
            Arc::new(move |_: &[u8]| {
                b.fetch_add(1, Ordering::SeqCst);
                Hash256::ZERO
            }),
        );
        let dispatcher = PowDispatcher::new(set);

        for tag in [2u8, 9, 200, u8::MAX] {
            assert_eq!(dispatcher.compute_hash(&header(tag)), Hash256::MAX);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_identity_source_per_algorithm() {
        assert_eq!(
            IdentitySource::for_algorithm(PowAlgorithm::CurveHash),
            IdentitySource::Fingerprint
        );
        assert_eq!(
            IdentitySource::for_algorithm(PowAlgorithm::MinotaurX),
            IdentitySource::CachedPow
        );
    }

    #[test]
    fn test_fingerprint_accessor_ignores_pow() {
        let dispatcher = PowDispatcher::new(AlgorithmSet::development());
        let h = header(1);
        assert_eq!(dispatcher.fingerprint(&h), h.fingerprint());
        assert_ne!(dispatcher.fingerprint(&h), dispatcher.compute_hash(&h));
    }
}
