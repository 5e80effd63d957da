//! Development PoW stand-ins.

use crate::primitives::{Hash256, PowHash, HASH256_LEN};

use super::PowFunction;

/// BLAKE3 over `domain || header_bytes`.
#[derive(Debug, Clone)]
pub struct DomainHasher {
    domain: &'static [u8],
}

impl DomainHasher {
    /// Creates a hasher bound to a domain separator.
    pub const fn new(domain: &'static [u8]) -> Self {
        Self { domain }
    }
}

impl PowFunction for DomainHasher {
    fn hash(&self, header_bytes: &[u8]) -> PowHash {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain);
        hasher.update(header_bytes);
        let out = hasher.finalize();
        let mut arr = [0u8; HASH256_LEN];
        arr.copy_from_slice(out.as_bytes());
        Hash256(arr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domains_separate_outputs() {
        let a = DomainHasher::new(b"a");
        let b = DomainHasher::new(b"b");
        assert_eq!(a.hash(b"header"), a.hash(b"header"));
        assert_ne!(a.hash(b"header"), b.hash(b"header"));
    }
}
