//! Block header fields and the fingerprint function.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::{Fingerprint, Hash256, InvalidAlgorithm, PowAlgorithm, HASH256_LEN};

/// Length of [`BlockHeader::to_bytes`].
pub const HEADER_ENCODED_LEN: usize = 4 + HASH256_LEN + HASH256_LEN + 4 + 4 + 4 + 1;

// == Block Header ==
/// Header fields that identify a block.
///
/// `algorithm` is kept as the raw wire tag so headers with unknown tags can
/// still be represented and hashed; use [`BlockHeader::algorithm`] to
/// interpret it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    /// Block version
    pub version: i32,
    /// Identity hash of the parent block
    pub prev_block: Hash256,
    /// Merkle root of the block's transactions
    pub merkle_root: Hash256,
    /// Block timestamp (Unix seconds)
    pub time: u32,
    /// Compact difficulty target
    pub bits: u32,
    /// Miner nonce
    pub nonce: u32,
    /// Raw proof-of-work algorithm tag
    pub algorithm: u8,
}

impl BlockHeader {
    /// Parses the algorithm tag.
    pub fn algorithm(&self) -> Result<PowAlgorithm, InvalidAlgorithm> {
        PowAlgorithm::try_from(self.algorithm)
    }

    /// Fixed little-endian encoding used as hashing input.
    pub fn to_bytes(&self) -> [u8; HEADER_ENCODED_LEN] {
        let mut out = [0u8; HEADER_ENCODED_LEN];
        let mut pos = 0;
        let mut put = |bytes: &[u8]| {
            out[pos..pos + bytes.len()].copy_from_slice(bytes);
            pos += bytes.len();
        };
        put(&self.version.to_le_bytes());
        put(self.prev_block.as_bytes());
        put(self.merkle_root.as_bytes());
        put(&self.time.to_le_bytes());
        put(&self.bits.to_le_bytes());
        put(&self.nonce.to_le_bytes());
        put(&[self.algorithm]);
        out
    }

    /// Double SHA-256 of the encoded header. Cheap, and never depends on the
    /// PoW algorithm output.
    pub fn fingerprint(&self) -> Fingerprint {
        sha256d(&self.to_bytes())
    }
}

/// SHA-256 applied twice.
pub(crate) fn sha256d(bytes: &[u8]) -> Hash256 {
    let first = Sha256::digest(bytes);
    let second = Sha256::digest(first);
    let mut out = [0u8; HASH256_LEN];
    out.copy_from_slice(&second);
    Hash256(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(nonce: u32) -> BlockHeader {
        BlockHeader {
            version: 0x2000_0000,
            prev_block: Hash256([7u8; 32]),
            merkle_root: Hash256([9u8; 32]),
            time: 1_700_000_000,
            bits: 0x1e0f_fff0,
            nonce,
            algorithm: PowAlgorithm::MinotaurX.tag(),
        }
    }

    #[test]
    fn test_encoding_length_and_layout() {
        let bytes = header(5).to_bytes();
        assert_eq!(bytes.len(), HEADER_ENCODED_LEN);
        assert_eq!(&bytes[0..4], &0x2000_0000i32.to_le_bytes());
        assert_eq!(bytes[HEADER_ENCODED_LEN - 1], 1);
    }

    #[test]
    fn test_fingerprint_deterministic_and_sensitive() {
        assert_eq!(header(1).fingerprint(), header(1).fingerprint());
        assert_ne!(header(1).fingerprint(), header(2).fingerprint());
    }

    #[test]
    fn test_sha256d_known_vector() {
        // sha256d("") from Bitcoin test vectors.
        assert_eq!(
            sha256d(b"").to_hex(),
            "5df6e0e2761359d30a8275058e299fcc0381534545f55cf43e41983f5d4c9456"
        );
    }

    #[test]
    fn test_invalid_tag_still_fingerprints() {
        let mut h = header(1);
        h.algorithm = 42;
        assert_eq!(h.algorithm(), Err(InvalidAlgorithm(42)));
        assert_ne!(h.fingerprint(), header(1).fingerprint());
    }
}
