//! Primitives Module
//!
//! Fixed-size hashes, proof-of-work algorithm tags and the block header
//! fields that feed the fingerprint and PoW functions.

mod algorithm;
mod hash;
mod header;

pub use algorithm::{InvalidAlgorithm, PowAlgorithm};
pub use hash::{Fingerprint, Hash256, ParseHashError, PowHash, HASH256_LEN};
pub use header::{BlockHeader, HEADER_ENCODED_LEN};
pub(crate) use header::sha256d;
