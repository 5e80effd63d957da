//! 256-bit hash values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Byte length of every hash handled by the cache.
pub const HASH256_LEN: usize = 32;

// == Hash256 ==
/// Fixed-size 32-byte hash, rendered as lowercase hex.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Hash256(pub [u8; HASH256_LEN]);

/// Cache key: hash of a header's non-PoW fields.
pub type Fingerprint = Hash256;

/// Cache value: output of a proof-of-work algorithm.
pub type PowHash = Hash256;

/// Errors returned when parsing a hash from hex.
#[derive(Debug, Error, PartialEq)]
pub enum ParseHashError {
    /// Decoded length was not 32 bytes.
    #[error("invalid hash length: expected {expected} bytes, got {got} bytes")]
    InvalidLength {
        /// Expected number of bytes.
        expected: usize,
        /// Actual number of bytes decoded.
        got: usize,
    },

    /// Input was not valid hex.
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

impl Hash256 {
    /// All-zero hash.
    pub const ZERO: Self = Self([0u8; HASH256_LEN]);

    /// Maximum-valued hash. Returned for headers carrying an invalid
    /// algorithm tag; it never satisfies `hash <= target` for any target
    /// below 2^256 - 1.
    pub const MAX: Self = Self([0xffu8; HASH256_LEN]);

    /// Returns the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; HASH256_LEN] {
        &self.0
    }

    /// Lowercase hex encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl From<[u8; HASH256_LEN]> for Hash256 {
    fn from(bytes: [u8; HASH256_LEN]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash256({})", self.to_hex())
    }
}

impl FromStr for Hash256 {
    type Err = ParseHashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s)?;
        if bytes.len() != HASH256_LEN {
            return Err(ParseHashError::InvalidLength {
                expected: HASH256_LEN,
                got: bytes.len(),
            });
        }
        let mut out = [0u8; HASH256_LEN];
        out.copy_from_slice(&bytes);
        Ok(Self(out))
    }
}

impl Serialize for Hash256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Hash256 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
