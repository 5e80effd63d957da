//! Proof-of-work algorithm tags.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

// == PowAlgorithm ==
/// Closed set of proof-of-work algorithms a header can be mined with.
///
/// The identity hash of a header depends on the variant:
/// - `CurveHash`: identity is the header fingerprint; the PoW hash is only
///   needed for difficulty checks.
/// - `MinotaurX`: identity is the PoW hash, resolved through the block hash
///   cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PowAlgorithm {
    /// Wire tag 0.
    CurveHash,
    /// Wire tag 1.
    MinotaurX,
}

/// A header carried an algorithm tag outside the known set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid proof-of-work algorithm tag: {0}")]
pub struct InvalidAlgorithm(pub u8);

impl PowAlgorithm {
    /// Every known algorithm, in tag order.
    pub const ALL: [Self; 2] = [Self::CurveHash, Self::MinotaurX];

    /// Wire tag for this algorithm.
    pub const fn tag(self) -> u8 {
        match self {
            Self::CurveHash => 0,
            Self::MinotaurX => 1,
        }
    }

    /// Human readable name used in logs.
    pub const fn name(self) -> &'static str {
        match self {
            Self::CurveHash => "curvehash",
            Self::MinotaurX => "minotaurx",
        }
    }
}

impl TryFrom<u8> for PowAlgorithm {
    type Error = InvalidAlgorithm;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(Self::CurveHash),
            1 => Ok(Self::MinotaurX),
            other => Err(InvalidAlgorithm(other)),
        }
    }
}

impl fmt::Display for PowAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_roundtrip() {
        for algo in PowAlgorithm::ALL {
            assert_eq!(PowAlgorithm::try_from(algo.tag()), Ok(algo));
        }
    }

    #[test]
    fn test_unknown_tags_rejected() {
        for tag in 2..=u8::MAX {
            assert_eq!(PowAlgorithm::try_from(tag), Err(InvalidAlgorithm(tag)));
        }
    }
}
