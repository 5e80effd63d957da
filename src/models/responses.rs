//! Response DTOs for the diagnostics API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::pow::IdentitySource;
use crate::primitives::{Fingerprint, Hash256, PowAlgorithm, PowHash};

/// Response body for POST /hash
#[derive(Debug, Clone, Serialize)]
pub struct HashResponse {
    /// Header fingerprint
    pub fingerprint: Fingerprint,
    /// PoW hash resolved through the cache
    pub pow_hash: PowHash,
    /// Hash the rest of the node identifies this header by
    pub identity_hash: Hash256,
    /// Parsed algorithm, absent for invalid tags
    pub algorithm: Option<PowAlgorithm>,
    /// Which accessor produced `identity_hash`, absent for invalid tags
    pub identity_source: Option<IdentitySource>,
}

/// Response body for GET /lookup/:fingerprint
#[derive(Debug, Clone, Serialize)]
pub struct LookupResponse {
    /// The requested fingerprint
    pub fingerprint: Fingerprint,
    /// The cached PoW hash
    pub pow_hash: PowHash,
}

/// Response body for DELETE /cache
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    /// Success message
    pub message: String,
    /// Entries dropped
    pub cleared: usize,
}

impl ClearResponse {
    /// Creates a new ClearResponse
    pub fn new(cleared: usize) -> Self {
        Self {
            message: format!("Cleared {} cached block hashes", cleared),
            cleared,
        }
    }
}

/// Response body for POST /blocks/accepted/:height
#[derive(Debug, Clone, Serialize)]
pub struct BlockAcceptedResponse {
    /// Height that was reported
    pub height: u64,
    /// Whether a maintenance check was queued
    pub queued: bool,
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// `describe()` summary line
    pub summary: String,
    /// Counters
    #[serde(flatten)]
    pub stats: CacheStats,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Share of recomputations that corrected the cache
    pub correction_rate: f64,
    /// Entry count at the last snapshot load
    pub loaded_size: usize,
    /// Capacity
    pub max_entries: usize,
    /// Whether validate mode is on
    pub validate: bool,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_response_flattens_counters() {
        let response = StatsResponse {
            summary: "BlockCache: elements: 0".to_string(),
            stats: CacheStats::new(),
            hit_rate: 0.0,
            correction_rate: 0.0,
            loaded_size: 0,
            max_entries: 10,
            validate: false,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["hits"], 0);
        assert_eq!(json["corrections"], 0);
        assert_eq!(json["summary"], "BlockCache: elements: 0");
    }

    #[test]
    fn test_hash_response_invalid_tag_has_null_algorithm() {
        let response = HashResponse {
            fingerprint: Hash256::ZERO,
            pow_hash: Hash256::MAX,
            identity_hash: Hash256::MAX,
            algorithm: None,
            identity_source: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json["algorithm"].is_null());
        assert_eq!(json["pow_hash"], "ff".repeat(32));
    }

    #[test]
    fn test_health_response() {
        let response = HealthResponse::healthy();
        assert_eq!(response.status, "healthy");
        assert!(!response.timestamp.is_empty());
    }
}
