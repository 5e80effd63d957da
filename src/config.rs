//! Configuration Module
//!
//! Handles loading cache and daemon configuration from environment variables.

use std::env;
use std::path::PathBuf;

use crate::persist::DEFAULT_SNAPSHOT_FILE;

/// Cache capacity used when `BLOCK_HASH_CACHE` is unset, unparsable or zero.
pub const DEFAULT_BLOCK_CACHE_SIZE: usize = 3_200_000;

/// Environment variable holding the maximum cache size.
pub const ENV_CACHE_SIZE: &str = "BLOCK_HASH_CACHE";

/// Environment variable enabling validate mode.
pub const ENV_CACHE_VALIDATE: &str = "BLOCK_CACHE_VALIDATE";

// == Cache Config ==
/// Block hash cache parameters, read once when the cache is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of cached PoW hashes
    pub max_entries: usize,
    /// Recompute and compare on every access (integrity mode, no speedup)
    pub validate: bool,
}

impl CacheConfig {
    /// Builds a config; zero capacity falls back to the default.
    pub fn new(max_entries: usize, validate: bool) -> Self {
        Self {
            max_entries: if max_entries == 0 {
                DEFAULT_BLOCK_CACHE_SIZE
            } else {
                max_entries
            },
            validate,
        }
    }

    /// Reads `BLOCK_HASH_CACHE` and `BLOCK_CACHE_VALIDATE`.
    ///
    /// # Environment Variables
    /// - `BLOCK_HASH_CACHE` - Maximum cache entries (default: 3200000, also used for 0)
    /// - `BLOCK_CACHE_VALIDATE` - Integer > 0 or `true` enables validate mode (default: off)
    pub fn from_env() -> Self {
        Self::from_values(
            env::var(ENV_CACHE_SIZE).ok().as_deref(),
            env::var(ENV_CACHE_VALIDATE).ok().as_deref(),
        )
    }

    /// Parses raw setting values as they would come from the environment.
    pub fn from_values(max_entries: Option<&str>, validate: Option<&str>) -> Self {
        let max_entries = max_entries
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_BLOCK_CACHE_SIZE);
        let validate = validate.map(parse_flag).unwrap_or(false);
        Self::new(max_entries, validate)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BLOCK_CACHE_SIZE, false)
    }
}

fn parse_flag(raw: &str) -> bool {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("true") || raw.eq_ignore_ascii_case("yes") {
        return true;
    }
    raw.parse::<i64>().map(|n| n > 0).unwrap_or(false)
}

// == Daemon Config ==
/// Daemon configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Block hash cache parameters
    pub cache: CacheConfig,
    /// HTTP server port
    pub server_port: u16,
    /// Snapshot file location
    pub snapshot_path: PathBuf,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `BLOCK_HASH_CACHE`, `BLOCK_CACHE_VALIDATE` - see [`CacheConfig::from_env`]
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `SNAPSHOT_PATH` - Snapshot file (default: blockcache.dat)
    pub fn from_env() -> Self {
        Self {
            cache: CacheConfig::from_env(),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            snapshot_path: env::var("SNAPSHOT_PATH")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT_FILE)),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            server_port: 3000,
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT_FILE),
        }
    }
}
