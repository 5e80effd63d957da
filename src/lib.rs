//! powcache - Proof-of-work block hash cache
//!
//! Resolves block header identity and PoW hashes through a bounded,
//! self-validating LRU cache, with batched snapshot persistence.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod persist;
pub mod pow;
pub mod primitives;
pub mod tasks;

pub use api::AppState;
pub use cache::{BlockHashCache, CacheOwner};
pub use config::{CacheConfig, Config};
pub use pow::{AlgorithmSet, PowDispatcher};
pub use primitives::{BlockHeader, Hash256, PowAlgorithm};
pub use tasks::spawn_maintenance_task;
