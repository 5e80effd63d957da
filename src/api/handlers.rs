//! API Handlers
//!
//! HTTP request handlers for each diagnostics endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::cache::BlockHashCache;
use crate::error::{ApiError, Result};
use crate::models::{
    BlockAcceptedResponse, ClearResponse, HashRequest, HashResponse, HealthResponse,
    LookupResponse, StatsResponse,
};
use crate::pow::IdentitySource;
use crate::primitives::Fingerprint;
use crate::tasks::BlockNotifier;

/// Application state shared across all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The process's block hash cache
    pub cache: Arc<BlockHashCache>,
    /// Maintenance trigger, if a maintenance task is running
    pub notifier: Option<BlockNotifier>,
}

impl AppState {
    /// Creates a new AppState without a maintenance task.
    pub fn new(cache: Arc<BlockHashCache>) -> Self {
        Self {
            cache,
            notifier: None,
        }
    }

    /// Routes `POST /blocks/accepted` notifications to a maintenance task.
    pub fn with_notifier(mut self, notifier: BlockNotifier) -> Self {
        self.notifier = Some(notifier);
        self
    }
}

/// Runs `f` against the cache on the blocking pool.
///
/// Every cache method takes a `std::sync::Mutex` that `get_or_compute`
/// holds for a whole PoW computation, so no handler touches the cache on a
/// runtime worker.
async fn with_cache<T, F>(state: &AppState, f: F) -> Result<T>
where
    F: FnOnce(&BlockHashCache) -> T + Send + 'static,
    T: Send + 'static,
{
    let cache = state.cache.clone();
    tokio::task::spawn_blocking(move || f(&cache))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))
}

/// Handler for POST /hash
pub async fn hash_handler(
    State(state): State<AppState>,
    Json(req): Json<HashRequest>,
) -> Result<Json<HashResponse>> {
    let response = with_cache(&state, move |cache| {
        let header = req.header;
        let algorithm = header.algorithm().ok();
        HashResponse {
            fingerprint: cache.fingerprint(&header),
            pow_hash: cache.get_or_compute(&header, req.use_cache),
            identity_hash: cache.identity_hash(&header),
            algorithm,
            identity_source: algorithm.map(IdentitySource::for_algorithm),
        }
    })
    .await?;

    Ok(Json(response))
}

/// Handler for GET /lookup/:fingerprint
pub async fn lookup_handler(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<LookupResponse>> {
    let fingerprint: Fingerprint = raw
        .parse()
        .map_err(|e| ApiError::InvalidRequest(format!("bad fingerprint: {}", e)))?;

    let pow_hash = with_cache(&state, move |cache| cache.lookup(&fingerprint))
        .await?
        .ok_or_else(|| ApiError::NotFound(fingerprint.to_string()))?;

    Ok(Json(LookupResponse {
        fingerprint,
        pow_hash,
    }))
}

/// Handler for DELETE /cache
pub async fn clear_handler(State(state): State<AppState>) -> Result<Json<ClearResponse>> {
    let cleared = with_cache(&state, |cache| cache.clear()).await?;
    Ok(Json(ClearResponse::new(cleared)))
}

/// Handler for POST /blocks/accepted/:height
pub async fn block_accepted_handler(
    State(state): State<AppState>,
    Path(height): Path<u64>,
) -> Json<BlockAcceptedResponse> {
    let queued = state
        .notifier
        .as_ref()
        .map(|n| n.block_accepted(height))
        .unwrap_or(false);
    Json(BlockAcceptedResponse { height, queued })
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<StatsResponse>> {
    let response = with_cache(&state, |cache| {
        let stats = cache.stats();
        StatsResponse {
            summary: cache.describe(),
            hit_rate: stats.hit_rate(),
            correction_rate: stats.correction_rate(),
            stats,
            loaded_size: cache.loaded_size(),
            max_entries: cache.max_entries(),
            validate: cache.is_validating(),
        }
    })
    .await?;

    Ok(Json(response))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
