//! API Routes
//!
//! Configures the Axum router with all diagnostics endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    block_accepted_handler, clear_handler, hash_handler, health_handler, lookup_handler,
    stats_handler, AppState,
};

/// Builds the diagnostics router.
///
/// | method | path                        | handler                    |
/// |--------|-----------------------------|----------------------------|
/// | POST   | `/hash`                     | resolve a header's hashes  |
/// | GET    | `/lookup/:fingerprint`      | read one cached PoW hash   |
/// | DELETE | `/cache`                    | drop every cached entry    |
/// | POST   | `/blocks/accepted/:height`  | queue a maintenance check  |
/// | GET    | `/stats`                    | counters and sizes         |
/// | GET    | `/health`                   | liveness                   |
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/hash", post(hash_handler))
        .route("/lookup/:fingerprint", get(lookup_handler))
        .route("/cache", delete(clear_handler))
        .route("/blocks/accepted/:height", post(block_accepted_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
