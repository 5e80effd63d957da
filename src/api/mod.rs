//! API Module
//!
//! HTTP diagnostics surface over the block hash cache.
//!
//! # Endpoints
//! - `POST /hash` - Resolve a header's fingerprint, PoW hash and identity hash
//! - `GET /lookup/:fingerprint` - Read a cached PoW hash
//! - `DELETE /cache` - Clear the cache
//! - `POST /blocks/accepted/:height` - Queue a maintenance check
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
