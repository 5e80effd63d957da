//! Error types for the block hash cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Persist Error Enum ==
/// Failures reading or writing cache snapshots.
///
/// These never alter in-memory cache state.
#[derive(Error, Debug)]
pub enum PersistError {
    /// Filesystem failure
    #[error("snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot could not be encoded or decoded
    #[error("snapshot serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// File holds a different logical section
    #[error("snapshot section mismatch: expected {expected}, found {found}")]
    SectionMismatch { expected: String, found: String },

    /// File was written by an incompatible cache version
    #[error("unsupported snapshot version {found} (expected {expected})")]
    UnsupportedVersion { expected: u32, found: u32 },

    /// Stored checksum does not match the entries
    #[error("snapshot checksum mismatch")]
    ChecksumMismatch,
}

impl PersistError {
    /// True when the stored snapshot is damaged and safe to overwrite.
    ///
    /// I/O failures, foreign sections and other versions are not: the file
    /// may be intact and belong to another build or process.
    pub fn is_corruption(&self) -> bool {
        matches!(self, PersistError::Serialization(_) | PersistError::ChecksumMismatch)
    }
}

// == API Error Enum ==
/// Errors surfaced by the diagnostics HTTP API.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Fingerprint not present in the cache
    #[error("Fingerprint not cached: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for API handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
