//! API error types and their HTTP mapping.
//!
//! Validation failures are surfaced immediately with a specific message.
//! Engine failures collapse to one generic message for the caller; the
//! specific cause is logged, never distinguished in the response body.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use loomflow_engine::{EngineError, ServiceError};
use serde_json::json;
use std::fmt;

/// Errors surfaced by the HTTP API.
#[derive(Debug)]
pub enum ApiError {
    /// The request failed validation; no partial state was created.
    Validation { reason: String },
    /// An engine-side operation failed.
    Engine { source: ServiceError },
}

impl ApiError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation { reason } => write!(f, "validation failed: {reason}"),
            Self::Engine { source } => write!(f, "engine operation failed: {source}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation { .. } => None,
            Self::Engine { source } => Some(source),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(source: ServiceError) -> Self {
        Self::Engine { source }
    }
}

impl From<EngineError> for ApiError {
    fn from(source: EngineError) -> Self {
        Self::Engine {
            source: ServiceError::Engine(source),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Validation { reason } => (StatusCode::BAD_REQUEST, reason.clone()),
            Self::Engine { source } => {
                tracing::warn!(error = %source, "engine operation failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "Engine request failed".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
