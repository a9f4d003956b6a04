//! Error types for the engine crate.
//!
//! Lowering is total and has no error type. Everything here originates at
//! the gateway boundary or in metadata storage, and propagates unmodified
//! to the caller; there is no local recovery or retry beyond the bounded
//! backoff on idempotent reads.

use std::fmt;

/// Errors from gateway operations against the external engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The HTTP client could not be constructed.
    ClientBuild { reason: String },
    /// The request never produced a response (connect error, timeout).
    Transport {
        operation: &'static str,
        reason: String,
    },
    /// The engine answered with a non-success status. The specific cause
    /// (auth, schema rejection, missing workflow) is not distinguished.
    RequestFailed {
        operation: &'static str,
        status: u16,
    },
    /// The engine answered 2xx but the body could not be decoded.
    InvalidResponse {
        operation: &'static str,
        reason: String,
    },
}

impl EngineError {
    /// Returns true when retrying the request could plausibly succeed.
    ///
    /// Transport failures and server-side/throttling statuses are
    /// retryable; everything else is permanent.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { .. } => true,
            Self::RequestFailed { status, .. } => *status == 429 || *status >= 500,
            Self::ClientBuild { .. } | Self::InvalidResponse { .. } => false,
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClientBuild { reason } => {
                write!(f, "failed to build engine client: {reason}")
            }
            Self::Transport { operation, reason } => {
                write!(f, "engine request '{operation}' failed: {reason}")
            }
            Self::RequestFailed { operation, status } => {
                write!(f, "engine request '{operation}' returned status {status}")
            }
            Self::InvalidResponse { operation, reason } => {
                write!(f, "invalid engine response for '{operation}': {reason}")
            }
        }
    }
}

impl std::error::Error for EngineError {}

/// Errors from metadata storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataError {
    /// No record exists for the given engine workflow id.
    NotFound { engine_id: String },
    /// The backing store failed.
    Storage { reason: String },
}

impl fmt::Display for MetadataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { engine_id } => {
                write!(f, "no metadata recorded for workflow '{engine_id}'")
            }
            Self::Storage { reason } => {
                write!(f, "metadata storage failed: {reason}")
            }
        }
    }
}

impl std::error::Error for MetadataError {}

/// Errors from the provisioning service, which couples engine calls with
/// metadata writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The engine call failed.
    Engine(EngineError),
    /// The metadata operation failed.
    Metadata(MetadataError),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Engine(err) => write!(f, "engine operation failed: {err}"),
            Self::Metadata(err) => write!(f, "metadata operation failed: {err}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Engine(err) => Some(err),
            Self::Metadata(err) => Some(err),
        }
    }
}

impl From<EngineError> for ServiceError {
    fn from(err: EngineError) -> Self {
        Self::Engine(err)
    }
}

impl From<MetadataError> for ServiceError {
    fn from(err: MetadataError) -> Self {
        Self::Metadata(err)
    }
}
