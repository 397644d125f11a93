//! Error types for the action pipeline.
//!
//! Every stage returns typed errors threaded through `Result`; the only
//! catch-all lives at the handler dispatch boundary, where an
//! [`EngineError`] becomes a structured outcome. Internal variants carry
//! context for the operator log but are never shown to the caller.

use regna_types::{ErrorCode, KingdomId, ResourceKind};

use crate::store::StoreError;

/// Errors produced by validation and resolution stages.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A required identifier or field was absent from the request.
    #[error("missing required parameter: {field}")]
    MissingParams {
        /// The absent field.
        field: &'static str,
    },

    /// A field failed a domain check, or the action conflicts with existing
    /// state (e.g. a duplicate territory coordinate).
    #[error("invalid parameter {field}: {reason}")]
    InvalidParam {
        /// The offending field.
        field: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// The referenced kingdom does not exist.
    #[error("kingdom not found: {0}")]
    KingdomNotFound(KingdomId),

    /// The kingdom cannot pay the action's cost. Reports both the required
    /// and the current amount so the caller can plan.
    #[error("insufficient {resource:?}: required {required}, current {current}")]
    InsufficientResources {
        /// Which counter fell short.
        resource: ResourceKind,
        /// The amount the action needs.
        required: u64,
        /// The amount the kingdom holds.
        current: u64,
    },

    /// An unexpected failure (store fault, malformed persisted data,
    /// exhausted commit retries). The context is logged, never exposed.
    #[error("internal engine failure: {context}")]
    Internal {
        /// Operator-facing description of what failed.
        context: String,
    },
}

impl EngineError {
    /// The machine-readable code this error maps to.
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::MissingParams { .. } => ErrorCode::MissingParams,
            Self::InvalidParam { .. } => ErrorCode::InvalidParam,
            Self::KingdomNotFound(_) => ErrorCode::NotFound,
            Self::InsufficientResources { .. } => ErrorCode::InsufficientResources,
            Self::Internal { .. } => ErrorCode::InternalError,
        }
    }
}

impl From<StoreError> for EngineError {
    /// Any store fault surfacing outside the commit retry loop is internal:
    /// the caller cannot act on it and must never see backend details.
    fn from(error: StoreError) -> Self {
        Self::Internal {
            context: error.to_string(),
        }
    }
}
