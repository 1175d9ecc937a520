//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use core_kernel::PortError;
use domain_claims::ClaimError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Unauthorized".to_string(),
            ),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg.clone()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            ApiError::Validation(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                msg.clone(),
            ),
            ApiError::Unavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "service_unavailable",
                msg.clone(),
            ),
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                msg.clone(),
            ),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

/// Maps domain errors onto HTTP semantics
///
/// State-machine violations and optimistic-concurrency losses surface as
/// 409; business-rule validation as 422; permissions as 403.
impl From<ClaimError> for ApiError {
    fn from(err: ClaimError) -> Self {
        match err {
            ClaimError::InvalidTransition { .. }
            | ClaimError::ClaimAlreadyResolved { .. }
            | ClaimError::ClaimNotEscalated { .. }
            | ClaimError::LegalCaseAlreadyOpen
            | ClaimError::OpenInvestigationPending
            | ClaimError::OpenLegalCasePending
            | ClaimError::InvestigationClosed
            | ClaimError::LegalCaseClosed => ApiError::Conflict(err.to_string()),
            ClaimError::Validation(msg) => ApiError::Validation(msg),
            ClaimError::NotFound(msg) => ApiError::NotFound(msg),
            ClaimError::NotPermitted { .. } => ApiError::Forbidden(err.to_string()),
            ClaimError::Storage(port_err) => port_err.into(),
        }
    }
}

impl From<PortError> for ApiError {
    fn from(err: PortError) -> Self {
        match &err {
            PortError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            PortError::Validation { .. } => ApiError::Validation(err.to_string()),
            PortError::Conflict { .. } => ApiError::Conflict(err.to_string()),
            e if e.is_transient() => ApiError::Unavailable(err.to_string()),
            _ => ApiError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_claims::ClaimStatus;

    #[test]
    fn test_invalid_transition_maps_to_conflict() {
        let err = ClaimError::InvalidTransition {
            from: ClaimStatus::Draft,
            to: ClaimStatus::Approved,
        };
        assert!(matches!(ApiError::from(err), ApiError::Conflict(_)));
    }

    #[test]
    fn test_stale_version_maps_to_conflict() {
        let err = ClaimError::Storage(PortError::conflict("version mismatch"));
        assert!(matches!(ApiError::from(err), ApiError::Conflict(_)));
    }
}
