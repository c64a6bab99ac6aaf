use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use tracing::{error, warn};

use stratus_core::DomainError;

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", msg)
        }
        DomainError::InvalidRequest(msg) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_request", msg)
        }
        DomainError::NotFound(msg) => json_error(StatusCode::NOT_FOUND, "not_found", msg),
        DomainError::FeatureDisabled(feature) => feature_disabled(feature),
        DomainError::Storage(msg) => {
            error!(error = %msg, "forecast storage failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "storage_error", msg)
        }
    }
}

/// Disabled features answer as if the route did not exist.
pub fn feature_disabled(feature: &'static str) -> axum::response::Response {
    warn!(feature, "request blocked: feature is disabled");
    json_error(StatusCode::NOT_FOUND, "not_found", "not found")
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
