use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use agora_core::DomainError;

pub fn domain_error_to_response(err: impl Into<DomainError>) -> axum::response::Response {
    let err = err.into();
    let status = match &err {
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        DomainError::Storage(_) | DomainError::Internal(_) => {
            tracing::error!(error = %err, "request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    json_error(status, err.code(), err.message())
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

pub fn invalid_product_id() -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id")
}
