use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

use crate::metrics::VALIDATION_FAILURES_TOTAL;

/// HTTP-facing error for the product routes.
///
/// Validation failures echo the submitted body; store failures never expose
/// driver messages, only a stable code.
#[derive(Debug)]
pub enum ApiError {
    InvalidId,
    NotFound,
    Validation { request_object: Value },
    StoreWrite { request_object: Value },
    Store,
}

impl ApiError {
    /// Map a service error; `request_object` is the body to echo for writes.
    pub fn from_service(e: ServiceError, request_object: Option<Value>) -> Self {
        match e {
            ServiceError::InvalidId(_) => ApiError::InvalidId,
            ServiceError::NotFound(_) => ApiError::NotFound,
            ServiceError::Validation(msg) => {
                VALIDATION_FAILURES_TOTAL.inc();
                tracing::info!(reason = %msg, "incorrect product rejected");
                ApiError::Validation { request_object: request_object.unwrap_or(Value::Null) }
            }
            ServiceError::Db(detail) => {
                error!(code = "store_failure", error = %detail, "product store operation failed");
                match request_object {
                    Some(request_object) => ApiError::StoreWrite { request_object },
                    None => ApiError::Store,
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InvalidId => (StatusCode::NOT_FOUND, "Id is incorrect!").into_response(),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Product not found!").into_response(),
            ApiError::Validation { request_object } => (
                StatusCode::BAD_REQUEST,
                Json(json!({"message": "Incorrect product!", "request_object": request_object})),
            )
                .into_response(),
            ApiError::StoreWrite { request_object } => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "message": "Incorrect product!",
                    "code": "store_write_failed",
                    "request_object": request_object
                })),
            )
                .into_response(),
            ApiError::Store => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "store_failure"})),
            )
                .into_response(),
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("document store unreachable: {0}")]
    Database(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
