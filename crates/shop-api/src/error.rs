//! # API Error Responses
//!
//! Translates `ShopError` into the JSON error body clients see. Store and
//! provider failures surface as structured 5xx responses instead of tearing
//! down the request task.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use shop_core::ShopError;

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
            details: None,
        }
    }
}

/// Newtype carrying `ShopError` through axum's response machinery
#[derive(Debug)]
pub struct ApiError(pub ShopError);

impl From<ShopError> for ApiError {
    fn from(err: ShopError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.status_code();
        let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(ErrorResponse::new(self.0.to_string(), code))).into_response()
    }
}

/// Result type alias for request handlers
pub type ApiResult<T> = Result<T, ApiError>;
