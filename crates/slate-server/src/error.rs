//! HTTP error mapping.
//!
//! Every engine failure kind maps to one stable code and status, so clients
//! never need to parse message text. The body shape is
//! `{"error": {"code", "message"}}`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use metrics::counter;
use serde_json::json;

use slate_store::BoardError;

/// Error returned from API handlers; wraps the store taxonomy.
#[derive(Debug)]
pub struct ApiError(pub BoardError);

impl ApiError {
    /// Build a validation error directly in the request layer (bad path
    /// parameter, malformed identifier).
    pub fn validation(message: impl Into<String>) -> Self {
        Self(BoardError::Validation(message.into()))
    }

    fn code_and_status(&self) -> (&'static str, StatusCode) {
        match &self.0 {
            BoardError::Validation(_) => ("VALIDATION", StatusCode::UNPROCESSABLE_ENTITY),
            BoardError::NotFound { .. } => ("NOT_FOUND", StatusCode::NOT_FOUND),
            BoardError::Conflict(_) => ("CONFLICT", StatusCode::CONFLICT),
            BoardError::Sqlite(_) | BoardError::Pool(_) | BoardError::Internal(_) => {
                ("INTERNAL", StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

impl From<BoardError> for ApiError {
    fn from(e: BoardError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (code, status) = self.code_and_status();
        counter!("api_errors_total", "code" => code).increment(1);
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self.0, "request failed");
        }
        let body = json!({ "error": { "code": code, "message": self.0.to_string() } });
        (status, Json(body)).into_response()
    }
}
