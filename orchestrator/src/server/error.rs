use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::types::ErrorResponse;

pub type ApiServiceResult<T> = Result<T, ApiError>;

/// Errors returned by the gateway routes.
///
/// Rendered as `{"code": <status>, "error": <message>}` with the matching status:
/// * `BadRequest` - 400 Bad Request
/// * `NotFound` - 404 Not Found
/// * `Internal` - 500 Internal Server Error
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(ErrorResponse { code: status.as_u16(), error: self.to_string() })).into_response()
    }
}
