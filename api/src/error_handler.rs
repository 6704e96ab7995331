use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use ai_insight_service::{InsightServiceError, RequestError};
use product_store::StorageError;

use crate::core::http::response_envelope::ApiResponse;

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("not found: {0}")]
    NotFound(String),

    /// Persistence failure; propagated, never masked.
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Storage(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<RequestError> for AppError {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::ProductNotFound(id) => AppError::NotFound(format!("product {id}")),
            other => AppError::BadRequest(other.to_string()),
        }
    }
}

impl From<InsightServiceError> for AppError {
    fn from(err: InsightServiceError) -> Self {
        match err {
            InsightServiceError::Request(req) => AppError::from(req),
            InsightServiceError::Storage(storage) => AppError::Storage(storage),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        ApiResponse::<()>::error(self.error_code(), self.to_string())
            .into_response_with_status(status)
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_errors_map_onto_client_statuses() {
        let err = AppError::from(RequestError::ProductNotFound("abc".into()));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let err = AppError::from(RequestError::MissingCompetitors);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err = AppError::from(RequestError::TooFewProducts { got: 1 });
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "BAD_REQUEST");
    }

    #[test]
    fn storage_errors_stay_visible_as_5xx() {
        let err = AppError::from(InsightServiceError::Storage(StorageError::Unavailable(
            "down".into(),
        )));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "STORAGE_ERROR");
    }
}
