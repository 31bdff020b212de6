/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / JSON `{ "message": ... }` body)
 * - RepoError / IdCodecError / Json rejection を統一的に変換
 */
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::repos::error::RepoError;
use crate::services::id_codec::IdCodecError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    /// No credential supplied.
    #[error("No authentication token, access denied")]
    Unauthenticated,
    /// Credential present but malformed, expired or badly signed.
    #[error("Token verification failed, authorization denied")]
    Unauthorized,
    #[error("{0}")]
    InvalidInput(String),
    /// Record absent *or* owned by someone else. The two cases are never told apart.
    #[error("Todo not found")]
    NotFound,
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated | AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        // cause はログにだけ残し、client には返さない
        tracing::error!(error = ?e, "todo store operation failed");
        AppError::Internal
    }
}

impl From<IdCodecError> for AppError {
    fn from(e: IdCodecError) -> Self {
        match e {
            // A path id that does not decode cannot belong to the caller.
            IdCodecError::DecodeInvalidFormat | IdCodecError::DecodeOutOfRange => {
                AppError::NotFound
            }
            _ => {
                tracing::error!(error = %e, "public id codec failure");
                AppError::Internal
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        tracing::debug!(error = %e, "rejected request body");
        AppError::invalid_input(e.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_failures_share_status_but_not_message() {
        assert_eq!(AppError::Unauthenticated.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_ne!(
            AppError::Unauthenticated.to_string(),
            AppError::Unauthorized.to_string()
        );
    }

    #[test]
    fn malformed_public_id_reads_as_not_found() {
        let err: AppError = IdCodecError::DecodeInvalidFormat.into();
        assert!(matches!(err, AppError::NotFound));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn sqids_failure_is_internal() {
        let err: AppError = IdCodecError::NegativeId { value: -1 }.into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
