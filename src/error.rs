use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug)]
pub enum AppError {
    MissingParameter(String),
    InvalidParameter(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Internal(String),
    Database(sqlx::Error),
}

impl AppError {
    fn code(&self) -> &'static str {
        match self {
            AppError::MissingParameter(_) => "MISSING_PARAMETER",
            AppError::InvalidParameter(_) => "INVALID_PARAMETER",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::Forbidden(_) => "PERMISSION_DENIED",
            AppError::NotFound(_) => "ITEM_NOT_FOUND",
            AppError::Internal(_) | AppError::Database(_) => "GENERAL",
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::MissingParameter(msg) => write!(f, "Missing Parameter: {msg}"),
            AppError::InvalidParameter(msg) => write!(f, "Invalid Parameter: {msg}"),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {msg}"),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {msg}"),
            AppError::NotFound(msg) => write!(f, "Not Found: {msg}"),
            AppError::Internal(msg) => write!(f, "Internal Error: {msg}"),
            AppError::Database(err) => write!(f, "Database Error: {err}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();
        let (status, message) = match &self {
            AppError::MissingParameter(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::InvalidParameter(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Database(err) => {
                tracing::error!("Database error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = json!({ "error": message, "code": code });
        (status, axum::Json(body)).into_response()
    }
}

/// Request parameter failures, raised before any lookup runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("Parameter '{0}' is missing")]
    MissingParameter(&'static str),

    #[error("Parameter '{0}' can't be empty")]
    BlankParameter(&'static str),

    #[error("Parameter '{name}' is not a valid UUID: {value}")]
    InvalidUuid { name: &'static str, value: String },

    #[error("Parameter '{name}' is not a valid integer: {value}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("Parameter '{name}' is not a valid boolean: {value}")]
    InvalidBoolean { name: &'static str, value: String },

    #[error("Parameter 'limit' must be at least 1, got {0}")]
    LimitTooSmall(i64),

    #[error("Parameter 'startTime' ({start}) is after 'endTime' ({end})")]
    InvalidTimeRange { start: i64, end: i64 },

    #[error("Unknown entity type: {0}")]
    UnknownEntityType(String),

    #[error("Unknown action type: {0}")]
    UnknownActionType(String),
}

impl From<QueryError> for AppError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::MissingParameter(_) => AppError::MissingParameter(err.to_string()),
            _ => AppError::InvalidParameter(err.to_string()),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Database(e) => AppError::Database(e),
            StoreError::InvalidOffset(_) => AppError::InvalidParameter(err.to_string()),
            StoreError::CorruptRow(_) => AppError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_parameter_keeps_its_kind() {
        let err: AppError = QueryError::MissingParameter("limit").into();
        assert!(matches!(err, AppError::MissingParameter(msg) if msg.contains("limit")));
    }

    #[test]
    fn other_query_errors_are_invalid_parameter() {
        let err: AppError = QueryError::UnknownActionType("bogus".to_string()).into();
        assert!(matches!(err, AppError::InvalidParameter(msg) if msg.contains("bogus")));
    }

    #[test]
    fn internal_errors_hide_detail() {
        let response = AppError::Internal("secret detail".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn store_offset_error_is_client_error() {
        let err: AppError = StoreError::InvalidOffset("zzz".to_string()).into();
        assert!(matches!(err, AppError::InvalidParameter(_)));
    }

    #[test]
    fn store_database_error_is_internal() {
        let err: AppError = StoreError::Database(sqlx::Error::PoolTimedOut).into();
        assert!(matches!(err, AppError::Database(_)));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
