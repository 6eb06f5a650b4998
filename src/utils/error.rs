//! Unified Error Handling
//!
//! Provides the application-wide error type and the JSON response envelope:
//! - [`AppError`] - application error enum
//! - [`AppResponse`] - `{success, data?, error?}` envelope
//!
//! Business-rule rejections (insufficient stock, unavailable game, state
//! conflicts) surface as 400 with a short reason; missing entities as 404;
//! database and internal failures as 500 with the detail logged but not
//! disclosed to the caller.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::db::repository::RepoError;

/// Unified API response envelope
#[derive(Debug, Clone, Serialize)]
pub struct AppResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> AppResponse<T> {
    /// Successful response carrying data
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Successful response with no payload (deletes)
    pub fn ok_empty() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
        }
    }

    /// Error response
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Application-level error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Business Logic Errors ==========
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Insufficient stock: {0}")]
    InsufficientStock(String),

    #[error("Unavailable: {0}")]
    Unavailable(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    // ========== System Errors ==========
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn insufficient_stock(msg: impl Into<String>) -> Self {
        Self::InsufficientStock(msg.into())
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Application-level Result type
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            // Not found (404)
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),

            // Validation and business-rule rejections (400)
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::InsufficientStock(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unavailable(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Conflict(msg) => (StatusCode::BAD_REQUEST, msg),

            // System errors (500) - detail logged, generic message returned
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(AppResponse::<()>::error(message))).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let detail = errors
            .field_errors()
            .iter()
            .map(|(field, errs)| {
                let reasons = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{field}: {reasons}")
            })
            .collect::<Vec<_>>()
            .join("; ");
        AppError::Validation(detail)
    }
}

// ========== Helper functions ==========

/// Create a 200 response with the standard envelope
pub fn ok<T: Serialize>(data: T) -> Json<AppResponse<T>> {
    Json(AppResponse::success(data))
}

/// Create a 201 response with the standard envelope
pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<AppResponse<T>>) {
    (StatusCode::CREATED, Json(AppResponse::success(data)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_skips_absent_fields() {
        let body = serde_json::to_value(AppResponse::success(1)).unwrap();
        assert_eq!(body, serde_json::json!({"success": true, "data": 1}));

        let body = serde_json::to_value(AppResponse::<()>::error("nope")).unwrap();
        assert_eq!(body, serde_json::json!({"success": false, "error": "nope"}));

        let body = serde_json::to_value(AppResponse::<()>::ok_empty()).unwrap();
        assert_eq!(body, serde_json::json!({"success": true}));
    }

    #[test]
    fn repo_errors_map_to_app_errors() {
        let e: AppError = RepoError::NotFound("Order x not found".into()).into();
        assert!(matches!(e, AppError::NotFound(_)));

        let e: AppError = RepoError::Database("boom".into()).into();
        assert!(matches!(e, AppError::Database(_)));
    }
}
