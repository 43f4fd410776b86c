//! Unified error handling for the HTTP boundary.
//!
//! Every failure, whether raised by the domain or by request parsing,
//! leaves the service as the same payload: `{"status": <code>, "detail": <message>}`.

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::{DomainError, MSG_INVALID_PATH_PARAMETER, MSG_MALFORMED_BODY};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Resource errors
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    // Client input
    #[error("{0}")]
    InvalidInput(String),

    /// Field-level violations keyed by field name
    #[error("{}", render_violations(.0))]
    Validation(BTreeMap<String, String>),

    #[error("{}", MSG_MALFORMED_BODY)]
    MalformedBody,

    #[error("{}", MSG_INVALID_PATH_PARAMETER)]
    InvalidPathParameter,

    // External service errors
    #[cfg(feature = "database")]
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error payload shared by every failing response
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    /// Numeric HTTP status
    #[cfg_attr(feature = "openapi", schema(example = 404))]
    pub status: u16,
    /// Human-readable description
    #[cfg_attr(feature = "openapi", schema(example = "Usuário não encontrado."))]
    pub detail: String,
}

impl AppError {
    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InvalidInput(_)
            | AppError::Validation(_)
            | AppError::MalformedBody
            | AppError::InvalidPathParameter => StatusCode::BAD_REQUEST,
            #[cfg(feature = "database")]
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            #[cfg(feature = "database")]
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            _ => self.to_string(),
        }
    }

    pub fn into_body(self) -> ErrorResponse {
        ErrorResponse {
            status: self.status().as_u16(),
            detail: self.user_message(),
        }
    }
}

/// Render field violations as `{field=message, ...}`, ordered by field.
fn render_violations(violations: &BTreeMap<String, String>) -> String {
    let joined = violations
        .iter()
        .map(|(field, message)| format!("{}={}", field, message))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{{}}}", joined)
}

// =============================================================================
// HTTP Response (Axum)
// =============================================================================

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(self.into_body())).into_response()
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound(msg) => AppError::NotFound(msg),
            DomainError::Conflict(msg) => AppError::Conflict(msg),
            DomainError::InvalidInput(msg) => AppError::InvalidInput(msg),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self, msg: &str) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, msg: &str) -> AppResult<T> {
        self.ok_or_else(|| AppError::NotFound(msg.to_string()))
    }
}

/// Convenience constructors
impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        AppError::Conflict(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        AppError::InvalidInput(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
