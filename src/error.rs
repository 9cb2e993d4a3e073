//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{resource}: expected exactly one primary key column, found {count}")]
    InvalidPrimaryKey { resource: &'static str, count: usize },
    #[error("{resource}: unknown column '{column}'")]
    MissingColumn { resource: &'static str, column: String },
    #[error("duplicate route path: {0}")]
    DuplicatePath(String),
    #[error("settings: {0}")]
    Settings(String),
    #[error("validation: {0}")]
    Validation(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Client input rejected; `code` is stable and machine-readable.
    #[error("{message}")]
    Validation { code: &'static str, message: String },
    #[error("Valid ID is required")]
    InvalidId,
    /// Carries the full client-facing message, e.g. "Alert not found".
    #[error("{0}")]
    NotFound(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("internal: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(code: &'static str, message: impl Into<String>) -> Self {
        AppError::Validation {
            code,
            message: message.into(),
        }
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::Validation { code, .. } => (StatusCode::BAD_REQUEST, Some(*code)),
            AppError::InvalidId => (StatusCode::BAD_REQUEST, Some("INVALID_ID")),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, None),
            AppError::Db(sqlx::Error::RowNotFound) => (StatusCode::NOT_FOUND, None),
            AppError::Config(_) | AppError::Db(_) | AppError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, None)
            }
        };
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
            "Internal server error".to_string()
        } else if let AppError::Db(_) = self {
            "Not found".to_string()
        } else {
            self.to_string()
        };
        (status, Json(ErrorBody { error: message, code })).into_response()
    }
}
