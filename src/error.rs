//! Custom error types and handling
//!
//! This module defines the request-time error type and its conversion to
//! HTTP responses, plus the bootstrap error that aborts start-up.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::{container::ContainerError, registry::RegistryError, routing::AssemblyError};

/// Generic message sent to clients for any server-side failure
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred.";

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Client errors
    #[error("{0}")]
    Validation(String),

    #[error("Invalid internal key.")]
    InvalidKey,

    #[error("{0}")]
    NotFound(String),

    // Downstream collaborator errors
    #[error("Database error: {0}")]
    Database(String),

    #[error("Redis error: {0}")]
    Redis(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl AppError {
    /// Shorthand for a 400 with the given message
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::InvalidKey => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_)
            | Self::Redis(_)
            | Self::Upstream(_)
            | Self::Internal(_)
            | Self::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to send to clients.
    ///
    /// Server-side failures are logged here with full detail and replaced by
    /// a generic message.
    pub fn public_message(&self) -> String {
        match self {
            Self::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            Self::Database(_) | Self::Redis(_) | Self::Upstream(_) | Self::Configuration(_) => {
                tracing::error!("{}", self);
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.public_message(),
        };

        (status, Json(body)).into_response()
    }
}

// Implement From for common error types
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<redis::RedisError> for AppError {
    fn from(err: redis::RedisError) -> Self {
        AppError::Redis(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Upstream(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(err.into())
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Start-up failure: any of these aborts the process before serving
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Container(#[from] ContainerError),

    #[error(transparent)]
    Assembly(#[from] AssemblyError),
}
