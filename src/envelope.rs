//! Operation result envelope
//!
//! Services report domain outcomes as an [`OperationResult`]; handlers turn
//! it into the response without building JSON shapes of their own.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::error::{AppError, AppResult, ErrorResponse};

/// Success or failure of one service call, with the status to respond with
#[derive(Debug, Clone, PartialEq)]
pub enum OperationResult<T> {
    Success { status: StatusCode, data: T },
    Failure { status: StatusCode, error: String },
}

impl<T> OperationResult<T> {
    /// 200 with data
    pub fn ok(data: T) -> Self {
        Self::success(StatusCode::OK, data)
    }

    pub fn success(status: StatusCode, data: T) -> Self {
        Self::Success { status, data }
    }

    pub fn failure(status: StatusCode, error: impl Into<String>) -> Self {
        Self::Failure {
            status,
            error: error.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Success { status, .. } | Self::Failure { status, .. } => *status,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Transform the success payload, keeping the status
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> OperationResult<U> {
        match self {
            Self::Success { status, data } => OperationResult::Success {
                status,
                data: f(data),
            },
            Self::Failure { status, error } => OperationResult::Failure { status, error },
        }
    }
}

impl<T> From<AppError> for OperationResult<T> {
    fn from(err: AppError) -> Self {
        Self::Failure {
            status: err.status_code(),
            error: err.public_message(),
        }
    }
}

impl<T> From<AppResult<T>> for OperationResult<T> {
    fn from(result: AppResult<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(err) => err.into(),
        }
    }
}

impl<T: Serialize> IntoResponse for OperationResult<T> {
    fn into_response(self) -> Response {
        match self {
            Self::Success { status, data } => (status, Json(data)).into_response(),
            Self::Failure { status, error } => (status, Json(ErrorResponse { error })).into_response(),
        }
    }
}
