// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::services::identity::AuthError;

/// Generic message for anything the caller should not see details of.
pub const INTERNAL_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Missing, invalid or expired credentials. Carries the public message.
    #[error("{0}")]
    AuthRequired(&'static str),

    /// Unknown or inactive account. Carries the public message.
    #[error("{0}")]
    UserNotFound(&'static str),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Stable machine-readable code for the error envelope.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::AuthRequired(_) => "AUTH_REQUIRED",
            AppError::UserNotFound(_) => "USER_NOT_FOUND",
            AppError::Database(_) | AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::AuthRequired(_) => StatusCode::UNAUTHORIZED,
            AppError::UserNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingToken => AppError::AuthRequired("Authentication required"),
            AuthError::InvalidToken => AppError::AuthRequired("Invalid or expired token"),
            AuthError::UserNotFound => AppError::UserNotFound("User not found"),
            AuthError::InactiveAccount => AppError::UserNotFound("User account is not active"),
            // Whatever the store reports, a failed lookup is an internal error.
            AuthError::Store(AppError::Database(msg)) => AppError::Database(msg),
            AuthError::Store(AppError::Internal(err)) => AppError::Internal(err),
            AuthError::Store(other) => AppError::Internal(anyhow::anyhow!(
                "User store returned unexpected error: {}",
                other
            )),
            AuthError::Internal(err) => AppError::Internal(err),
        }
    }
}

/// Successful response envelope: `{ "success": true, "data": ... }`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            AppError::AuthRequired(msg) | AppError::UserNotFound(msg) => msg.to_string(),
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        };

        let body = ErrorResponse {
            success: false,
            error: ErrorDetail {
                code: self.code(),
                message,
            },
        };

        (self.status(), Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
