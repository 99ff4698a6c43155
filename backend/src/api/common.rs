//! Error handling utilities for API responses.
//!
//! Provides structured responses and conversion between service-layer errors
//! and HTTP responses.
//!
//! # Response Format
//! Every JSON endpoint answers with the same envelope:
//! - `success`: whether the request succeeded
//! - `data`: payload on success
//! - `message`: human-readable message
//! - `error.error_type`: machine-readable error category on failure
//! - `timestamp`: RFC 3339 time the response was built
//!
//! # Error Handling Flow
//! 1. Service layer returns domain-specific `ServiceError`
//! 2. `service_error_to_http` converts to appropriate HTTP response
//! 3. Role failures from the gate go through `auth_error_to_http`

use crate::errors::{AuthError, ServiceError};
use crate::state::AppState;
use axum::{http::StatusCode, response::Json as ResponseJson};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// Standard API response wrapper for all endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Indicates if the request was successful
    pub success: bool,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable message
    pub message: String,
    /// Error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetails>,
    /// Request timestamp
    pub timestamp: String,
}

/// Error details for failed requests
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Machine-readable error type identifier
    pub error_type: String,
}

/// Error half of every handler result.
pub type ApiError = (StatusCode, ResponseJson<ApiResponse<()>>);

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: message.into(),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Create a successful response with default message
    pub fn ok(data: T) -> Self {
        Self::success(data, "Request successful")
    }

    /// Create a successful response that carries no data
    pub fn done(message: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            success: true,
            data: None,
            message: message.into(),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Create an error response
    pub fn error(message: impl Into<String>, error_type: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message: message.into(),
            error: Some(ErrorDetails {
                error_type: error_type.into(),
            }),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

fn error_response(
    status: StatusCode,
    error_type: &str,
    message: impl Into<String>,
) -> ApiError {
    (
        status,
        ResponseJson(ApiResponse::<()>::error(message, error_type)),
    )
}

/// Converts ServiceError to appropriate HTTP response with standard format
pub fn service_error_to_http(error: ServiceError) -> ApiError {
    match error {
        ServiceError::Validation { message } => {
            error_response(StatusCode::BAD_REQUEST, "validation_error", message)
        }
        ServiceError::NotFound { entity, identifier } => error_response(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("{} '{}' not found", entity, identifier),
        ),
        ServiceError::AlreadyExists { entity, identifier } => error_response(
            StatusCode::CONFLICT,
            "already_exists",
            format!("{} '{}' already exists", entity, identifier),
        ),
        ServiceError::PermissionDenied { message } => {
            error_response(StatusCode::FORBIDDEN, "permission_denied", message)
        }
        ServiceError::Database { source } => {
            tracing::error!("Database error: {:#}", source);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "database_error",
                "Internal server error",
            )
        }
        ServiceError::InternalError { message } => {
            tracing::error!("Internal error: {}", message);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "Internal server error",
            )
        }
    }
}

/// Converts a gate failure raised inside a handler.
///
/// Handlers only ever see role failures: missing or invalid credentials are
/// turned away by the session gate before any handler runs.
pub fn auth_error_to_http(error: AuthError) -> ApiError {
    match error {
        AuthError::InsufficientRole { .. } => {
            error_response(StatusCode::FORBIDDEN, "forbidden", error.to_string())
        }
        AuthError::MissingCredential => {
            error_response(StatusCode::UNAUTHORIZED, "unauthorized", error.to_string())
        }
        AuthError::InvalidCredential => {
            error_response(StatusCode::UNAUTHORIZED, "invalid_token", error.to_string())
        }
    }
}

/// Shared pool, connecting lazily on first use.
pub async fn db_pool(state: &AppState) -> Result<&SqlitePool, ApiError> {
    state
        .db
        .pool()
        .await
        .map_err(|e| service_error_to_http(ServiceError::from(e)))
}
