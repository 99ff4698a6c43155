//! Global application error types and handlers.
//!
//! This module defines custom error types that are used across the entire
//! backend application and provides mechanisms for consistent error handling
//! and response formatting.

use crate::database::models::Role;
use thiserror::Error;

/// Failures raised by the session gate.
///
/// `MissingCredential` and `InvalidCredential` both mean "treat the caller as
/// unauthenticated"; `InsufficientRole` means the caller is authenticated but
/// not permitted to perform the action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No session cookie was presented.
    #[error("No session credential presented")]
    MissingCredential,
    /// Bad signature, malformed payload or expired credential.
    #[error("Session credential is invalid or expired")]
    InvalidCredential,
    /// Valid session, wrong role for the requested action.
    #[error("This action requires the {required} role")]
    InsufficientRole { required: Role },
}

/// Generic service error that can be used across all entities
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("{entity} not found: {identifier}")]
    NotFound { entity: String, identifier: String },

    #[error("{entity} already exists: {identifier}")]
    AlreadyExists { entity: String, identifier: String },

    #[error("Permission denied: {message}")]
    PermissionDenied { message: String },

    #[error("Database error: {source}")]
    Database {
        #[from]
        source: anyhow::Error,
    },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    // Helper constructors for common patterns

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(entity: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            identifier: identifier.into(),
        }
    }

    pub fn already_exists(entity: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity: entity.into(),
            identifier: identifier.into(),
        }
    }

    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::PermissionDenied {
            message: message.into(),
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }
}

impl From<AuthError> for ServiceError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::InsufficientRole { .. } => Self::permission_denied(error.to_string()),
            // Services only ever see verified principals; anything else is a wiring bug.
            AuthError::MissingCredential | AuthError::InvalidCredential => {
                Self::internal_error(error.to_string())
            }
        }
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let error_messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    format!(
                        "{}: {}",
                        field,
                        error.message.as_ref().unwrap_or(&"Invalid value".into())
                    )
                })
            })
            .collect();
        Self::validation(error_messages.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_role_becomes_permission_denied() {
        let error: ServiceError = AuthError::InsufficientRole {
            required: Role::Teacher,
        }
        .into();

        match error {
            ServiceError::PermissionDenied { message } => {
                assert_eq!(message, "This action requires the teacher role");
            }
            other => panic!("Expected PermissionDenied, got {:?}", other),
        }
    }
}
