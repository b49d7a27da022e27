//! API error taxonomy and HTTP mapping.
//!
//! Every handler failure funnels through `ApiError`, which fixes the status
//! code and a short human-readable message per variant. Internal detail is
//! logged server-side and never reaches the caller.

use crate::auth::user_store::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

#[derive(Debug)]
pub enum ApiError {
    /// Registration against an email that already has an account
    DuplicateEmail,
    /// Login failure; one message for unknown email and wrong password
    InvalidCredentials,
    /// Missing/invalid/expired token, or subject no longer exists
    Unauthenticated,
    /// Valid identity, insufficient role
    Forbidden,
    /// Role-change payload outside the closed enumeration
    InvalidRole,
    /// Target of an operation does not exist
    NotFound,
    /// Anything else; logged, reported generically
    Internal,
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateEmail => ApiError::DuplicateEmail,
            StoreError::InvalidCredentials => ApiError::InvalidCredentials,
            StoreError::NotFound => ApiError::NotFound,
            StoreError::Database(_) | StoreError::Hash(_) => {
                error!("Store failure: {}", e);
                ApiError::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::DuplicateEmail => (StatusCode::BAD_REQUEST, "User already exists"),
            ApiError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid email or password")
            }
            ApiError::Unauthenticated => (StatusCode::UNAUTHORIZED, "Authentication required"),
            ApiError::Forbidden => (StatusCode::FORBIDDEN, "Insufficient permissions"),
            ApiError::InvalidRole => (StatusCode::BAD_REQUEST, "Invalid role"),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Not found"),
            ApiError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Server error"),
        };

        (status, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::DuplicateEmail.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::InvalidCredentials.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Unauthenticated.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Forbidden.into_response().status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::InvalidRole.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Internal.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_store_errors_translate() {
        assert!(matches!(
            ApiError::from(StoreError::DuplicateEmail),
            ApiError::DuplicateEmail
        ));
        assert!(matches!(
            ApiError::from(StoreError::InvalidCredentials),
            ApiError::InvalidCredentials
        ));
        assert!(matches!(
            ApiError::from(StoreError::NotFound),
            ApiError::NotFound
        ));
    }
}
