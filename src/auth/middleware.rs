//! Authentication Middleware
//! Mission: Validate session claims and resolve them to live accounts
//!
//! Runs in front of every protected route. A request only reaches a handler
//! after the bearer token's signature and expiry check out AND the subject
//! still exists in the store; the resolved identity (with the account's
//! current role, not the claim's snapshot) is attached to request extensions.

use crate::auth::api::AuthState;
use crate::auth::models::Identity;
use crate::errors::ApiError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::debug;
use uuid::Uuid;

/// Pull the bearer token out of the Authorization header.
fn bearer_token(req: &Request) -> Option<&str> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
}

/// Auth middleware that validates session claims
pub async fn require_auth(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(&req).ok_or(ApiError::Unauthenticated)?;

    // Signature + expiry
    let claims = state
        .jwt_handler
        .validate_token(token)
        .map_err(|_| ApiError::Unauthenticated)?;

    // Resolve the subject against the store. A claim for a deleted account
    // is as dead as a tampered one.
    let subject = Uuid::parse_str(&claims.sub).map_err(|_| ApiError::Unauthenticated)?;
    let user = state
        .user_store
        .get_user_by_id(&subject)?
        .ok_or(ApiError::Unauthenticated)?;

    debug!(subject = %user.id, role = user.role.as_str(), "Authenticated request");

    req.extensions_mut().insert(Identity::from_user(&user));

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request as HttpRequest;

    #[test]
    fn test_bearer_token_extraction() {
        let req = HttpRequest::builder()
            .header("Authorization", "Bearer abc.def.ghi")
            .body(Body::empty())
            .unwrap();
        assert_eq!(bearer_token(&req), Some("abc.def.ghi"));
    }

    #[test]
    fn test_missing_or_malformed_header() {
        let no_header = HttpRequest::new(Body::empty());
        assert_eq!(bearer_token(&no_header), None);

        let wrong_scheme = HttpRequest::builder()
            .header("Authorization", "Basic dXNlcjpwYXNz")
            .body(Body::empty())
            .unwrap();
        assert_eq!(bearer_token(&wrong_scheme), None);
    }
}
