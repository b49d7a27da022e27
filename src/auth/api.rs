//! Authentication API Endpoints
//! Mission: Registration, login, and user administration handlers

use crate::auth::{
    jwt::JwtHandler,
    models::{
        AuthResponse, Identity, LoginRequest, RegisterRequest, Role, UpdateRoleRequest,
        UserResponse, UserSummary,
    },
    policy::{self, Action},
    user_store::UserStore,
};
use crate::errors::ApiError;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Shared auth state
#[derive(Clone)]
pub struct AuthState {
    pub user_store: Arc<UserStore>,
    pub jwt_handler: Arc<JwtHandler>,
}

impl AuthState {
    pub fn new(user_store: Arc<UserStore>, jwt_handler: Arc<JwtHandler>) -> Self {
        Self {
            user_store,
            jwt_handler,
        }
    }
}

/// Register endpoint - POST /api/auth/register
///
/// New accounts always start as STUDENT; callers never self-select a role.
/// Succeeds with 201 and logs the new account in (token in the body).
pub async fn register(
    State(state): State<AuthState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let user =
        state
            .user_store
            .create_user(&payload.email, &payload.name, &payload.password, Role::Student)?;

    let (token, _expires_in) = state
        .jwt_handler
        .generate_token(&user)
        .map_err(|e| {
            warn!("Token generation failed: {}", e);
            ApiError::Internal
        })?;

    info!(email = %user.email, "Registered new account");

    Ok((StatusCode::CREATED, Json(AuthResponse::from_user(&user, token))))
}

/// Login endpoint - POST /api/auth/login
pub async fn login(
    State(state): State<AuthState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let user = state
        .user_store
        .verify_credentials(&payload.email, &payload.password)
        .map_err(|e| {
            warn!(email = %payload.email, "Failed login attempt");
            ApiError::from(e)
        })?;

    let (token, _expires_in) = state
        .jwt_handler
        .generate_token(&user)
        .map_err(|e| {
            warn!("Token generation failed: {}", e);
            ApiError::Internal
        })?;

    info!(email = %user.email, role = user.role.as_str(), "Login successful");

    Ok(Json(AuthResponse::from_user(&user, token)))
}

/// Get current user info - GET /api/auth/me
///
/// The identity comes from the validator, which already re-fetched the
/// account, so the role here reflects the store, not the token snapshot.
pub async fn me(Extension(identity): Extension<Identity>) -> Result<Json<UserResponse>, ApiError> {
    policy::authorize(&identity, Action::ReadOwnProfile)?;

    Ok(Json(UserResponse {
        id: identity.id.to_string(),
        name: identity.name,
        email: identity.email,
        role: identity.role,
    }))
}

/// List all users - GET /api/users (Admin only)
pub async fn list_users(
    State(state): State<AuthState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Vec<UserSummary>>, ApiError> {
    policy::authorize(&identity, Action::ListUsers)?;

    let users = state.user_store.list_users()?;
    let response: Vec<UserSummary> = users.iter().map(UserSummary::from_user).collect();

    Ok(Json(response))
}

/// Update a user's role - PUT /api/users/:id/role (Admin only)
///
/// The role string is validated against the closed enumeration before any
/// write; an unknown role fails with 400 and leaves the account untouched.
pub async fn update_role(
    State(state): State<AuthState>,
    Extension(identity): Extension<Identity>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<UpdateRoleRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    policy::authorize(&identity, Action::ChangeRole)?;

    let role = Role::from_str(&payload.role).ok_or(ApiError::InvalidRole)?;

    let updated = state.user_store.update_role(&user_id, role)?;

    info!(
        admin = %identity.id,
        target = %updated.id,
        role = role.as_str(),
        "Role changed"
    );

    Ok(Json(UserResponse::from_user(&updated)))
}
