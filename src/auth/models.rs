//! Authentication Models
//! Mission: Define account, role, and session-claim data structures

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // bcrypt hash - never serialize
    pub role: Role,
    pub created_at: String,
}

/// User roles for RBAC
///
/// Persisted and transmitted as the literal strings `STUDENT`, `PROF`, `ADMIN`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "STUDENT")]
    Student, // Default for new accounts; training access
    #[serde(rename = "PROF")]
    Prof, // Creates training content
    #[serde(rename = "ADMIN")]
    Admin, // Full access to all endpoints
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "STUDENT",
            Role::Prof => "PROF",
            Role::Admin => "ADMIN",
        }
    }

    /// Parse a role from its wire/store representation. Exact match only:
    /// anything outside the closed enumeration is rejected at the boundary.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "STUDENT" => Some(Role::Student),
            "PROF" => Some(Role::Prof),
            "ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }

    /// All roles, in declaration order. Used by policy tests for totality checks.
    pub fn all() -> &'static [Role] {
        &[Role::Student, Role::Prof, Role::Admin]
    }
}

/// JWT Claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // subject (account id)
    pub role: Role,  // role snapshot at issuance time
    pub exp: usize,  // expiration timestamp
}

/// Resolved per-request identity, attached to request extensions by the
/// session validator. The role here is the account's live role, re-read from
/// the store on every request, not the snapshot embedded in the claim.
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
}

impl Identity {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
        }
    }
}

/// Registration request body
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login request body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Role-change request body. The role arrives as a raw string so that values
/// outside the enumeration map to a 400 InvalidRole instead of a decode error.
#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: String,
}

/// Login/registration response: the sanitized account plus a bearer token
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub token: String,
}

impl AuthResponse {
    pub fn from_user(user: &User, token: String) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            token,
        }
    }
}

/// User response (sanitized, no token)
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl UserResponse {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

/// Admin listing entry
#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl UserSummary {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            created_at: user.created_at.clone(),
        }
    }
}
