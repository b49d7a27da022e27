//! Authentication Module
//! Mission: Credential storage, session claims, and RBAC

pub mod api;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod policy;
pub mod user_store;

pub use api::AuthState;
pub use jwt::JwtHandler;
pub use middleware::require_auth;
pub use user_store::UserStore;
