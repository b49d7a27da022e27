//! Client-side route guard mirror.
//!
//! Mirrors the access policy at the presentation boundary so navigation can
//! be redirected before a request is ever made. This is UX only: it reads a
//! locally cached session claim, performs zero network validation, and is
//! never a security boundary. The server-side validator and policy remain
//! the only authoritative decision.

use crate::auth::models::{Claims, Role};

/// Guard decision for a route render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// Session not yet resolved; render nothing/loading
    Unknown,
    /// No usable identity, or role outside the route's allowed set;
    /// redirect to login or home
    Denied,
    /// Render the guarded content
    Allowed,
}

/// The locally cached session, read once at load and held in memory.
#[derive(Debug, Clone)]
pub enum CachedSession {
    /// Storage has not been read yet
    Loading,
    /// Storage read, no claim present
    Absent,
    /// A claim was found in storage (not validated against the server)
    Present(Claims),
}

/// Evaluate a route's guard against the cached session.
///
/// `now` is the current unix timestamp; a claim at or past its expiry is
/// treated as absent. `allowed_roles` is the route's declared set; an empty
/// set admits no one.
pub fn evaluate(session: &CachedSession, allowed_roles: &[Role], now: usize) -> GuardState {
    match session {
        CachedSession::Loading => GuardState::Unknown,
        CachedSession::Absent => GuardState::Denied,
        CachedSession::Present(claims) => {
            if claims.exp <= now {
                return GuardState::Denied;
            }
            if allowed_roles.contains(&claims.role) {
                GuardState::Allowed
            } else {
                GuardState::Denied
            }
        }
    }
}
