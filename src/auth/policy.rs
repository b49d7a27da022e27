//! Access Policy
//! Mission: One declarative map from protected operation to permitted roles
//!
//! Pure and total: every (role, action) pair has a defined answer, and the
//! answer is allow iff the role is a member of the action's required set.
//! Runs strictly after the session validator has resolved an identity.

use crate::auth::models::{Identity, Role};
use crate::errors::ApiError;

/// Every operation the API exposes. Adding an endpoint without extending
/// this enum (and the match below) is a compile error at the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Register,
    Login,
    ReadOwnProfile,
    ListUsers,
    ChangeRole,
    ViewTraining,
    SubmitTraining,
    CreateTraining,
}

/// Roles permitted to invoke an action. `None` means the action is public
/// and never reaches `authorize`.
pub fn required_roles(action: Action) -> Option<&'static [Role]> {
    match action {
        Action::Register | Action::Login => None,
        Action::ReadOwnProfile => Some(&[Role::Student, Role::Prof, Role::Admin]),
        Action::ListUsers | Action::ChangeRole => Some(&[Role::Admin]),
        Action::ViewTraining | Action::SubmitTraining => Some(&[Role::Student, Role::Admin]),
        Action::CreateTraining => Some(&[Role::Prof, Role::Admin]),
    }
}

/// Allow iff the identity's role is in the action's required set.
/// Deny-by-default: an action with a declared set admits only listed roles.
pub fn authorize(identity: &Identity, action: Action) -> Result<(), ApiError> {
    match required_roles(action) {
        None => Ok(()),
        Some(roles) if roles.contains(&identity.role) => Ok(()),
        Some(_) => Err(ApiError::Forbidden),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn identity(role: Role) -> Identity {
        Identity {
            id: Uuid::new_v4(),
            email: "t@example.com".to_string(),
            name: "T".to_string(),
            role,
        }
    }

    const ALL_ACTIONS: &[Action] = &[
        Action::Register,
        Action::Login,
        Action::ReadOwnProfile,
        Action::ListUsers,
        Action::ChangeRole,
        Action::ViewTraining,
        Action::SubmitTraining,
        Action::CreateTraining,
    ];

    #[test]
    fn test_policy_is_total() {
        // Every (role, action) pair has a defined answer and it matches
        // membership in the declared set.
        for &role in Role::all() {
            for &action in ALL_ACTIONS {
                let allowed = authorize(&identity(role), action).is_ok();
                let expected = match required_roles(action) {
                    None => true,
                    Some(roles) => roles.contains(&role),
                };
                assert_eq!(allowed, expected, "role {:?} action {:?}", role, action);
            }
        }
    }

    #[test]
    fn test_admin_surface() {
        assert!(authorize(&identity(Role::Admin), Action::ListUsers).is_ok());
        assert!(authorize(&identity(Role::Admin), Action::ChangeRole).is_ok());
        assert!(authorize(&identity(Role::Student), Action::ListUsers).is_err());
        assert!(authorize(&identity(Role::Prof), Action::ChangeRole).is_err());
    }

    #[test]
    fn test_training_surface() {
        // Students and admins train; profs author.
        assert!(authorize(&identity(Role::Student), Action::ViewTraining).is_ok());
        assert!(authorize(&identity(Role::Student), Action::SubmitTraining).is_ok());
        assert!(authorize(&identity(Role::Student), Action::CreateTraining).is_err());

        assert!(authorize(&identity(Role::Prof), Action::CreateTraining).is_ok());
        assert!(authorize(&identity(Role::Prof), Action::ViewTraining).is_err());

        assert!(authorize(&identity(Role::Admin), Action::ViewTraining).is_ok());
        assert!(authorize(&identity(Role::Admin), Action::CreateTraining).is_ok());
    }

    #[test]
    fn test_any_authenticated_role_reads_own_profile() {
        for &role in Role::all() {
            assert!(authorize(&identity(role), Action::ReadOwnProfile).is_ok());
        }
    }
}
