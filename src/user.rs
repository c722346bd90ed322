//! The session user and role types shared between the auth cookie layer and
//! the navigation sidebar.

use serde::{Deserialize, Serialize};

/// The name of the role that unlocks the admin navigation items and routes.
pub const ADMIN_ROLE_NAME: &str = "Admin";

/// A role assigned to a user by the backend, e.g. "Admin".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// The backend's name for the role. Compared case-sensitively.
    pub role_name: String,
}

/// The logged in user as stored in the session cookie.
///
/// Written at log in, read on every request and cleared at log out. The
/// cookie layer treats a missing or malformed value as "not logged in", so
/// code receiving a [SessionUser] can rely on the username being present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// The unique username, used for expense row ownership checks.
    pub username: String,
    /// The user's role, if the backend assigned one.
    #[serde(default)]
    pub role: Option<Role>,
}

impl SessionUser {
    /// Whether this user holds the admin role.
    ///
    /// The comparison is an exact, case-sensitive match against
    /// [ADMIN_ROLE_NAME]. A missing role means a regular user.
    pub fn is_admin(&self) -> bool {
        self.role
            .as_ref()
            .is_some_and(|role| role.role_name == ADMIN_ROLE_NAME)
    }
}

#[cfg(test)]
mod session_user_tests {
    use super::{Role, SessionUser};

    fn user_with_role(role_name: &str) -> SessionUser {
        SessionUser {
            username: "alice".to_owned(),
            role: Some(Role {
                role_name: role_name.to_owned(),
            }),
        }
    }

    #[test]
    fn admin_role_is_detected() {
        assert!(user_with_role("Admin").is_admin());
    }

    #[test]
    fn role_comparison_is_case_sensitive() {
        assert!(!user_with_role("admin").is_admin());
        assert!(!user_with_role("ADMIN").is_admin());
    }

    #[test]
    fn missing_role_is_not_admin() {
        let user = SessionUser {
            username: "bob".to_owned(),
            role: None,
        };

        assert!(!user.is_admin());
    }
}
