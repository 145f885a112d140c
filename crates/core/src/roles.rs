//! Well-known role name constants.
//!
//! These must match the `ck_users_role` check constraint in the initial
//! migration.

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_EDITOR: &str = "editor";
pub const ROLE_VIEWER: &str = "viewer";
pub const ROLE_DONOR: &str = "donor";
pub const ROLE_SPONSOR: &str = "sponsor";
pub const ROLE_PARTNER: &str = "partner";

/// All valid role names, in display order.
pub const VALID_ROLES: &[&str] = &[
    ROLE_ADMIN,
    ROLE_EDITOR,
    ROLE_VIEWER,
    ROLE_DONOR,
    ROLE_SPONSOR,
    ROLE_PARTNER,
];

/// Role assigned to self-registered accounts.
pub const DEFAULT_ROLE: &str = ROLE_VIEWER;

/// Staff can manage content, newsletters, sponsors and the CMS.
pub fn is_staff(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_EDITOR
}

/// Validate that `role` is one of [`VALID_ROLES`].
pub fn validate_role(role: &str) -> Result<(), CoreError> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid role '{role}'. Must be one of: {}",
            VALID_ROLES.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_and_editor_are_staff() {
        assert!(is_staff(ROLE_ADMIN));
        assert!(is_staff(ROLE_EDITOR));
    }

    #[test]
    fn profile_roles_are_not_staff() {
        for role in [ROLE_VIEWER, ROLE_DONOR, ROLE_SPONSOR, ROLE_PARTNER] {
            assert!(!is_staff(role), "{role} must not be staff");
        }
    }

    #[test]
    fn unknown_role_rejected() {
        assert!(validate_role("superuser").is_err());
        assert!(validate_role(ROLE_SPONSOR).is_ok());
    }
}
