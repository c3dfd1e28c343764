//! Well-known role name constants.
//!
//! These must match the seed data in `20261001000001_create_roles_and_users.sql`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";

/// Every role name the service understands.
pub const ALL_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_USER];

/// Check whether a role name is one of the seeded roles.
pub fn is_valid_role(role: &str) -> bool {
    ALL_ROLES.contains(&role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_roles_are_valid() {
        assert!(is_valid_role("admin"));
        assert!(is_valid_role("user"));
    }

    #[test]
    fn unknown_and_mis_cased_roles_are_rejected() {
        assert!(!is_valid_role("Admin"));
        assert!(!is_valid_role("stylist"));
        assert!(!is_valid_role(""));
    }
}
