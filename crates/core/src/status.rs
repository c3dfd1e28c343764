//! Wishlist lifecycle status and privacy values.
//!
//! Stored as plain TEXT columns guarded by CHECK constraints; these lists
//! must stay in sync with the wishlist migration.

pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_INACTIVE: &str = "inactive";
pub const STATUS_DISABLED: &str = "disabled";
pub const STATUS_PENDING: &str = "pending";
pub const STATUS_ARCHIVED: &str = "archived";
pub const STATUS_SUSPENDED: &str = "suspended";
pub const STATUS_DELETED: &str = "deleted";

pub const WISHLIST_STATUSES: &[&str] = &[
    STATUS_ACTIVE,
    STATUS_INACTIVE,
    STATUS_DISABLED,
    STATUS_PENDING,
    STATUS_ARCHIVED,
    STATUS_SUSPENDED,
    STATUS_DELETED,
];

pub const PRIVACY_PRIVATE: &str = "private";
pub const PRIVACY_PUBLIC: &str = "public";

pub const PRIVACY_LEVELS: &[&str] = &[PRIVACY_PRIVATE, PRIVACY_PUBLIC];

/// Validate an optional status value. `None` is accepted (the column default applies).
pub fn validate_status(status: Option<&str>) -> Result<(), String> {
    match status {
        Some(s) if !WISHLIST_STATUSES.contains(&s) => Err(format!(
            "Invalid status '{s}'. Must be one of: {}",
            WISHLIST_STATUSES.join(", ")
        )),
        _ => Ok(()),
    }
}

/// Validate an optional privacy value. `None` is accepted (the column default applies).
pub fn validate_privacy(privacy: Option<&str>) -> Result<(), String> {
    match privacy {
        Some(p) if !PRIVACY_LEVELS.contains(&p) => Err(format!(
            "Invalid privacy '{p}'. Must be one of: {}",
            PRIVACY_LEVELS.join(", ")
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_known_status_validates() {
        for s in WISHLIST_STATUSES {
            assert!(validate_status(Some(s)).is_ok(), "{s} should be valid");
        }
        assert!(validate_status(None).is_ok());
    }

    #[test]
    fn unknown_status_lists_allowed_values() {
        let err = validate_status(Some("frozen")).unwrap_err();
        assert!(err.contains("frozen"));
        assert!(err.contains("archived"));
    }

    #[test]
    fn privacy_is_lowercase_only() {
        assert!(validate_privacy(Some("public")).is_ok());
        assert!(validate_privacy(Some("Public")).is_err());
    }
}
