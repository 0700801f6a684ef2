//! Well-known role name constants carried in the `role` claim of access tokens.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_STAFF: &str = "staff";

/// Roles allowed into the back-office endpoints.
pub const STAFF_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_STAFF];

/// Whether `role` grants access to staff-only endpoints.
pub fn is_staff(role: &str) -> bool {
    STAFF_ROLES.contains(&role)
}
