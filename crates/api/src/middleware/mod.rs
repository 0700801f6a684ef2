//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the caller from a JWT Bearer token.
//! - [`rbac::RequireStaff`] -- Requires a staff role (`admin` or `staff`).

pub mod auth;
pub mod rbac;
