//! Request extractors enforcing authentication and role checks.
//!
//! - [`auth::AuthUser`] -- the caller behind a valid bearer token.
//! - [`rbac::RequireAdmin`] -- the caller must hold the `admin` role.
//! - [`rbac::RequireAuth`] -- any authenticated caller.
//! - [`auth::MaybeAuthUser`] -- optional authentication for public reads.

pub mod auth;
pub mod rbac;
