//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- the caller, from a Bearer token or the `bns_access` cookie.
//! - [`auth::MaybeAuth`] -- the caller if credentials were sent, for public routes.
//! - [`rbac::RequireAuth`] -- any authenticated user.
//! - [`rbac::RequireStaff`] -- `admin` or `editor`.
//! - [`rbac::RequireAdmin`] -- `admin` only.
//! - [`client::ClientMeta`] -- caller address and user agent.

pub mod auth;
pub mod client;
pub mod rbac;
