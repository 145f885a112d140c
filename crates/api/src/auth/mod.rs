//! Authentication primitives.
//!
//! - [`password`] -- Argon2id hashing, verification and the registration length rule.
//! - [`jwt`] -- access tokens, refresh tokens and the dashboard session cookie.

pub mod jwt;
pub mod password;
