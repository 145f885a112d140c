//! Domain logic for the Budget Ndio Story backend.
//!
//! Everything in this crate is pure: no I/O, no database access. The `db`
//! and `api` crates call into these modules for validation, derived fields,
//! state transitions and dashboard rendering decisions.

pub mod analytics;
pub mod choices;
pub mod cms;
pub mod content;
pub mod dashboard;
pub mod error;
pub mod newsletter;
pub mod roles;
pub mod search;
pub mod slug;
pub mod sponsors;
pub mod types;
