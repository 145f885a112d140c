//! Budget Ndio Story API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes, the
//! HTML dashboard) so integration tests and the binary entrypoint can both
//! access them.

pub mod auth;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
