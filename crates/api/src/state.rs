use std::sync::Arc;

use crate::config::ServerConfig;
use crate::dashboard::DashboardRenderer;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: bns_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Compiled dashboard templates.
    pub dashboard: Arc<DashboardRenderer>,
}
