use std::sync::Arc;

use attendance_core::store::TabularStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Append target for validated submissions, built once at startup.
    pub store: Arc<dyn TabularStore>,
}
