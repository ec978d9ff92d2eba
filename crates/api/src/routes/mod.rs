pub mod health;
pub mod registration;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /registrations             submit a batch (POST)
/// /registrations/validate    dry-run validation (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/registrations", registration::router())
}
