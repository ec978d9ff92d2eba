//! Route definitions for the `/registrations` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::registration;
use crate::state::AppState;

/// Routes mounted at `/registrations`.
///
/// ```text
/// POST   /           -> submit    (validate, then append rows)
/// POST   /validate   -> validate  (dry-run, never appends)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(registration::submit))
        .route("/validate", post(registration::validate))
}
