//! Application router: the registration API, the health probe, and the form
//! page, wrapped in one middleware stack.
//!
//! The binary and the integration tests both build the app through
//! [`build_app_router`].

use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, Method, StatusCode};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::ServerConfig;
use crate::routes;
use crate::state::AppState;

/// Largest accepted request body. A full form of `MAX_EMPLOYEES` records is
/// a few tens of kilobytes.
pub const MAX_BODY_BYTES: usize = 256 * 1024;

const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Build the full application [`Router`].
///
/// Layers run outermost first, in the order listed in the `ServiceBuilder`:
/// CORS, request id assignment, tracing, request id echo, request timeout,
/// panic recovery. Unmatched paths fall through to `config.static_dir`.
pub fn build_app_router(state: AppState, config: &ServerConfig) -> Router {
    let api = routes::api_routes().layer(DefaultBodyLimit::max(MAX_BODY_BYTES));

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", api)
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(REQUEST_ID_HEADER, MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(PropagateRequestIdLayer::new(REQUEST_ID_HEADER))
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    Duration::from_secs(config.request_timeout_secs),
                ))
                .layer(CatchPanicLayer::new()),
        )
        .layer(build_cors_layer(config))
        .with_state(state)
}

/// CORS for a browser form posting JSON: `GET` for the page and health,
/// `POST` for submissions, `Content-Type` as the only custom header.
///
/// Panics at startup on an unparsable origin.
pub fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<_> = config
        .cors_origins
        .iter()
        .map(|o| {
            o.parse()
                .unwrap_or_else(|e| panic!("Invalid CORS origin '{o}': {e}"))
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(3600))
}
