use attendance_core::error::CoreError;
use attendance_core::store::StoreError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `attendance_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The request body was not valid JSON for the expected shape.
    #[error(transparent)]
    Json(#[from] JsonRejection),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Validation(violations) => (
                    StatusCode::BAD_REQUEST,
                    json!({
                        "error": "Please correct the highlighted fields.",
                        "code": "VALIDATION_ERROR",
                        "violations": violations,
                    }),
                ),
                CoreError::BadRequest(msg) => (
                    StatusCode::BAD_REQUEST,
                    json!({ "error": msg, "code": "BAD_REQUEST" }),
                ),
                CoreError::Store { total, source } => {
                    tracing::error!(error = %source, total, "Submission store error");
                    let message = match source {
                        StoreError::Timeout(_) => {
                            "The spreadsheet did not confirm the responses in time. \
                             Please check with the organizer before submitting again."
                        }
                        _ => "The responses could not be saved. Please try again later.",
                    };
                    (
                        StatusCode::BAD_GATEWAY,
                        json!({
                            "error": message,
                            "code": "STORE_ERROR",
                            "rows_submitted": total,
                            "timed_out": matches!(source, StoreError::Timeout(_)),
                        }),
                    )
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal()
                }
            },

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": msg, "code": "BAD_REQUEST" }),
            ),
            AppError::Json(rejection) => {
                let status = match rejection.status() {
                    StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
                    _ => StatusCode::BAD_REQUEST,
                };
                (
                    status,
                    json!({ "error": rejection.body_text(), "code": "BAD_REQUEST" }),
                )
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, serde_json::Value) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({
            "error": "An internal error occurred",
            "code": "INTERNAL_ERROR",
        }),
    )
}
