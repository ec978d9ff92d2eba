//! Request extractors that report rejections through [`AppError`].

use axum::extract::FromRequest;

use crate::error::AppError;

/// `axum::Json` whose rejections (malformed JSON, wrong field types, missing
/// content type) become the standard `{error, code}` 400 envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
