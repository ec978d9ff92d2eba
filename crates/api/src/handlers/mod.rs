//! Request handlers. Each submodule maps one resource's requests onto
//! `attendance_core` and converts errors via [`AppError`](crate::error::AppError).

pub mod registration;
