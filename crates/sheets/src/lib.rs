//! Google Sheets backend for the attendance form.
//!
//! Authenticates as a service account (OAuth2 JWT-bearer grant), caches the
//! access token, and appends rows to one worksheet through the Sheets v4
//! `values:append` endpoint. [`client::SheetsClient`] implements
//! [`attendance_core::store::TabularStore`].

pub mod client;
pub mod credentials;
pub mod error;
pub mod token;

pub use client::{SheetsClient, SheetsConfig};
pub use credentials::ServiceAccountKey;
pub use error::SheetsError;
