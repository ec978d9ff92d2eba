//! Domain logic for the event attendance registration form.
//!
//! Holds the submission data model, the field validators, the
//! all-or-nothing submission pipeline, and the [`store::TabularStore`]
//! seam that external spreadsheet backends implement.

pub mod batch;
pub mod error;
pub mod store;
pub mod submission;
pub mod validation;
