//! Submission pipeline: validate everything, then append every row.
//!
//! Commit is all-or-nothing with respect to validation: a single violation
//! anywhere means zero rows are appended. The rows of a batch go to the store
//! in a single append call, bounded by a deadline, so a slow store surfaces
//! as [`StoreError::Timeout`] instead of an abandoned request.

use std::time::Duration;

use serde::Serialize;

use crate::batch::SubmissionBatch;
use crate::error::CoreError;
use crate::store::{StoreError, TabularStore};
use crate::validation::validate_batch;

/// Acknowledgement shown to the user after a successful submit.
pub const SUCCESS_MESSAGE: &str = "Survey submitted successfully. Responses have been saved.";

/// Outcome of a committed submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionReceipt {
    pub rows_appended: usize,
    pub message: &'static str,
}

/// Run the validation pass only.
pub fn check(batch: &SubmissionBatch) -> Result<(), CoreError> {
    let violations = validate_batch(batch);
    if violations.is_empty() {
        Ok(())
    } else {
        tracing::warn!(
            adge = %batch.adge_name,
            violations = violations.len(),
            "Submission rejected by validation"
        );
        Err(CoreError::Validation(violations))
    }
}

/// Validate `batch` and, if clean, append one row per record to `store`.
///
/// `deadline` bounds the store call as a whole (token exchange included).
pub async fn submit(
    store: &dyn TabularStore,
    batch: &SubmissionBatch,
    deadline: Duration,
) -> Result<SubmissionReceipt, CoreError> {
    check(batch)?;

    let rows = batch.rows();
    let total = rows.len();

    let outcome = match tokio::time::timeout(deadline, store.append_rows(&rows)).await {
        Ok(result) => result,
        Err(_) => Err(StoreError::Timeout(deadline)),
    };

    if let Err(source) = outcome {
        tracing::error!(
            store = store.name(),
            total,
            error = %source,
            "Batch append failed"
        );
        return Err(CoreError::Store { total, source });
    }

    tracing::info!(
        store = store.name(),
        adge = %batch.adge_name,
        rows = total,
        "Submission committed"
    );

    Ok(SubmissionReceipt {
        rows_appended: total,
        message: SUCCESS_MESSAGE,
    })
}
