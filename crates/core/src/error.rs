use crate::store::StoreError;
use crate::validation::Violation;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed with {} violation(s)", .0.len())]
    Validation(Vec<Violation>),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The batch append failed or timed out. A rejected append writes
    /// nothing; after a timeout the store's outcome is unknown.
    #[error("Store error while appending {total} row(s): {source}")]
    Store {
        total: usize,
        #[source]
        source: StoreError,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}
