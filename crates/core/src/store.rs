//! The append-only tabular store seam.
//!
//! The submission pipeline appends all rows of a batch in one call. Backends (a Google
//! Sheets worksheet in production, [`MemoryStore`] in development and tests)
//! are constructed once at startup and injected.

use async_trait::async_trait;
use tokio::sync::Mutex;

/// Errors surfaced by a [`TabularStore`] backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Credentials could not be loaded or the token exchange failed.
    #[error("Store authorization failed: {0}")]
    Auth(String),

    /// The request never produced a response (network, DNS, TLS, timeout).
    #[error("Store request failed: {0}")]
    Request(String),

    /// The store answered with a non-2xx status.
    #[error("Store rejected the request ({status}): {body}")]
    Rejected { status: u16, body: String },

    /// The store did not finish within the submission deadline.
    #[error("Store did not answer within {0:?}")]
    Timeout(std::time::Duration),
}

/// A remote table that accepts appended rows.
#[async_trait]
pub trait TabularStore: Send + Sync {
    /// Append `rows` after the last populated row, keeping their order.
    async fn append_rows(&self, rows: &[Vec<String>]) -> Result<(), StoreError>;

    /// Short backend label for logs and the health endpoint.
    fn name(&self) -> &str;
}

/// In-process store that keeps appended rows in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<Vec<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all rows appended so far, in append order.
    pub async fn rows(&self) -> Vec<Vec<String>> {
        self.rows.lock().await.clone()
    }
}

#[async_trait]
impl TabularStore for MemoryStore {
    async fn append_rows(&self, rows: &[Vec<String>]) -> Result<(), StoreError> {
        self.rows.lock().await.extend_from_slice(rows);
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
