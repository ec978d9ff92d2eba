//! Startup construction of the configured [`TabularStore`].

use std::sync::Arc;
use std::time::Duration;

use attendance_core::store::{MemoryStore, TabularStore};
use attendance_sheets::{ServiceAccountKey, SheetsClient, SheetsConfig, SheetsError};

use crate::config::{CredentialsSource, StoreConfig};

/// Build the store selected by configuration. Credentials are read here,
/// once, and owned by the returned client.
pub fn build_store(config: &StoreConfig) -> Result<Arc<dyn TabularStore>, SheetsError> {
    match config {
        StoreConfig::Memory => {
            tracing::warn!("Using in-memory store; submissions are not persisted");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreConfig::Sheets(settings) => {
            let key = match &settings.credentials {
                CredentialsSource::Json(json) => ServiceAccountKey::from_json_str(json)?,
                CredentialsSource::File(path) => ServiceAccountKey::from_file(path)?,
            };
            tracing::info!(
                client_email = %key.client_email,
                spreadsheet = %settings.spreadsheet_id,
                worksheet = %settings.worksheet,
                "Loaded service account credentials"
            );

            let client = SheetsClient::new(
                SheetsConfig {
                    api_url: settings.api_url.clone(),
                    spreadsheet_id: settings.spreadsheet_id.clone(),
                    worksheet: settings.worksheet.clone(),
                    request_timeout: Duration::from_secs(settings.request_timeout_secs),
                },
                key,
            )?;
            Ok(Arc::new(client))
        }
    }
}
