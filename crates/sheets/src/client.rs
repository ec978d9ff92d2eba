//! REST client for the Sheets v4 `values:append` endpoint.
//!
//! A submission is one append request regardless of batch size, which keeps
//! a batch inside the per-user write quota and avoids half-written batches.

use std::time::Duration;

use async_trait::async_trait;
use attendance_core::store::{StoreError, TabularStore};
use reqwest::Url;
use serde::Deserialize;

use crate::credentials::ServiceAccountKey;
use crate::error::SheetsError;
use crate::token::{TokenProvider, SPREADSHEETS_SCOPE};

/// Default base URL of the Sheets API.
pub const DEFAULT_API_URL: &str = "https://sheets.googleapis.com";

/// Which worksheet to append to, and where the API lives.
#[derive(Debug, Clone)]
pub struct SheetsConfig {
    /// Base URL, e.g. `https://sheets.googleapis.com`.
    pub api_url: String,
    /// Spreadsheet ID from the sheet's URL.
    pub spreadsheet_id: String,
    /// Worksheet (tab) name, used as the append range.
    pub worksheet: String,
    /// Timeout for a single HTTP request.
    pub request_timeout: Duration,
}

/// Body returned by `values:append`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendResponse {
    #[serde(default)]
    pub table_range: Option<String>,
    #[serde(default)]
    pub updates: Option<AppendUpdates>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendUpdates {
    #[serde(default)]
    pub updated_range: Option<String>,
    #[serde(default)]
    pub updated_rows: Option<u32>,
}

/// Authorized client bound to one worksheet.
pub struct SheetsClient {
    http: reqwest::Client,
    config: SheetsConfig,
    tokens: TokenProvider,
}

impl SheetsClient {
    /// Build a client. The HTTP client is shared by API and token requests.
    pub fn new(config: SheetsConfig, key: ServiceAccountKey) -> Result<Self, SheetsError> {
        if config.spreadsheet_id.trim().is_empty() {
            return Err(SheetsError::Url("spreadsheet id must not be empty".to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        let tokens = TokenProvider::new(http.clone(), key, SPREADSHEETS_SCOPE)?;

        Ok(Self {
            http,
            config,
            tokens,
        })
    }

    pub fn config(&self) -> &SheetsConfig {
        &self.config
    }

    /// `{api}/v4/spreadsheets/{id}/values/{worksheet}:append` with RAW input
    /// and row insertion.
    ///
    /// RAW keeps values as typed text, so phone numbers keep leading zeros.
    pub fn append_url(&self) -> Result<Url, SheetsError> {
        let mut url = Url::parse(&self.config.api_url)
            .map_err(|e| SheetsError::Url(format!("{}: {e}", self.config.api_url)))?;

        let range = format!("{}:append", self.config.worksheet);
        url.path_segments_mut()
            .map_err(|()| SheetsError::Url(format!("{} cannot be a base", self.config.api_url)))?
            .pop_if_empty()
            .extend([
                "v4",
                "spreadsheets",
                self.config.spreadsheet_id.as_str(),
                "values",
                range.as_str(),
            ]);

        url.query_pairs_mut()
            .append_pair("valueInputOption", "RAW")
            .append_pair("insertDataOption", "INSERT_ROWS");

        Ok(url)
    }

    /// Append `rows` after the last row of the worksheet's table in one
    /// request. Sheets applies a single append atomically, in row order.
    pub async fn append_rows(&self, rows: &[Vec<String>]) -> Result<AppendResponse, SheetsError> {
        let token = self.tokens.access_token().await?;
        let body = serde_json::json!({
            "majorDimension": "ROWS",
            "values": rows,
        });

        let response = self
            .http
            .post(self.append_url()?)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(SheetsError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: AppendResponse = response.json().await?;
        tracing::debug!(
            spreadsheet = %self.config.spreadsheet_id,
            rows = rows.len(),
            updated_range = parsed
                .updates
                .as_ref()
                .and_then(|u| u.updated_range.as_deref())
                .unwrap_or("?"),
            "Appended rows"
        );
        Ok(parsed)
    }
}

#[async_trait]
impl TabularStore for SheetsClient {
    async fn append_rows(&self, rows: &[Vec<String>]) -> Result<(), StoreError> {
        SheetsClient::append_rows(self, rows).await?;
        Ok(())
    }

    fn name(&self) -> &str {
        "google-sheets"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_KEY: &str = include_str!("../tests/fixtures/test_key.pem");

    fn client(api_url: &str, worksheet: &str) -> SheetsClient {
        let key = ServiceAccountKey {
            client_email: "form@events.iam.gserviceaccount.com".to_string(),
            private_key: TEST_KEY.to_string(),
            private_key_id: None,
            token_uri: "https://oauth2.example.test/token".to_string(),
        };
        let config = SheetsConfig {
            api_url: api_url.to_string(),
            spreadsheet_id: "1AbC".to_string(),
            worksheet: worksheet.to_string(),
            request_timeout: Duration::from_secs(5),
        };
        SheetsClient::new(config, key).unwrap()
    }

    #[test]
    fn append_url_shape() {
        let url = client(DEFAULT_API_URL, "Sheet1").append_url().unwrap();
        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/1AbC/values/Sheet1:append\
             ?valueInputOption=RAW&insertDataOption=INSERT_ROWS"
        );
    }

    #[test]
    fn append_url_encodes_worksheet_and_tolerates_trailing_slash() {
        let url = client("http://127.0.0.1:9000/", "Event Responses")
            .append_url()
            .unwrap();
        assert_eq!(url.path(), "/v4/spreadsheets/1AbC/values/Event%20Responses:append");
    }

    #[test]
    fn empty_spreadsheet_id_is_rejected() {
        let key = ServiceAccountKey {
            client_email: "a@b.iam".to_string(),
            private_key: TEST_KEY.to_string(),
            private_key_id: None,
            token_uri: "https://oauth2.example.test/token".to_string(),
        };
        let config = SheetsConfig {
            api_url: DEFAULT_API_URL.to_string(),
            spreadsheet_id: " ".to_string(),
            worksheet: "Sheet1".to_string(),
            request_timeout: Duration::from_secs(5),
        };
        assert!(SheetsClient::new(config, key).is_err());
    }

    #[test]
    fn api_error_maps_to_rejected_store_error() {
        let err: StoreError = SheetsError::Api {
            status: 404,
            body: "Requested entity was not found.".to_string(),
        }
        .into();
        assert!(matches!(err, StoreError::Rejected { status: 404, .. }));
    }

    #[test]
    fn token_error_maps_to_auth_store_error() {
        let err: StoreError = SheetsError::Token {
            status: 400,
            body: "invalid_grant".to_string(),
        }
        .into();
        assert!(matches!(err, StoreError::Auth(msg) if msg.contains("invalid_grant")));
    }
}
