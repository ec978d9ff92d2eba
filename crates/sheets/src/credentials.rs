//! Service account key loading.
//!
//! Accepts the JSON key file downloaded from the Google Cloud console. Only
//! the fields needed for the JWT-bearer grant are read; the rest are ignored.

use std::path::Path;

use serde::Deserialize;

use crate::error::SheetsError;

/// Default OAuth2 token endpoint for Google service accounts.
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    /// PEM-encoded RSA private key (PKCS#8 or PKCS#1).
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

// Keeps the private key out of logs.
impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key_id", &self.private_key_id)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

impl ServiceAccountKey {
    /// Parse a key from its JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, SheetsError> {
        let key: Self = serde_json::from_str(json)
            .map_err(|e| SheetsError::Credentials(format!("malformed key JSON: {e}")))?;

        if key.client_email.trim().is_empty() {
            return Err(SheetsError::Credentials(
                "client_email must not be empty".to_string(),
            ));
        }
        if !key.private_key.contains("PRIVATE KEY") {
            return Err(SheetsError::Credentials(
                "private_key is not a PEM private key".to_string(),
            ));
        }

        Ok(key)
    }

    /// Read and parse a key file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SheetsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            SheetsError::Credentials(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&json)
    }
}
