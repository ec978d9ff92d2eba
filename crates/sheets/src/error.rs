use attendance_core::store::StoreError;

/// Errors from the Google Sheets client layer.
#[derive(Debug, thiserror::Error)]
pub enum SheetsError {
    /// The service account key could not be read or parsed.
    #[error("Invalid service account credentials: {0}")]
    Credentials(String),

    /// The private key could not sign the token assertion.
    #[error("Failed to sign token assertion: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    /// The OAuth2 token endpoint returned a non-2xx status.
    #[error("Token exchange failed ({status}): {body}")]
    Token { status: u16, body: String },

    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The Sheets API returned a non-2xx status.
    #[error("Sheets API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Invalid Sheets API URL: {0}")]
    Url(String),
}

impl From<SheetsError> for StoreError {
    fn from(err: SheetsError) -> Self {
        match err {
            SheetsError::Credentials(_) | SheetsError::Signing(_) | SheetsError::Token { .. } => {
                StoreError::Auth(err.to_string())
            }
            SheetsError::Request(e) => StoreError::Request(e.to_string()),
            SheetsError::Api { status, body } => StoreError::Rejected { status, body },
            SheetsError::Url(msg) => StoreError::Request(msg),
        }
    }
}
