use std::path::PathBuf;

use attendance_sheets::client::DEFAULT_API_URL;

/// Where service account credentials come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsSource {
    /// Raw key JSON, e.g. injected from a secret store.
    Json(String),
    /// Path to the downloaded key file.
    File(PathBuf),
}

/// Google Sheets store settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetsSettings {
    pub credentials: CredentialsSource,
    pub spreadsheet_id: String,
    pub worksheet: String,
    pub api_url: String,
    pub request_timeout_secs: u64,
}

/// Which [`TabularStore`](attendance_core::store::TabularStore) backs submissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    /// Rows are kept in process memory and lost on restart.
    Memory,
    Sheets(SheetsSettings),
}

/// Server configuration loaded from environment variables.
///
/// All fields except the Sheets credentials and spreadsheet ID have
/// defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Deadline for the store append of one submission, in seconds
    /// (default: `20`). Always strictly below `request_timeout_secs` so a
    /// slow store is reported as a store error before the request times out.
    pub store_timeout_secs: u64,
    /// Directory holding the form page and its assets (default: `static`).
    pub static_dir: PathBuf,
    pub store: StoreConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                          |
    /// |---------------------------|----------------------------------|
    /// | `HOST`                    | `0.0.0.0`                        |
    /// | `PORT`                    | `3000`                           |
    /// | `CORS_ORIGINS`            | `http://localhost:5173`          |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                             |
    /// | `STORE_TIMEOUT_SECS`      | `20`                             |
    /// | `STATIC_DIR`              | `static`                         |
    /// | `STORE_BACKEND`           | `sheets` (or `memory`)           |
    /// | `GOOGLE_CREDENTIALS_JSON` | --                               |
    /// | `GOOGLE_CREDENTIALS_FILE` | --                               |
    /// | `SHEETS_SPREADSHEET_ID`   | -- (required for `sheets`)       |
    /// | `SHEETS_WORKSHEET`        | `Sheet1`                         |
    /// | `SHEETS_API_URL`          | `https://sheets.googleapis.com`  |
    ///
    /// # Panics
    ///
    /// Panics on unparsable values, a store timeout not below the request
    /// timeout, an unknown `STORE_BACKEND`, or missing Sheets settings when
    /// the `sheets` backend is selected.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let store_timeout_secs: u64 = std::env::var("STORE_TIMEOUT_SECS")
            .unwrap_or_else(|_| "20".into())
            .parse()
            .expect("STORE_TIMEOUT_SECS must be a valid u64");
        check_timeouts(request_timeout_secs, store_timeout_secs)
            .unwrap_or_else(|msg| panic!("{msg}"));

        let static_dir =
            PathBuf::from(std::env::var("STATIC_DIR").unwrap_or_else(|_| "static".into()));

        let backend = std::env::var("STORE_BACKEND").unwrap_or_else(|_| "sheets".into());
        let store = match backend.trim().to_ascii_lowercase().as_str() {
            "memory" => StoreConfig::Memory,
            "sheets" => StoreConfig::Sheets(sheets_settings_from_env(store_timeout_secs)),
            other => panic!("STORE_BACKEND must be 'sheets' or 'memory', got '{other}'"),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            store_timeout_secs,
            static_dir,
            store,
        }
    }
}

fn sheets_settings_from_env(store_timeout_secs: u64) -> SheetsSettings {
    let credentials = credentials_source(
        std::env::var("GOOGLE_CREDENTIALS_JSON").ok(),
        std::env::var("GOOGLE_CREDENTIALS_FILE").ok(),
    )
    .expect("GOOGLE_CREDENTIALS_JSON or GOOGLE_CREDENTIALS_FILE must be set");

    let spreadsheet_id = std::env::var("SHEETS_SPREADSHEET_ID")
        .expect("SHEETS_SPREADSHEET_ID must be set in the environment");
    assert!(
        !spreadsheet_id.trim().is_empty(),
        "SHEETS_SPREADSHEET_ID must not be empty"
    );

    SheetsSettings {
        credentials,
        spreadsheet_id,
        worksheet: std::env::var("SHEETS_WORKSHEET").unwrap_or_else(|_| "Sheet1".into()),
        api_url: std::env::var("SHEETS_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into()),
        request_timeout_secs: store_timeout_secs,
    }
}

/// Inline JSON wins over a file path; blank values count as unset.
fn credentials_source(json: Option<String>, file: Option<String>) -> Option<CredentialsSource> {
    let json = json.filter(|s| !s.trim().is_empty());
    let file = file.filter(|s| !s.trim().is_empty());

    match (json, file) {
        (Some(json), _) => Some(CredentialsSource::Json(json)),
        (None, Some(path)) => Some(CredentialsSource::File(PathBuf::from(path))),
        (None, None) => None,
    }
}

/// The store deadline must leave room for the response inside the request
/// timeout.
fn check_timeouts(request_timeout_secs: u64, store_timeout_secs: u64) -> Result<(), String> {
    if store_timeout_secs == 0 || store_timeout_secs >= request_timeout_secs {
        return Err(format!(
            "STORE_TIMEOUT_SECS ({store_timeout_secs}) must be at least 1 and below \
             REQUEST_TIMEOUT_SECS ({request_timeout_secs})"
        ));
    }
    Ok(())
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
