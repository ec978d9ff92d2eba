//! OAuth2 access tokens for a service account.
//!
//! Signs an RS256 JWT assertion with the service account key, exchanges it
//! at the key's `token_uri` for a bearer token, and caches that token until
//! shortly before it expires.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::credentials::ServiceAccountKey;
use crate::error::SheetsError;

/// Scope needed to append values to a spreadsheet.
pub const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

const GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Lifetime requested for each assertion (Google's maximum).
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Tokens are refreshed this long before they actually expire.
const REFRESH_MARGIN_SECS: i64 = 60;

/// Claims of the JWT-bearer assertion.
#[derive(Debug, Serialize, Deserialize)]
pub struct AssertionClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(REFRESH_MARGIN_SECS) < self.expires_at
    }
}

/// Issues and caches bearer tokens for one service account.
pub struct TokenProvider {
    http: reqwest::Client,
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    scope: String,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenProvider {
    /// Build a provider. Fails if the private key is not a valid RSA PEM.
    pub fn new(
        http: reqwest::Client,
        key: ServiceAccountKey,
        scope: impl Into<String>,
    ) -> Result<Self, SheetsError> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| SheetsError::Credentials(format!("unusable private key: {e}")))?;

        Ok(Self {
            http,
            key,
            encoding_key,
            scope: scope.into(),
            cached: Mutex::new(None),
        })
    }

    /// Claims for an assertion issued at `now`.
    pub fn claims(&self, now: DateTime<Utc>) -> AssertionClaims {
        let iat = now.timestamp();
        AssertionClaims {
            iss: self.key.client_email.clone(),
            scope: self.scope.clone(),
            aud: self.key.token_uri.clone(),
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        }
    }

    fn sign_assertion(&self, now: DateTime<Utc>) -> Result<String, SheetsError> {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key.private_key_id.clone();
        Ok(encode(&header, &self.claims(now), &self.encoding_key)?)
    }

    /// Return a valid access token, exchanging a new assertion if the cached
    /// one is missing or about to expire.
    pub async fn access_token(&self) -> Result<String, SheetsError> {
        let mut cached = self.cached.lock().await;
        let now = Utc::now();

        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(now)) {
            return Ok(token.access_token.clone());
        }

        let assertion = self.sign_assertion(now)?;
        let response = self
            .http
            .post(&self.key.token_uri)
            .form(&[("grant_type", GRANT_TYPE), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(status = status.as_u16(), "Service account token exchange rejected");
            return Err(SheetsError::Token {
                status: status.as_u16(),
                body,
            });
        }

        let token: TokenResponse = response.json().await?;
        tracing::debug!(
            client_email = %self.key.client_email,
            expires_in = token.expires_in,
            "Obtained service account access token"
        );

        let fresh = CachedToken {
            access_token: token.access_token,
            expires_at: now + Duration::seconds(token.expires_in),
        };
        let access_token = fresh.access_token.clone();
        *cached = Some(fresh);
        Ok(access_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_KEY: &str = include_str!("../tests/fixtures/test_key.pem");

    fn key() -> ServiceAccountKey {
        ServiceAccountKey {
            client_email: "form@events.iam.gserviceaccount.com".to_string(),
            private_key: TEST_KEY.to_string(),
            private_key_id: Some("kid-1".to_string()),
            token_uri: "https://oauth2.example.test/token".to_string(),
        }
    }

    #[test]
    fn claims_cover_one_hour() {
        let provider = TokenProvider::new(reqwest::Client::new(), key(), SPREADSHEETS_SCOPE).unwrap();
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let claims = provider.claims(now);

        assert_eq!(claims.iss, "form@events.iam.gserviceaccount.com");
        assert_eq!(claims.aud, "https://oauth2.example.test/token");
        assert_eq!(claims.scope, SPREADSHEETS_SCOPE);
        assert_eq!(claims.iat, 1_700_000_000);
        assert_eq!(claims.exp, 1_700_003_600);
    }

    #[test]
    fn assertion_is_rs256_with_kid() {
        let provider = TokenProvider::new(reqwest::Client::new(), key(), SPREADSHEETS_SCOPE).unwrap();
        let jwt = provider.sign_assertion(Utc::now()).unwrap();
        let header = jsonwebtoken::decode_header(&jwt).unwrap();

        assert_eq!(header.alg, Algorithm::RS256);
        assert_eq!(header.kid.as_deref(), Some("kid-1"));
    }

    #[test]
    fn rejects_garbage_private_key() {
        let mut bad = key();
        bad.private_key = "not a pem document".into();
        assert!(TokenProvider::new(reqwest::Client::new(), bad, SPREADSHEETS_SCOPE).is_err());
    }

    #[test]
    fn cached_token_freshness_respects_margin() {
        let now = Utc::now();
        let token = CachedToken {
            access_token: "t".to_string(),
            expires_at: now + Duration::seconds(REFRESH_MARGIN_SECS + 5),
        };
        assert!(token.is_fresh(now));
        assert!(!token.is_fresh(now + Duration::seconds(10)));
    }
}
