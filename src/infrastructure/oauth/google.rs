use crate::error::{AppError, AppResult};
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use moka::{future::Cache, Expiry};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::{Duration, Instant};

const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

const ASSERTION_LIFETIME_SECS: i64 = 3600;
/// Lifetime assumed when the token response omits `expires_in`
const DEFAULT_TOKEN_LIFETIME_SECS: u64 = 3600;
/// Tokens are refreshed this long before they expire
const TOKEN_REFRESH_MARGIN_SECS: u64 = 60;

/// Relevant fields of a service account key file (credentials.json)
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    GOOGLE_TOKEN_URL.to_string()
}

impl ServiceAccountKey {
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::Internal(format!(
                "Failed to read Google credentials {}: {}",
                path.display(),
                e
            ))
        })?;

        serde_json::from_str(&raw)
            .map_err(|e| AppError::Internal(format!("Invalid Google credentials file: {}", e)))
    }
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_token_lifetime")]
    expires_in: u64,
}

fn default_token_lifetime() -> u64 {
    DEFAULT_TOKEN_LIFETIME_SECS
}

/// Access token plus how long it may be served from the cache
#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    ttl: Duration,
}

impl From<TokenResponse> for CachedToken {
    fn from(response: TokenResponse) -> Self {
        Self {
            access_token: response.access_token,
            ttl: Duration::from_secs(
                response
                    .expires_in
                    .saturating_sub(TOKEN_REFRESH_MARGIN_SECS),
            ),
        }
    }
}

/// Expires each cached token according to its own lifetime
struct TokenExpiry;

impl Expiry<&'static str, CachedToken> for TokenExpiry {
    fn expire_after_create(
        &self,
        _key: &&'static str,
        value: &CachedToken,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Mints and caches OAuth access tokens for a service account
pub struct GoogleTokenProvider {
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    http_client: reqwest::Client,
    cache: Cache<&'static str, CachedToken>,
}

impl GoogleTokenProvider {
    pub fn new(key: ServiceAccountKey, http_client: reqwest::Client) -> AppResult<Self> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| AppError::Internal(format!("Invalid service account private key: {}", e)))?;

        let cache = Cache::builder()
            .max_capacity(1)
            .expire_after(TokenExpiry)
            .build();

        Ok(Self {
            key,
            encoding_key,
            http_client,
            cache,
        })
    }

    /// Current access token, fetching a new one once the cached token is
    /// within a minute of expiring
    pub async fn access_token(&self) -> Result<String, String> {
        self.cache
            .try_get_with(CLOUD_PLATFORM_SCOPE, self.fetch_token())
            .await
            .map(|token| token.access_token)
            .map_err(|e| e.to_string())
    }

    /// Signed JWT assertion exchanged for an access token
    fn build_assertion(&self) -> Result<String, String> {
        let now = Utc::now().timestamp();
        let claims = AssertionClaims {
            iss: &self.key.client_email,
            scope: CLOUD_PLATFORM_SCOPE,
            aud: &self.key.token_uri,
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        };

        encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key)
            .map_err(|e| format!("Failed to sign token assertion: {}", e))
    }

    async fn fetch_token(&self) -> Result<CachedToken, String> {
        let assertion = self.build_assertion()?;
        let params = [("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())];

        tracing::debug!(
            client_email = %self.key.client_email,
            token_uri = %self.key.token_uri,
            "Requesting Google access token"
        );

        let response = self
            .http_client
            .post(&self.key.token_uri)
            .form(&params)
            .send()
            .await
            .map_err(|e| format!("Google token exchange failed: {}", e))?;

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(format!("Google token exchange failed: {}", error_text));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse Google token: {}", e))?;

        tracing::info!(expires_in = token.expires_in, "Google access token refreshed");

        Ok(CachedToken::from(token))
    }
}

/// How requests to Google are authorised
pub enum GoogleCredentials {
    /// API key sent as the `key` query parameter
    ApiKey(String),
    /// Bearer token minted from a service account
    ServiceAccount(GoogleTokenProvider),
}

impl GoogleCredentials {
    /// Prefer an API key when one is configured, otherwise load the key file
    pub fn load(
        api_key: Option<&str>,
        credentials_path: &Path,
        http_client: reqwest::Client,
    ) -> AppResult<Self> {
        if let Some(api_key) = api_key.filter(|k| !k.is_empty()) {
            tracing::info!("Using Google API key authentication");
            return Ok(Self::ApiKey(api_key.to_string()));
        }

        let key = ServiceAccountKey::from_file(credentials_path)?;
        tracing::info!(
            client_email = %key.client_email,
            "Using Google service account authentication"
        );
        Ok(Self::ServiceAccount(GoogleTokenProvider::new(
            key,
            http_client,
        )?))
    }

    /// Attach credentials to an outgoing request
    pub async fn authorize(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, String> {
        match self {
            Self::ApiKey(key) => Ok(request.query(&[("key", key)])),
            Self::ServiceAccount(provider) => {
                let token = provider.access_token().await?;
                Ok(request.bearer_auth(token))
            }
        }
    }
}
