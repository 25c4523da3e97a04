use std::collections::HashSet;

use chrono::Utc;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::Mutex;
use tracing::debug;

use super::SdkError;

pub const DEFAULT_TOKEN_URL: &str = "http://localhost:5003/token";

/// Identity the token endpoint is asked to issue claims for
const TOKEN_USER_ID: &str = "d7dc0f07-8366-486c-b04c-4fa15c0b0cbd";
const TOKEN_EMAIL: &str = "test@test.com";

#[derive(Debug, Deserialize)]
struct ExpiryClaim {
    exp: i64,
}

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: i64,
}

/// Fetches and caches a bearer token, refreshing once it has expired.
///
/// The cache lock is held across the refresh, so concurrent callers that
/// find the token stale wait for a single request and then reuse its result.
pub struct AuthTokenProvider {
    http: reqwest::Client,
    token_url: String,
    cached: Mutex<Option<CachedToken>>,
}

impl AuthTokenProvider {
    pub fn new(http: reqwest::Client, token_url: impl Into<String>) -> Self {
        Self {
            http,
            token_url: token_url.into(),
            cached: Mutex::new(None),
        }
    }

    pub async fn get_token(&self) -> Result<String, SdkError> {
        let mut cached = self.cached.lock().await;

        // Checked under the lock: whoever refreshed first already stored a fresh token
        if let Some(current) = cached.as_ref() {
            if current.expires_at > Utc::now().timestamp() {
                return Ok(current.token.clone());
            }
        }

        let fresh = self.fetch().await?;
        let token = fresh.token.clone();
        *cached = Some(fresh);
        Ok(token)
    }

    async fn fetch(&self) -> Result<CachedToken, SdkError> {
        debug!("Requesting token from {}", self.token_url);

        let response = self
            .http
            .post(&self.token_url)
            .json(&json!({
                "userid": TOKEN_USER_ID,
                "email": TOKEN_EMAIL,
                "customClaims": {
                    "admin": true,
                    "trusted_member": true
                }
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SdkError::TokenEndpoint(response.status().as_u16()));
        }

        let token = response.text().await?.trim().trim_matches('"').to_string();
        let expires_at = expiry_of(&token)?;
        Ok(CachedToken { token, expires_at })
    }
}

/// Reads `exp` without verifying the signature; the server does that
fn expiry_of(token: &str) -> Result<i64, SdkError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims = HashSet::from(["exp".to_string()]);

    let data = decode::<ExpiryClaim>(token, &DecodingKey::from_secret(&[]), &validation)?;
    Ok(data.claims.exp)
}
