use std::{
    sync::Mutex,
    time::{Duration, Instant},
};

use anyhow::{anyhow, Context};
use jsonwebtoken::{encode, get_current_timestamp, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::configuration::{ServiceAccountSettings, SpreadsheetSettings};

use super::send_with_retry;

const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: u64 = 3600;
/// Tokens this close to expiry are refreshed before use.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: u64,
    exp: u64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

struct CachedToken {
    token: String,
    expires_at: Instant,
}

/// OAuth tokens for a Google service account, exchanged from a signed JWT and
/// cached until shortly before they expire.
pub struct ServiceAccountTokens {
    client: Client,
    client_email: String,
    token_uri: String,
    key: EncodingKey,
    cached: Mutex<Option<CachedToken>>,
}

impl ServiceAccountTokens {
    pub fn new(client: Client, settings: &ServiceAccountSettings) -> anyhow::Result<Self> {
        // Keys passed through env vars usually carry escaped newlines
        let pem = settings.private_key.replace("\\n", "\n");
        let key = EncodingKey::from_rsa_pem(pem.as_bytes())
            .context("Invalid service account private key")?;

        Ok(ServiceAccountTokens {
            client,
            client_email: settings.client_email.clone(),
            token_uri: settings.token_uri.clone(),
            key,
            cached: Mutex::new(None),
        })
    }

    fn cached_token(&self) -> Option<String> {
        let cached = self.cached.lock().ok()?;
        cached
            .as_ref()
            .filter(|c| c.expires_at > Instant::now() + EXPIRY_MARGIN)
            .map(|c| c.token.clone())
    }

    fn assertion(&self) -> anyhow::Result<String> {
        let iat = get_current_timestamp();
        let claims = Claims {
            iss: &self.client_email,
            scope: SHEETS_SCOPE,
            aud: &self.token_uri,
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };

        encode(&Header::new(Algorithm::RS256), &claims, &self.key)
            .context("Signing service account assertion")
    }

    pub async fn token(&self) -> anyhow::Result<String> {
        if let Some(token) = self.cached_token() {
            return Ok(token);
        }

        let assertion = self.assertion()?;
        let res = send_with_retry(self.client.post(&self.token_uri).form(&[
            ("grant_type", JWT_BEARER_GRANT),
            ("assertion", assertion.as_str()),
        ]))
        .await
        .context("Requesting service account token")?;

        if !res.status().is_success() {
            return Err(anyhow!("Token endpoint answered {}", res.status()));
        }

        let response: TokenResponse = res.json().await.context("Invalid token response")?;
        log::info!(
            "New sheets token for {}, valid for {}s",
            self.client_email,
            response.expires_in
        );

        if let Ok(mut cached) = self.cached.lock() {
            *cached = Some(CachedToken {
                token: response.access_token.clone(),
                expires_at: Instant::now() + Duration::from_secs(response.expires_in),
            });
        }

        Ok(response.access_token)
    }
}

/// How sheet requests are authorized.
pub enum SheetsAuth {
    /// A bearer token used as is.
    Static(String),
    ServiceAccount(ServiceAccountTokens),
}

impl SheetsAuth {
    /// A configured service account wins over a static token.
    pub fn from_settings(client: Client, settings: &SpreadsheetSettings) -> anyhow::Result<Self> {
        if let Some(account) = &settings.service_account {
            return Ok(SheetsAuth::ServiceAccount(ServiceAccountTokens::new(
                client, account,
            )?));
        }

        match settings.access_token.as_deref() {
            Some(token) if !token.is_empty() => Ok(SheetsAuth::Static(token.to_string())),
            _ => Err(anyhow!(
                "Set spreadsheet.service_account or spreadsheet.access_token"
            )),
        }
    }

    pub async fn bearer_token(&self) -> anyhow::Result<String> {
        match self {
            SheetsAuth::Static(token) => Ok(token.clone()),
            SheetsAuth::ServiceAccount(tokens) => tokens.token().await,
        }
    }
}
