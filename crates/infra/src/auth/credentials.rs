//! Credential providers for Microsoft Graph.
//!
//! Two sources are supported: a pre-issued bearer token and the OAuth2
//! client-credentials grant against the tenant's token endpoint. Tokens from
//! the grant are cached until shortly before they expire.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use reqwest::Method;
use reviewbot_core::CredentialProvider;
use reviewbot_domain::constants::GRAPH_DEFAULT_SCOPE;
use reviewbot_domain::{GraphConfig, Result, ReviewBotError};
use serde::Deserialize;
use tracing::{debug, info};

use crate::http::HttpClient;

const TOKEN_ENDPOINT_BASE: &str = "https://login.microsoftonline.com";
/// Tokens are refreshed this long before their reported expiry.
const EXPIRY_MARGIN_SECS: i64 = 60;

/// Always returns the same token.
#[derive(Clone)]
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }
}

#[async_trait]
impl CredentialProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String> {
        Ok(self.token.clone())
    }
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

/// OAuth2 client-credentials grant with an in-memory token cache.
pub struct ClientCredentialsProvider {
    http: HttpClient,
    client_id: String,
    client_secret: String,
    scope: String,
    token_url: String,
    cache: Mutex<Option<CachedToken>>,
}

impl ClientCredentialsProvider {
    pub fn new(
        http: HttpClient,
        tenant_id: &str,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            http,
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            scope: GRAPH_DEFAULT_SCOPE.to_string(),
            token_url: format!("{TOKEN_ENDPOINT_BASE}/{tenant_id}/oauth2/v2.0/token"),
            cache: Mutex::new(None),
        }
    }

    /// Override the token endpoint (used by tests).
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    fn cached(&self, now: DateTime<Utc>) -> Option<String> {
        self.cache
            .lock()
            .as_ref()
            .filter(|token| token.expires_at > now)
            .map(|token| token.value.clone())
    }

    async fn request_token(&self) -> Result<TokenResponse> {
        let form = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("scope", self.scope.as_str()),
            ("grant_type", "client_credentials"),
        ];

        let builder = self.http.request(Method::POST, &self.token_url).form(&form);
        let response = self.http.send_replayable(builder).await.map_err(|err| {
            ReviewBotError::Auth(format!("Token request failed: {err}"))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ReviewBotError::Auth(format!(
                "Token request rejected ({status}): {error_text}"
            )));
        }

        response.json().await.map_err(|err| {
            ReviewBotError::Auth(format!("Failed to parse token response: {err}"))
        })
    }
}

#[async_trait]
impl CredentialProvider for ClientCredentialsProvider {
    async fn access_token(&self) -> Result<String> {
        let now = Utc::now();
        if let Some(token) = self.cached(now) {
            debug!("using cached graph token");
            return Ok(token);
        }

        let response = self.request_token().await?;
        let lifetime = (response.expires_in - EXPIRY_MARGIN_SECS).max(0);
        let token = CachedToken {
            value: response.access_token,
            expires_at: now + Duration::seconds(lifetime),
        };
        info!(expires_at = %token.expires_at, "graph token acquired");

        let value = token.value.clone();
        *self.cache.lock() = Some(token);
        Ok(value)
    }
}

/// Pick the credential source described by `config`.
///
/// A configured access token wins; otherwise tenant id, client id and client
/// secret must all be present.
///
/// # Errors
/// `Config` when neither source is fully configured.
pub fn credential_provider(
    config: &GraphConfig,
    http: HttpClient,
) -> Result<Arc<dyn CredentialProvider>> {
    if let Some(token) = config.access_token.as_deref().filter(|token| !token.is_empty()) {
        info!("using static graph access token");
        return Ok(Arc::new(StaticTokenProvider::new(token)));
    }

    match (&config.tenant_id, &config.client_id, &config.client_secret) {
        (Some(tenant_id), Some(client_id), Some(client_secret)) => {
            info!(tenant_id = %tenant_id, client_id = %client_id, "using client credentials flow");
            Ok(Arc::new(ClientCredentialsProvider::new(
                http,
                tenant_id,
                client_id.clone(),
                client_secret.clone(),
            )))
        }
        _ => Err(ReviewBotError::Config(
            "graph credentials missing: set an access token or tenant id, client id and client \
             secret"
                .to_string(),
        )),
    }
}
