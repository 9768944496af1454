//! Connector-service backed credentials
//!
//! Fetches `GET https://{hostname}/api/v2/connection?include_secrets=true&connector_names={name}`
//! and keeps the first item's `settings` in memory while its `expires_at`
//! lies in the future. Settings without an expiry are refetched on every
//! call. Two callers refreshing at once both fetch; the last write wins.

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::ConnectorError;
use crate::provider::CredentialProvider;
use crate::settings::ConnectionSettings;

/// Platform token sent as `X_REPLIT_TOKEN`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformToken {
    /// Interactive workspace identity
    Identity(String),
    /// Deployment renewal token
    Renewal(String),
}

impl PlatformToken {
    /// Picks the identity token when present, else the renewal token
    pub fn resolve(identity: Option<String>, renewal: Option<String>) -> Option<Self> {
        let present = |v: Option<String>| v.filter(|s| !s.is_empty());
        present(identity)
            .map(PlatformToken::Identity)
            .or_else(|| present(renewal).map(PlatformToken::Renewal))
    }

    pub fn header_value(&self) -> String {
        match self {
            PlatformToken::Identity(token) => format!("repl {}", token),
            PlatformToken::Renewal(token) => format!("depl {}", token),
        }
    }
}

/// Connector service location and platform token
#[derive(Debug, Clone)]
pub struct ConnectorConfig {
    /// Base URL, `https://{hostname}` in production
    pub base_url: String,
    pub token: Option<PlatformToken>,
    pub timeout_secs: u64,
}

impl ConnectorConfig {
    pub fn for_hostname(hostname: &str, token: Option<PlatformToken>) -> Self {
        Self {
            base_url: format!("https://{}", hostname),
            token,
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConnectionListResponse {
    #[serde(default)]
    items: Vec<ConnectionItem>,
}

#[derive(Debug, Deserialize)]
struct ConnectionItem {
    #[serde(default)]
    settings: Option<ConnectionSettings>,
}

/// Credentials for one integration, fetched from the connector service
pub struct ConnectorCredentials {
    client: reqwest::Client,
    config: ConnectorConfig,
    connector: String,
    cache: RwLock<Option<ConnectionSettings>>,
}

impl ConnectorCredentials {
    pub fn new(config: ConnectorConfig, connector: impl Into<String>) -> Result<Self, ConnectorError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            config,
            connector: connector.into(),
            cache: RwLock::new(None),
        })
    }

    async fn cached(&self) -> Option<ConnectionSettings> {
        let cache = self.cache.read().await;
        cache
            .as_ref()
            .filter(|settings| settings.is_fresh_at(Utc::now()))
            .cloned()
    }

    async fn fetch(&self) -> Result<ConnectionSettings, ConnectorError> {
        let token = self
            .config
            .token
            .as_ref()
            .ok_or(ConnectorError::MissingPlatformToken)?;

        let url = format!("{}/api/v2/connection", self.config.base_url.trim_end_matches('/'));
        let response = self
            .client
            .get(&url)
            .query(&[
                ("include_secrets", "true"),
                ("connector_names", self.connector.as_str()),
            ])
            .header("Accept", "application/json")
            .header("X_REPLIT_TOKEN", token.header_value())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConnectorError::Status {
                status: status.as_u16(),
            });
        }

        let body: ConnectionListResponse = response.json().await?;
        let settings = body
            .items
            .into_iter()
            .next()
            .and_then(|item| item.settings)
            .ok_or_else(|| ConnectorError::not_connected(&self.connector))?;

        debug!(connector = %self.connector, expires_at = ?settings.expires_at(), "Fetched connector settings");
        Ok(settings)
    }
}

impl std::fmt::Debug for ConnectorCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectorCredentials")
            .field("base_url", &self.config.base_url)
            .field("connector", &self.connector)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CredentialProvider for ConnectorCredentials {
    fn connector_name(&self) -> &str {
        &self.connector
    }

    async fn settings(&self) -> Result<ConnectionSettings, ConnectorError> {
        if let Some(settings) = self.cached().await {
            return Ok(settings);
        }

        let settings = self.fetch().await?;
        *self.cache.write().await = Some(settings.clone());
        Ok(settings)
    }
}
